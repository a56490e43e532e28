//! User interface module - terminal output for a run.
//!
//! - `formatter` - printing functions
//! - This module - text assembly that is worth testing on its own

use crate::config::Config;
use crate::domain::Version;

pub mod formatter;

pub use formatter::{
    display_error, display_header, display_history, display_next_steps, display_report,
    display_status, display_step, display_success, display_versions, display_warning,
};

/// Suggested commands to stage and commit the release.
///
/// Lists the version-bearing files plus the publish directory, followed by a
/// conventional `chore:` commit message.
pub fn next_steps(config: &Config, version: &Version) -> Vec<String> {
    let files = &config.files;
    let paths = [
        &files.package_manifest,
        &files.source_constant,
        &files.readme,
        &files.disclaimer,
        &files.changelog,
        &config.publish.dir,
    ];

    let mut staged: Vec<String> = Vec::with_capacity(paths.len());
    for path in paths {
        let mut display = path.display().to_string();
        if path == &config.publish.dir && !display.ends_with('/') {
            display.push('/');
        }
        if !staged.contains(&display) {
            staged.push(display);
        }
    }

    vec![
        format!("git add {}", staged.join(" ")),
        format!("git commit -m 'chore: bump version to {}'", version),
        "git push".to_string(),
    ]
}
