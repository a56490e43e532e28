//! Version file patchers.
//!
//! Each patcher owns one target file and rewrites the version it carries:
//! - [json::JsonVersionField]: top-level `version` of a JSON manifest
//! - [text::TextPattern]: a regex-located line in a text file
//! - [readme::ReadmeBadge]: the shields.io version badge in a README
//!
//! Patchers read the whole file and write it back only when the content
//! changed. A missing file or missing pattern is reported as a skipped step,
//! not an error; `Err` is reserved for unexpected I/O failures.

pub mod json;
pub mod readme;
pub mod text;

pub use json::{read_manifest_version, JsonVersionField};
pub use readme::ReadmeBadge;
pub use text::TextPattern;

use std::fs;
use std::io;
use std::path::Path;

use crate::domain::Version;
use crate::error::Result;
use crate::report::StepOutcome;

/// A single version-bearing file
pub trait Patcher {
    /// Path of the target relative to the project root
    fn target(&self) -> &Path;

    /// Rewrite the target to carry `version`.
    ///
    /// With `dry_run` set, the outcome is computed but nothing is written.
    fn apply(&self, version: &Version, dry_run: bool) -> Result<StepOutcome>;
}

/// Read a file, mapping "does not exist" to `None`.
pub(crate) fn read_existing(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn write_file(path: &Path, content: &str, dry_run: bool) -> Result<()> {
    if dry_run {
        tracing::debug!("dry run: not writing {}", path.display());
        return Ok(());
    }
    tracing::debug!("writing {}", path.display());
    fs::write(path, content)?;
    Ok(())
}
