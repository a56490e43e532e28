//! Changelog entry rendering and insertion.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::domain::{categorize, strip_prefix, Category, CommitRecord, Version};
use crate::error::Result;
use crate::patch::{read_existing, write_file};
use crate::report::StepOutcome;
use crate::warning::StepWarning;

/// Header written when the changelog is created from scratch
pub const PREAMBLE: &str =
    "# Changelog\n\nAll notable changes to this project will be documented in this file.\n\n";

/// Group commits by category, keeping retrieval order within each group.
pub fn group_commits(commits: &[CommitRecord]) -> BTreeMap<Category, Vec<&CommitRecord>> {
    let mut groups: BTreeMap<Category, Vec<&CommitRecord>> = BTreeMap::new();
    for commit in commits {
        groups
            .entry(categorize(&commit.message))
            .or_default()
            .push(commit);
    }
    groups
}

/// Render one `## [version] - date` section.
///
/// Categories appear in priority order and only when they have commits.
pub fn render_entry(version: &Version, date: NaiveDate, commits: &[CommitRecord]) -> String {
    let mut output = String::new();

    _ = writeln!(output, "## [{}] - {}\n", version, date.format("%Y-%m-%d"));

    for (category, commits) in group_commits(commits) {
        _ = writeln!(output, "### {}\n", category);
        for commit in commits {
            _ = writeln!(
                output,
                "- {} ({})",
                strip_prefix(&commit.message),
                commit.short_hash()
            );
        }
        output.push('\n');
    }

    output
}

/// True if `content` already has a section for `version`
pub fn has_entry(content: &str, version: &Version) -> bool {
    content.contains(&format!("## [{}]", version))
}

/// The project changelog file
#[derive(Debug, Clone)]
pub struct Changelog {
    path: PathBuf,
    relative: PathBuf,
}

impl Changelog {
    pub fn new(project_root: &Path, relative: impl Into<PathBuf>) -> Self {
        let relative = relative.into();
        Changelog {
            path: project_root.join(&relative),
            relative,
        }
    }

    pub fn target(&self) -> &Path {
        &self.relative
    }

    /// Prepend `entry` (rendered for `version`), creating the file if needed.
    ///
    /// Does nothing if the changelog already has a section for `version`.
    pub fn insert(&self, version: &Version, entry: &str, dry_run: bool) -> Result<StepOutcome> {
        match read_existing(&self.path)? {
            Some(content) => {
                if has_entry(&content, version) {
                    return Ok(StepOutcome::Skipped(StepWarning::ChangelogEntryExists {
                        version: version.to_string(),
                    }));
                }

                let mut updated = String::with_capacity(entry.len() + content.len());
                updated.push_str(entry);
                updated.push_str(&content);
                write_file(&self.path, &updated, dry_run)?;

                Ok(StepOutcome::Applied(format!(
                    "Updated {} with version {}",
                    self.relative.display(),
                    version
                )))
            }
            None => {
                write_file(&self.path, &format!("{}{}", PREAMBLE, entry), dry_run)?;

                Ok(StepOutcome::Applied(format!(
                    "Created {} with version {}",
                    self.relative.display(),
                    version
                )))
            }
        }
    }
}
