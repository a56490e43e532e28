use std::fmt;
use std::path::PathBuf;

/// Non-fatal problems that cause a single step to be skipped.
/// These are reported to the user; the run carries on.
#[derive(Debug, Clone, PartialEq)]
pub enum StepWarning {
    /// Target file does not exist
    FileMissing { path: PathBuf },
    /// File exists but the expected version text is absent
    PatternNotFound { path: PathBuf, what: String },
    /// README has neither a version badge nor a License badge to anchor one
    NoBadgeAnchor { path: PathBuf },
    /// File could not be parsed in its expected format
    Unparsable { path: PathBuf, reason: String },
    /// Changelog already has a section for this version
    ChangelogEntryExists { version: String },
    /// No commits were found to summarize
    NoCommits,
    /// Version-control history could not be queried at all
    HistoryUnavailable { reason: String },
}

impl fmt::Display for StepWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepWarning::FileMissing { path } => {
                write!(f, "{} not found, skipping", path.display())
            }
            StepWarning::PatternNotFound { path, what } => {
                write!(f, "No {} found in {}", what, path.display())
            }
            StepWarning::NoBadgeAnchor { path } => {
                write!(
                    f,
                    "Could not find location to add version badge in {}",
                    path.display()
                )
            }
            StepWarning::Unparsable { path, reason } => {
                write!(f, "Cannot parse {}: {}", path.display(), reason)
            }
            StepWarning::ChangelogEntryExists { version } => {
                write!(f, "Version {} already exists in the changelog", version)
            }
            StepWarning::NoCommits => write!(f, "No commits found, skipping changelog update"),
            StepWarning::HistoryUnavailable { reason } => {
                write!(
                    f,
                    "Could not read commit history ({}), skipping changelog update",
                    reason
                )
            }
        }
    }
}
