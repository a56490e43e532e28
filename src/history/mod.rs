//! Commit history abstraction layer
//!
//! The changelog only needs two queries from version control: the commits
//! since the previous release tag, and a fixed window of recent commits when
//! that tag cannot be used. [CommitHistory] captures those queries so the
//! workflow can run against:
//!
//! - [command::GitCommand]: the system `git` binary (default)
//! - [repository::Git2History]: an in-process libgit2 revwalk
//! - [mock::MockHistory]: canned answers for tests
//!
//! [collect_commits] applies the fallback policy on top of any backend.

pub mod command;
pub mod mock;
pub mod repository;

pub use command::GitCommand;
pub use mock::MockHistory;
pub use repository::Git2History;

use std::fmt;
use std::path::Path;

use crate::config::{HistoryBackend, HistoryConfig};
use crate::domain::CommitRecord;
use crate::error::Result;

/// Read-only access to the commit log of a project.
///
/// Both queries return commits newest first.
///
/// ## Error Handling
///
/// Implementations report a missing tag as
/// [crate::error::UpdateVersionError::RefNotFound] and any other backend
/// failure as [crate::error::UpdateVersionError::Process] (or a `git2` error).
pub trait CommitHistory {
    /// Commits reachable from HEAD but not from `tag`.
    fn commits_since_tag(&self, tag: &str) -> Result<Vec<CommitRecord>>;

    /// The newest `limit` commits reachable from HEAD.
    fn recent_commits(&self, limit: usize) -> Result<Vec<CommitRecord>>;
}

impl<T: CommitHistory + ?Sized> CommitHistory for Box<T> {
    fn commits_since_tag(&self, tag: &str) -> Result<Vec<CommitRecord>> {
        (**self).commits_since_tag(tag)
    }

    fn recent_commits(&self, limit: usize) -> Result<Vec<CommitRecord>> {
        (**self).recent_commits(limit)
    }
}

/// Build the configured backend for the repository at `project_root`.
pub fn open_history(config: &HistoryConfig, project_root: &Path) -> Box<dyn CommitHistory> {
    match config.backend {
        HistoryBackend::Git => Box::new(GitCommand::new(project_root)),
        HistoryBackend::Libgit2 => Box::new(Git2History::new(project_root)),
    }
}

/// Where the commits in a [CommitLog] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistorySource {
    /// Range from the previous release tag to HEAD
    SinceTag(String),
    /// Fixed window of recent commits
    Recent(usize),
    /// Both queries failed
    Unavailable(String),
}

impl fmt::Display for HistorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistorySource::SinceTag(tag) => write!(f, "since {}", tag),
            HistorySource::Recent(limit) => write!(f, "last {} commits", limit),
            HistorySource::Unavailable(reason) => write!(f, "unavailable: {}", reason),
        }
    }
}

/// Commits gathered for a changelog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitLog {
    pub commits: Vec<CommitRecord>,
    pub source: HistorySource,
}

/// Collect the commits since `tag`, falling back to the newest
/// `fallback_limit` commits if the range query fails for any reason.
///
/// Never fails: when both queries error the log is empty and its source is
/// [HistorySource::Unavailable].
pub fn collect_commits<H: CommitHistory + ?Sized>(
    history: &H,
    tag: &str,
    fallback_limit: usize,
) -> CommitLog {
    match history.commits_since_tag(tag) {
        Ok(commits) => {
            return CommitLog {
                commits,
                source: HistorySource::SinceTag(tag.to_string()),
            }
        }
        Err(e) if e.is_not_found() => {
            tracing::debug!(
                "tag {} not found, using last {} commits",
                tag,
                fallback_limit
            );
        }
        Err(e) => {
            tracing::debug!(
                "range query from {} failed ({}), using last {} commits",
                tag,
                e,
                fallback_limit
            );
        }
    }

    match history.recent_commits(fallback_limit) {
        Ok(commits) => CommitLog {
            commits,
            source: HistorySource::Recent(fallback_limit),
        },
        Err(e) => {
            tracing::warn!("error getting commits: {}", e);
            CommitLog {
                commits: Vec::new(),
                source: HistorySource::Unavailable(e.to_string()),
            }
        }
    }
}
