use crate::domain::CommitRecord;
use crate::error::{Result, UpdateVersionError};
use crate::history::CommitHistory;
use std::collections::HashMap;

/// Mock history for testing without a repository
#[derive(Debug, Default, Clone)]
pub struct MockHistory {
    tags: HashMap<String, Vec<CommitRecord>>,
    recent: Vec<CommitRecord>,
    failure: Option<String>,
}

impl MockHistory {
    /// Create an empty mock history
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `commits_since_tag(tag)` with `commits`
    pub fn with_tag(mut self, tag: impl Into<String>, commits: Vec<CommitRecord>) -> Self {
        self.tags.insert(tag.into(), commits);
        self
    }

    /// Newest-first commits served by `recent_commits`
    pub fn with_recent(mut self, commits: Vec<CommitRecord>) -> Self {
        self.recent = commits;
        self
    }

    /// Make every query fail with a process error
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    fn check_failure(&self, command: &str) -> Result<()> {
        match &self.failure {
            Some(message) => Err(UpdateVersionError::process(command, message.clone())),
            None => Ok(()),
        }
    }
}

impl CommitHistory for MockHistory {
    fn commits_since_tag(&self, tag: &str) -> Result<Vec<CommitRecord>> {
        self.check_failure("mock log range")?;
        self.tags
            .get(tag)
            .cloned()
            .ok_or_else(|| UpdateVersionError::RefNotFound(tag.to_string()))
    }

    fn recent_commits(&self, limit: usize) -> Result<Vec<CommitRecord>> {
        self.check_failure("mock log recent")?;
        Ok(self.recent.iter().take(limit).cloned().collect())
    }
}
