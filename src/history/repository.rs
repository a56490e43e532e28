use crate::domain::CommitRecord;
use crate::error::{Result, UpdateVersionError};
use crate::history::CommitHistory;
use git2::{Oid, Repository as Git2Repo, Sort};
use std::path::PathBuf;

/// History backend that walks the repository through libgit2
///
/// The repository is discovered from `path` on every query, so constructing
/// this type never fails; a missing repository surfaces as a query error.
#[derive(Debug, Clone)]
pub struct Git2History {
    path: PathBuf,
}

impl Git2History {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Git2History { path: path.into() }
    }

    fn open(&self) -> Result<Git2Repo> {
        Ok(Git2Repo::discover(&self.path)?)
    }

    fn find_tag_target(repo: &Git2Repo, tag: &str) -> Result<Oid> {
        let reference_name = format!("refs/tags/{}", tag);

        match repo.find_reference(&reference_name) {
            Ok(reference) => Ok(reference.peel_to_commit()?.id()),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(UpdateVersionError::RefNotFound(tag.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Walk from HEAD, newest first, hiding `hide` and stopping after `limit`.
    fn walk(repo: &Git2Repo, hide: Option<Oid>, limit: Option<usize>) -> Result<Vec<CommitRecord>> {
        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;

        if let Some(oid) = hide {
            revwalk.hide(oid)?;
        }

        let mut commits = Vec::new();
        for oid_result in revwalk {
            if limit.is_some_and(|limit| commits.len() >= limit) {
                break;
            }

            let oid = oid_result?;
            let commit = repo.find_commit(oid)?;
            let message = commit.summary().unwrap_or("(empty message)").to_string();

            commits.push(CommitRecord::new(oid.to_string(), message));
        }

        Ok(commits)
    }
}

impl CommitHistory for Git2History {
    fn commits_since_tag(&self, tag: &str) -> Result<Vec<CommitRecord>> {
        let repo = self.open()?;
        let tag_oid = Self::find_tag_target(&repo, tag)?;
        Self::walk(&repo, Some(tag_oid), None)
    }

    fn recent_commits(&self, limit: usize) -> Result<Vec<CommitRecord>> {
        let repo = self.open()?;
        Self::walk(&repo, None, Some(limit))
    }
}
