//! System git backend
//!
//! Runs `git log` with a `hash|subject` format and parses the output.

use std::path::PathBuf;
use std::process::Command;

use crate::domain::CommitRecord;
use crate::error::{Result, UpdateVersionError};
use crate::history::CommitHistory;

const LOG_FORMAT: &str = "--pretty=format:%H|%s";

/// History backend that shells out to the `git` binary on `PATH`
#[derive(Debug, Clone)]
pub struct GitCommand {
    work_dir: PathBuf,
}

impl GitCommand {
    /// Query the repository containing `work_dir`
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        GitCommand {
            work_dir: work_dir.into(),
        }
    }

    /// Run `git log <args> --pretty=format:%H|%s` and return stdout.
    fn log(&self, args: &[&str]) -> Result<String> {
        let command_line = format!("git log {} {}", args.join(" "), LOG_FORMAT);
        tracing::debug!("running `{}` in {}", command_line, self.work_dir.display());

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.work_dir)
            .arg("log")
            .args(args)
            .arg(LOG_FORMAT)
            .env("LC_ALL", "C")
            .output()
            .map_err(|e| UpdateVersionError::process(&command_line, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("exit status {}", output.status)
            } else {
                stderr
            };
            return Err(UpdateVersionError::process(command_line, message));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl CommitHistory for GitCommand {
    fn commits_since_tag(&self, tag: &str) -> Result<Vec<CommitRecord>> {
        let range = format!("{}..HEAD", tag);
        match self.log(&[&range]) {
            Ok(stdout) => Ok(parse_log_output(&stdout)),
            Err(UpdateVersionError::Process { message, .. })
                if message.contains("unknown revision") || message.contains("bad revision") =>
            {
                Err(UpdateVersionError::RefNotFound(tag.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    fn recent_commits(&self, limit: usize) -> Result<Vec<CommitRecord>> {
        let limit = limit.to_string();
        let stdout = self.log(&["-n", &limit])?;
        Ok(parse_log_output(&stdout))
    }
}

/// Parse `hash|subject` lines, newest first.
///
/// Blank lines are ignored; lines without a `|` are skipped.
pub fn parse_log_output(stdout: &str) -> Vec<CommitRecord> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let record = CommitRecord::from_log_line(line);
            if record.is_none() {
                tracing::debug!("skipping malformed log line: {:?}", line);
            }
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_output() {
        let stdout = "1111111111|feat: add login\n2222222222|fix: crash | again\n";
        let commits = parse_log_output(stdout);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0], CommitRecord::new("1111111111", "feat: add login"));
        assert_eq!(commits[1].message, "fix: crash | again");
    }

    #[test]
    fn test_parse_log_output_skips_blank_and_malformed() {
        let stdout = "\n1111111|ok\ngarbage\n\n";
        let commits = parse_log_output(stdout);
        assert_eq!(commits, vec![CommitRecord::new("1111111", "ok")]);
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_log_output("").is_empty());
    }

    #[test]
    fn test_failure_names_the_command() {
        let dir = tempfile::TempDir::new().unwrap();
        let history = GitCommand::new(dir.path().join("does-not-exist"));

        match history.recent_commits(5) {
            Err(UpdateVersionError::Process { command, .. }) => {
                assert_eq!(command, "git log -n 5 --pretty=format:%H|%s");
            }
            other => panic!("expected a process error, got: {:?}", other),
        }
    }
}
