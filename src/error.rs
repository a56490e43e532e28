use std::path::Path;

use thiserror::Error;

/// Unified error type for update-version operations
#[derive(Error, Debug)]
pub enum UpdateVersionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Invalid increment type: {0}")]
    Increment(String),

    #[error("Manifest error in {path}: {reason}")]
    Manifest { path: String, reason: String },

    #[error("Reference not found: {0}")]
    RefNotFound(String),

    #[error("Command `{command}` failed: {message}")]
    Process { command: String, message: String },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Convenience type alias for Results in update-version
pub type Result<T> = std::result::Result<T, UpdateVersionError>;

impl UpdateVersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        UpdateVersionError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        UpdateVersionError::Version(msg.into())
    }

    /// Create an increment-kind error with context
    pub fn increment(kind: impl Into<String>) -> Self {
        UpdateVersionError::Increment(kind.into())
    }

    /// Create a manifest error for the file at `path`
    pub fn manifest(path: &Path, reason: impl Into<String>) -> Self {
        UpdateVersionError::Manifest {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    /// Create a process error for a failed external command
    pub fn process(command: impl Into<String>, message: impl Into<String>) -> Self {
        UpdateVersionError::Process {
            command: command.into(),
            message: message.into(),
        }
    }

    /// True when the error means a requested reference (tag) does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            UpdateVersionError::RefNotFound(_) => true,
            UpdateVersionError::Git(e) => e.code() == git2::ErrorCode::NotFound,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UpdateVersionError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: UpdateVersionError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_manifest_error_names_path() {
        let err = UpdateVersionError::manifest(Path::new("package.json"), "missing");
        assert_eq!(err.to_string(), "Manifest error in package.json: missing");
    }

    #[test]
    fn test_process_error_names_command() {
        let err = UpdateVersionError::process("git log -10", "exit status 128");
        let msg = err.to_string();
        assert!(msg.contains("git log -10"));
        assert!(msg.contains("exit status 128"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(UpdateVersionError::RefNotFound("v1.0.0".to_string()).is_not_found());
        assert!(!UpdateVersionError::process("git", "boom").is_not_found());
        let git_err = git2::Error::new(
            git2::ErrorCode::NotFound,
            git2::ErrorClass::Reference,
            "no such tag",
        );
        assert!(UpdateVersionError::from(git_err).is_not_found());
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (UpdateVersionError::config("x"), "Configuration error"),
            (UpdateVersionError::version("x"), "Version parsing error"),
            (UpdateVersionError::increment("x"), "Invalid increment type"),
            (UpdateVersionError::process("x", "y"), "Command `x` failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
