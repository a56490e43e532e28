use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, UpdateVersionError};

/// File name looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = "update-version.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".update-version.toml";

/// Represents the complete configuration for update-version.
///
/// Contains the target file locations, history settings, and the
/// distribution copy list. Every field has a default, so an empty file is valid.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub source_constant: SourceConstantConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub publish: PublishConfig,
}

/// Paths of the files touched by a version bump, relative to the project root.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FilesConfig {
    #[serde(default = "default_package_manifest")]
    pub package_manifest: PathBuf,

    #[serde(default = "default_app_manifest")]
    pub app_manifest: PathBuf,

    #[serde(default = "default_source_constant")]
    pub source_constant: PathBuf,

    #[serde(default = "default_readme")]
    pub readme: PathBuf,

    #[serde(default = "default_disclaimer")]
    pub disclaimer: PathBuf,

    #[serde(default = "default_changelog")]
    pub changelog: PathBuf,
}

fn default_package_manifest() -> PathBuf {
    PathBuf::from("package.json")
}

fn default_app_manifest() -> PathBuf {
    PathBuf::from("public/manifest.json")
}

fn default_source_constant() -> PathBuf {
    PathBuf::from("config/guidelines.ts")
}

fn default_readme() -> PathBuf {
    PathBuf::from("README.md")
}

fn default_disclaimer() -> PathBuf {
    PathBuf::from("MEDICAL_DISCLAIMER.md")
}

fn default_changelog() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            package_manifest: default_package_manifest(),
            app_manifest: default_app_manifest(),
            source_constant: default_source_constant(),
            readme: default_readme(),
            disclaimer: default_disclaimer(),
            changelog: default_changelog(),
        }
    }
}

/// The exported constant holding the version in the source file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SourceConstantConfig {
    #[serde(default = "default_constant_name")]
    pub name: String,
}

fn default_constant_name() -> String {
    "APP_VERSION".to_string()
}

impl Default for SourceConstantConfig {
    fn default() -> Self {
        SourceConstantConfig {
            name: default_constant_name(),
        }
    }
}

/// Which implementation answers commit-history queries.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    /// Shell out to the system `git` binary
    #[default]
    Git,
    /// Walk the repository in-process through libgit2
    Libgit2,
}

/// Configuration for reading commits since the previous release.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HistoryConfig {
    #[serde(default)]
    pub backend: HistoryBackend,

    /// Prepended to the previous version to name its tag
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    /// Commits taken from HEAD when the previous tag cannot be used
    #[serde(default = "default_fallback_commit_count")]
    pub fallback_commit_count: usize,
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_fallback_commit_count() -> usize {
    10
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            backend: HistoryBackend::default(),
            tag_prefix: default_tag_prefix(),
            fallback_commit_count: default_fallback_commit_count(),
        }
    }
}

/// Distribution directory that receives copies of selected files.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PublishConfig {
    #[serde(default = "default_publish_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_publish_files")]
    pub files: Vec<PathBuf>,
}

fn default_publish_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_publish_files() -> Vec<PathBuf> {
    vec![default_disclaimer(), default_changelog()]
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            dir: default_publish_dir(),
            files: default_publish_files(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `update-version.toml` in the project root
/// 3. `.update-version.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, project_root: &Path) -> Result<Config> {
    match locate_config(config_path, project_root)? {
        Some(path) => {
            tracing::debug!("loading configuration from {}", path.display());
            let text = fs::read_to_string(&path).map_err(|e| {
                UpdateVersionError::config(format!("cannot read {}: {}", path.display(), e))
            })?;
            Config::from_toml(&text)
        }
        None => Ok(Config::default()),
    }
}

fn locate_config(config_path: Option<&Path>, project_root: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = config_path {
        if !path.is_file() {
            return Err(UpdateVersionError::config(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = project_root.join(PROJECT_CONFIG_FILE);
    if local.is_file() {
        return Ok(Some(local));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join(USER_CONFIG_FILE);
        if user.is_file() {
            return Ok(Some(user));
        }
    }

    Ok(None)
}
