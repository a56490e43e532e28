use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::Version;
use crate::error::{Result, UpdateVersionError};
use crate::patch::{read_existing, write_file, Patcher};
use crate::report::StepOutcome;
use crate::warning::StepWarning;

/// Version assumed when a package manifest has no `version` field
pub const DEFAULT_VERSION: Version = Version {
    major: 1,
    minor: 0,
    patch: 0,
};

/// Sets the top-level `version` field of a JSON manifest.
///
/// Key order is preserved and the file is re-emitted with two-space
/// indentation and a trailing newline.
#[derive(Debug, Clone)]
pub struct JsonVersionField {
    path: PathBuf,
    relative: PathBuf,
}

impl JsonVersionField {
    pub fn new(project_root: &Path, relative: impl Into<PathBuf>) -> Self {
        let relative = relative.into();
        JsonVersionField {
            path: project_root.join(&relative),
            relative,
        }
    }

    fn unparsable(&self, reason: impl Into<String>) -> StepOutcome {
        StepOutcome::Skipped(StepWarning::Unparsable {
            path: self.relative.clone(),
            reason: reason.into(),
        })
    }
}

impl Patcher for JsonVersionField {
    fn target(&self) -> &Path {
        &self.relative
    }

    fn apply(&self, version: &Version, dry_run: bool) -> Result<StepOutcome> {
        let content = match read_existing(&self.path)? {
            Some(content) => content,
            None => {
                return Ok(StepOutcome::Skipped(StepWarning::FileMissing {
                    path: self.relative.clone(),
                }))
            }
        };

        let mut json: Value = match serde_json::from_str(&content) {
            Ok(json) => json,
            Err(e) => return Ok(self.unparsable(e.to_string())),
        };

        let object = match json.as_object_mut() {
            Some(object) => object,
            None => return Ok(self.unparsable("not a JSON object")),
        };

        let new_version = version.to_string();
        let previous = object
            .get("version")
            .and_then(Value::as_str)
            .map(str::to_string);

        if previous.as_deref() == Some(new_version.as_str()) {
            return Ok(StepOutcome::Unchanged);
        }

        object.insert("version".to_string(), Value::String(new_version.clone()));

        let rendered = format!("{}\n", serde_json::to_string_pretty(&json)?);
        write_file(&self.path, &rendered, dry_run)?;

        let detail = match previous {
            Some(old) => format!(
                "Updated {}: {} → {}",
                self.relative.display(),
                old,
                new_version
            ),
            None => format!(
                "Added version to {}: {}",
                self.relative.display(),
                new_version
            ),
        };
        Ok(StepOutcome::Applied(detail))
    }
}

/// Read the current version from a package manifest.
///
/// A missing manifest, or one without a `version` field, yields
/// [DEFAULT_VERSION]. An unreadable or malformed manifest, or a malformed
/// version string, is an error.
pub fn read_manifest_version(path: &Path) -> Result<Version> {
    let content = match read_existing(path)
        .map_err(|e| UpdateVersionError::manifest(path, format!("cannot read file: {}", e)))?
    {
        Some(content) => content,
        None => {
            tracing::warn!(
                "{} not found, assuming version {}",
                path.display(),
                DEFAULT_VERSION
            );
            return Ok(DEFAULT_VERSION);
        }
    };

    let json: Value = serde_json::from_str(&content)
        .map_err(|e| UpdateVersionError::manifest(path, e.to_string()))?;

    match json.get("version") {
        None => Ok(DEFAULT_VERSION),
        Some(Value::String(version)) => Version::parse(version),
        Some(other) => Err(UpdateVersionError::manifest(
            path,
            format!("version field is not a string: {}", other),
        )),
    }
}
