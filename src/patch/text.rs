use std::path::{Path, PathBuf};

use regex::{NoExpand, Regex};

use crate::domain::Version;
use crate::error::Result;
use crate::patch::{read_existing, write_file, Patcher};
use crate::report::StepOutcome;
use crate::warning::StepWarning;

const VERSION_PLACEHOLDER: &str = "{version}";

/// Replaces every match of a version-bearing pattern in a text file.
///
/// The replacement is a template in which `{version}` stands for the new
/// version string; it is inserted literally (no `$` group expansion).
#[derive(Debug, Clone)]
pub struct TextPattern {
    path: PathBuf,
    relative: PathBuf,
    pattern: Regex,
    template: String,
    what: String,
}

impl TextPattern {
    pub fn new(
        project_root: &Path,
        relative: impl Into<PathBuf>,
        pattern: &str,
        template: impl Into<String>,
        what: impl Into<String>,
    ) -> Result<Self> {
        let relative = relative.into();
        Ok(TextPattern {
            path: project_root.join(&relative),
            relative,
            pattern: Regex::new(pattern)?,
            template: template.into(),
            what: what.into(),
        })
    }

    /// `export const NAME = 'X.Y.Z';` in a source file
    pub fn source_constant(
        project_root: &Path,
        relative: impl Into<PathBuf>,
        name: &str,
    ) -> Result<Self> {
        let pattern = format!(r"export const {} = '[\d.]+';", regex::escape(name));
        let template = format!("export const {} = '{}';", name, VERSION_PLACEHOLDER);
        Self::new(
            project_root,
            relative,
            &pattern,
            template,
            format!("{} line", name),
        )
    }

    /// `**Current Version:** X.Y.Z` in a markdown disclaimer
    pub fn disclaimer(project_root: &Path, relative: impl Into<PathBuf>) -> Result<Self> {
        Self::new(
            project_root,
            relative,
            r"\*\*Current Version:\*\* [\d.]+",
            format!("**Current Version:** {}", VERSION_PLACEHOLDER),
            "version line",
        )
    }
}

impl Patcher for TextPattern {
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

        if !self.pattern.is_match(&content) {
            return Ok(StepOutcome::Skipped(StepWarning::PatternNotFound {
                path: self.relative.clone(),
                what: self.what.clone(),
            }));
        }

        let replacement = self
            .template
            .replace(VERSION_PLACEHOLDER, &version.to_string());
        let updated = self
            .pattern
            .replace_all(&content, NoExpand(&replacement));

        if updated == content {
            return Ok(StepOutcome::Unchanged);
        }

        write_file(&self.path, &updated, dry_run)?;
        Ok(StepOutcome::Applied(format!(
            "Updated {}: {}",
            self.relative.display(),
            version
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn read(dir: &TempDir, name: &str) -> String {
        fs::read_to_string(dir.path().join(name)).unwrap()
    }

    #[test]
    fn test_source_constant() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "config/guidelines.ts",
            "export const APP_VERSION = '1.2.3';\nexport const OTHER = 'x';\n",
        );
        let patcher =
            TextPattern::source_constant(dir.path(), "config/guidelines.ts", "APP_VERSION")
                .unwrap();

        let outcome = patcher.apply(&Version::new(1, 3, 0), false).unwrap();
        assert_eq!(
            outcome,
            StepOutcome::Applied("Updated config/guidelines.ts: 1.3.0".to_string())
        );
        assert_eq!(
            read(&dir, "config/guidelines.ts"),
            "export const APP_VERSION = '1.3.0';\nexport const OTHER = 'x';\n"
        );
    }

    #[test]
    fn test_source_constant_name_is_escaped() {
        let dir = TempDir::new().unwrap();
        write(&dir, "v.ts", "export const VERSION = '0.1.0';\n");
        // `.` in the name must not act as a wildcard
        let patcher = TextPattern::source_constant(dir.path(), "v.ts", "VER.ION").unwrap();

        let outcome = patcher.apply(&Version::new(0, 2, 0), false).unwrap();
        assert!(matches!(
            outcome,
            StepOutcome::Skipped(StepWarning::PatternNotFound { .. })
        ));
    }

    #[test]
    fn test_disclaimer_replaces_every_occurrence() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "MEDICAL_DISCLAIMER.md",
            "# Disclaimer\n\n**Current Version:** 1.2.3\n\nFooter **Current Version:** 1.2.3\n",
        );
        let patcher = TextPattern::disclaimer(dir.path(), "MEDICAL_DISCLAIMER.md").unwrap();

        assert!(patcher
            .apply(&Version::new(2, 0, 0), false)
            .unwrap()
            .is_applied());
        let content = read(&dir, "MEDICAL_DISCLAIMER.md");
        assert_eq!(content.matches("**Current Version:** 2.0.0").count(), 2);
        assert!(!content.contains("1.2.3"));
    }

    #[test]
    fn test_pattern_missing_is_skipped() {
        let dir = TempDir::new().unwrap();
        write(&dir, "MEDICAL_DISCLAIMER.md", "# Disclaimer\n");
        let patcher = TextPattern::disclaimer(dir.path(), "MEDICAL_DISCLAIMER.md").unwrap();

        let outcome = patcher.apply(&Version::new(2, 0, 0), false).unwrap();
        assert_eq!(
            outcome,
            StepOutcome::Skipped(StepWarning::PatternNotFound {
                path: PathBuf::from("MEDICAL_DISCLAIMER.md"),
                what: "version line".to_string(),
            })
        );
    }

    #[test]
    fn test_file_missing_is_skipped() {
        let dir = TempDir::new().unwrap();
        let patcher =
            TextPattern::source_constant(dir.path(), "config/guidelines.ts", "APP_VERSION")
                .unwrap();

        let outcome = patcher.apply(&Version::new(1, 0, 0), false).unwrap();
        assert!(matches!(
            outcome,
            StepOutcome::Skipped(StepWarning::FileMissing { .. })
        ));
    }

    #[test]
    fn test_apply_twice_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write(&dir, "D.md", "**Current Version:** 0.9.0\n");
        let patcher = TextPattern::disclaimer(dir.path(), "D.md").unwrap();
        let version = Version::new(0, 9, 1);

        assert!(patcher.apply(&version, false).unwrap().is_applied());
        assert_eq!(patcher.apply(&version, false).unwrap(), StepOutcome::Unchanged);
        assert_eq!(read(&dir, "D.md"), "**Current Version:** 0.9.1\n");
    }

    #[test]
    fn test_template_dollar_is_literal() {
        let dir = TempDir::new().unwrap();
        write(&dir, "price.txt", "cost v1.0.0\n");
        let patcher = TextPattern::new(
            dir.path(),
            "price.txt",
            r"v[\d.]+",
            "$1 v{version}",
            "price",
        )
        .unwrap();

        patcher.apply(&Version::new(1, 0, 1), false).unwrap();
        assert_eq!(read(&dir, "price.txt"), "cost $1 v1.0.1\n");
    }
}
