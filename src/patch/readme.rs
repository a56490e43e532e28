use std::path::{Path, PathBuf};

use regex::{NoExpand, Regex};

use crate::domain::Version;
use crate::error::Result;
use crate::patch::{read_existing, write_file, Patcher};
use crate::report::StepOutcome;
use crate::warning::StepWarning;

const BADGE_PATTERN: &str = r"\[!\[Version: [\d.]+\]\(https://img\.shields\.io/badge/Version-[\d.]+-blue\.svg\)\]\(CHANGELOG\.md\)";

const LICENSE_BADGE_PATTERN: &str = r"\[!\[License: [^\]]+\]\([^\)]+\)\]\([^\)]+\)\r?\n";

/// Markdown for the version badge linking to the changelog
pub fn version_badge(version: &Version) -> String {
    format!(
        "[![Version: {v}](https://img.shields.io/badge/Version-{v}-blue.svg)](CHANGELOG.md)",
        v = version
    )
}

/// Keeps the README version badge in step with the release.
///
/// An existing badge is rewritten in place. Without one, a new badge line is
/// inserted right after the License badge line; with neither, the step is
/// skipped.
#[derive(Debug, Clone)]
pub struct ReadmeBadge {
    path: PathBuf,
    relative: PathBuf,
}

impl ReadmeBadge {
    pub fn new(project_root: &Path, relative: impl Into<PathBuf>) -> Self {
        let relative = relative.into();
        ReadmeBadge {
            path: project_root.join(&relative),
            relative,
        }
    }
}

impl Patcher for ReadmeBadge {
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

        let badge = version_badge(version);

        let badge_re = Regex::new(BADGE_PATTERN)?;
        if badge_re.is_match(&content) {
            let updated = badge_re.replace_all(&content, NoExpand(&badge));
            if updated == content {
                return Ok(StepOutcome::Unchanged);
            }
            write_file(&self.path, &updated, dry_run)?;
            return Ok(StepOutcome::Applied(format!(
                "Updated {} badge: {}",
                self.relative.display(),
                version
            )));
        }

        let license_re = Regex::new(LICENSE_BADGE_PATTERN)?;
        let anchor = match license_re.find(&content) {
            Some(anchor) => anchor,
            None => {
                return Ok(StepOutcome::Skipped(StepWarning::NoBadgeAnchor {
                    path: self.relative.clone(),
                }))
            }
        };

        let line_ending = if anchor.as_str().ends_with("\r\n") {
            "\r\n"
        } else {
            "\n"
        };
        let position = anchor.end();
        let mut updated = String::with_capacity(content.len() + badge.len() + 2);
        updated.push_str(&content[..position]);
        updated.push_str(&badge);
        updated.push_str(line_ending);
        updated.push_str(&content[position..]);

        write_file(&self.path, &updated, dry_run)?;
        Ok(StepOutcome::Applied(format!(
            "Added version badge to {}: {}",
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

    const LICENSE: &str =
        "[![License: MIT](https://img.shields.io/badge/License-MIT-yellow.svg)](LICENSE)";

    fn readme(content: &str) -> (TempDir, ReadmeBadge) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), content).unwrap();
        let patcher = ReadmeBadge::new(dir.path(), "README.md");
        (dir, patcher)
    }

    fn read(dir: &TempDir) -> String {
        fs::read_to_string(dir.path().join("README.md")).unwrap()
    }

    #[test]
    fn test_replaces_existing_badge() {
        let (dir, patcher) = readme(&format!(
            "# App\n\n{}\n",
            version_badge(&Version::new(1, 2, 3))
        ));

        let outcome = patcher.apply(&Version::new(1, 3, 0), false).unwrap();
        assert_eq!(
            outcome,
            StepOutcome::Applied("Updated README.md badge: 1.3.0".to_string())
        );

        let content = read(&dir);
        assert!(content.contains("Version-1.3.0-blue"));
        assert!(content.contains("[![Version: 1.3.0]"));
        assert!(!content.contains("Version-1.2.3-blue"));
    }

    #[test]
    fn test_inserts_after_license_badge() {
        let (dir, patcher) = readme(&format!("# App\n\n{}\nSome text\n", LICENSE));

        let outcome = patcher.apply(&Version::new(0, 2, 0), false).unwrap();
        assert!(matches!(outcome, StepOutcome::Applied(ref d) if d.starts_with("Added version badge")));

        assert_eq!(
            read(&dir),
            format!(
                "# App\n\n{}\n{}\nSome text\n",
                LICENSE,
                version_badge(&Version::new(0, 2, 0))
            )
        );
    }

    #[test]
    fn test_insert_keeps_crlf_line_endings() {
        let (dir, patcher) = readme(&format!("{}\r\nText\r\n", LICENSE));

        patcher.apply(&Version::new(1, 0, 0), false).unwrap();
        assert_eq!(
            read(&dir),
            format!(
                "{}\r\n{}\r\nText\r\n",
                LICENSE,
                version_badge(&Version::new(1, 0, 0))
            )
        );
    }

    #[test]
    fn test_insert_then_update_is_stable() {
        let (dir, patcher) = readme(&format!("{}\n", LICENSE));
        let version = Version::new(3, 1, 4);

        assert!(patcher.apply(&version, false).unwrap().is_applied());
        let first = read(&dir);
        assert_eq!(patcher.apply(&version, false).unwrap(), StepOutcome::Unchanged);
        assert_eq!(read(&dir), first);
    }

    #[test]
    fn test_no_anchor_is_skipped() {
        let (dir, patcher) = readme("# App\n\nNo badges here.\n");

        let outcome = patcher.apply(&Version::new(1, 0, 0), false).unwrap();
        assert_eq!(
            outcome,
            StepOutcome::Skipped(StepWarning::NoBadgeAnchor {
                path: PathBuf::from("README.md")
            })
        );
        assert_eq!(read(&dir), "# App\n\nNo badges here.\n");
    }

    #[test]
    fn test_license_badge_without_newline_is_not_an_anchor() {
        let (_dir, patcher) = readme(LICENSE);

        let outcome = patcher.apply(&Version::new(1, 0, 0), false).unwrap();
        assert!(matches!(
            outcome,
            StepOutcome::Skipped(StepWarning::NoBadgeAnchor { .. })
        ));
    }
}
