//! Copies released documents into the distribution directory.

use std::fs::{self, FileTimes, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::config::PublishConfig;
use crate::error::Result;
use crate::report::{Step, StepOutcome, StepReport};
use crate::warning::StepWarning;

/// Copy `src` to `dst`, keeping permissions and access/modification times.
pub fn copy_with_metadata(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst)?;

    let metadata = fs::metadata(src)?;
    let times = FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);

    match OpenOptions::new().write(true).open(dst) {
        Ok(file) => file.set_times(times)?,
        // read-only copies keep the copy time
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            tracing::debug!("cannot set times on read-only {}", dst.display());
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Copy each configured file into the publish directory.
///
/// Returns no reports at all when the publish directory does not exist.
pub fn publish_files(project_root: &Path, config: &PublishConfig, dry_run: bool) -> Vec<StepReport> {
    let publish_dir = project_root.join(&config.dir);
    if !publish_dir.is_dir() {
        tracing::debug!(
            "publish directory {} not present, nothing to copy",
            publish_dir.display()
        );
        return Vec::new();
    }

    config
        .files
        .iter()
        .map(|relative| {
            let outcome = publish_one(project_root, &config.dir, relative, dry_run)
                .unwrap_or_else(|e| StepOutcome::Failed(e.to_string()));
            StepReport::new(Step::Publish, relative.clone(), outcome)
        })
        .collect()
}

fn publish_one(
    project_root: &Path,
    dir: &Path,
    relative: &Path,
    dry_run: bool,
) -> Result<StepOutcome> {
    let src = project_root.join(relative);
    if !src.is_file() {
        return Ok(StepOutcome::Skipped(StepWarning::FileMissing {
            path: relative.to_path_buf(),
        }));
    }

    let file_name = match relative.file_name() {
        Some(name) => PathBuf::from(name),
        None => {
            return Ok(StepOutcome::Skipped(StepWarning::FileMissing {
                path: relative.to_path_buf(),
            }))
        }
    };
    let dst = project_root.join(dir).join(&file_name);

    if !dry_run {
        copy_with_metadata(&src, &dst)?;
    }

    Ok(StepOutcome::Applied(format!(
        "Copied {} to {}/",
        file_name.display(),
        dir.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn config() -> PublishConfig {
        PublishConfig::default()
    }

    #[test]
    fn test_no_publish_dir_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("CHANGELOG.md"), "x").unwrap();

        assert!(publish_files(dir.path(), &config(), false).is_empty());
    }

    #[test]
    fn test_copies_existing_files_and_skips_missing() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("public")).unwrap();
        fs::write(dir.path().join("CHANGELOG.md"), "# Changelog\n").unwrap();

        let reports = publish_files(dir.path(), &config(), false);
        assert_eq!(reports.len(), 2);
        assert!(matches!(
            reports[0].outcome,
            StepOutcome::Skipped(StepWarning::FileMissing { .. })
        ));
        assert_eq!(
            reports[1].outcome,
            StepOutcome::Applied("Copied CHANGELOG.md to public/".to_string())
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("public/CHANGELOG.md")).unwrap(),
            "# Changelog\n"
        );
    }

    #[test]
    fn test_copy_preserves_modification_time() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src.md");
        let dst = dir.path().join("dst.md");
        fs::write(&src, "content").unwrap();

        let past = SystemTime::now() - Duration::from_secs(86_400);
        let file = OpenOptions::new().write(true).open(&src).unwrap();
        file.set_times(FileTimes::new().set_modified(past).set_accessed(past))
            .unwrap();
        drop(file);

        copy_with_metadata(&src, &dst).unwrap();

        let src_modified = fs::metadata(&src).unwrap().modified().unwrap();
        let dst_modified = fs::metadata(&dst).unwrap().modified().unwrap();
        assert_eq!(src_modified, dst_modified);
    }

    #[test]
    fn test_dry_run_does_not_copy() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("public")).unwrap();
        fs::write(dir.path().join("MEDICAL_DISCLAIMER.md"), "d").unwrap();

        let reports = publish_files(dir.path(), &config(), true);
        assert!(reports[0].outcome.is_applied());
        assert!(!dir.path().join("public/MEDICAL_DISCLAIMER.md").exists());
    }
}
