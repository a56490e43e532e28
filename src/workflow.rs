//! Version update workflow
//!
//! Runs the fixed release sequence: read the current version, compute the
//! next one, patch every version-bearing file, write the changelog entry, and
//! copy the published documents. Only a missing or malformed current version
//! stops the run; every later step reports its own outcome.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::changelog::{self, Changelog};
use crate::config::Config;
use crate::domain::{Version, VersionBump};
use crate::error::Result;
use crate::history::{collect_commits, CommitHistory, CommitLog, HistorySource};
use crate::patch::{read_manifest_version, JsonVersionField, Patcher, ReadmeBadge, TextPattern};
use crate::publish;
use crate::report::{RunReport, Step, StepOutcome, StepReport};
use crate::warning::StepWarning;

/// Arguments for the update workflow
///
/// Mirrors the CLI arguments without depending on clap, so the workflow can
/// be driven programmatically.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    /// Segment to increment
    pub increment: VersionBump,

    /// Directory all configured paths are relative to
    pub project_root: PathBuf,

    /// Use this instead of the package manifest's version
    pub current_version: Option<Version>,

    /// Compute every step but write nothing
    pub dry_run: bool,
}

impl WorkflowArgs {
    pub fn new(increment: VersionBump, project_root: impl Into<PathBuf>) -> Self {
        WorkflowArgs {
            increment,
            project_root: project_root.into(),
            current_version: None,
            dry_run: false,
        }
    }
}

/// Build the patchers for the version-bearing files, in execution order.
pub fn build_patchers(
    project_root: &Path,
    config: &Config,
) -> Result<Vec<(Step, Box<dyn Patcher>)>> {
    let files = &config.files;
    let mut patchers: Vec<(Step, Box<dyn Patcher>)> = Vec::with_capacity(5);

    patchers.push((
        Step::PackageManifest,
        Box::new(JsonVersionField::new(project_root, &files.package_manifest)),
    ));
    patchers.push((
        Step::SourceConstant,
        Box::new(TextPattern::source_constant(
            project_root,
            &files.source_constant,
            &config.source_constant.name,
        )?),
    ));
    patchers.push((
        Step::AppManifest,
        Box::new(JsonVersionField::new(project_root, &files.app_manifest)),
    ));
    patchers.push((
        Step::ReadmeBadge,
        Box::new(ReadmeBadge::new(project_root, &files.readme)),
    ));
    patchers.push((
        Step::Disclaimer,
        Box::new(TextPattern::disclaimer(project_root, &files.disclaimer)?),
    ));

    Ok(patchers)
}

fn run_patcher(step: Step, patcher: &dyn Patcher, version: &Version, dry_run: bool) -> StepReport {
    let outcome = match patcher.apply(version, dry_run) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("{} update failed: {}", step, e);
            StepOutcome::Failed(e.to_string())
        }
    };
    StepReport::new(step, patcher.target(), outcome)
}

fn changelog_step(
    project_root: &Path,
    config: &Config,
    version: &Version,
    log: &CommitLog,
    today: NaiveDate,
    dry_run: bool,
) -> StepReport {
    let changelog = Changelog::new(project_root, &config.files.changelog);

    let outcome = if log.commits.is_empty() {
        match &log.source {
            HistorySource::Unavailable(reason) => {
                StepOutcome::Skipped(StepWarning::HistoryUnavailable {
                    reason: reason.clone(),
                })
            }
            _ => StepOutcome::Skipped(StepWarning::NoCommits),
        }
    } else {
        let entry = changelog::render_entry(version, today, &log.commits);
        changelog
            .insert(version, &entry, dry_run)
            .unwrap_or_else(|e| {
                tracing::warn!("changelog update failed: {}", e);
                StepOutcome::Failed(e.to_string())
            })
    };

    StepReport::new(Step::Changelog, changelog.target(), outcome)
}

/// Main version update workflow
///
/// # Arguments
///
/// * `args` - Increment, project root, optional version override, dry-run flag
/// * `config` - Target paths and history settings
/// * `history` - Commit source for the changelog entry
/// * `today` - Date stamped on the changelog entry
///
/// # Returns
///
/// A report with one entry per step, or an error if the current version
/// cannot be determined or incremented.
pub fn run_update_workflow<H: CommitHistory + ?Sized>(
    args: &WorkflowArgs,
    config: &Config,
    history: &H,
    today: NaiveDate,
) -> Result<RunReport> {
    let root = args.project_root.as_path();

    let previous = match args.current_version {
        Some(version) => version,
        None => read_manifest_version(&root.join(&config.files.package_manifest))?,
    };
    let next = previous.bump(args.increment)?;
    tracing::debug!("bumping {} -> {} ({})", previous, next, args.increment);

    let mut steps: Vec<StepReport> = build_patchers(root, config)?
        .into_iter()
        .map(|(step, patcher)| run_patcher(step, patcher.as_ref(), &next, args.dry_run))
        .collect();

    let tag = format!("{}{}", config.history.tag_prefix, previous);
    let log = collect_commits(history, &tag, config.history.fallback_commit_count);
    tracing::debug!("{} commits ({})", log.commits.len(), log.source);

    steps.push(changelog_step(
        root,
        config,
        &next,
        &log,
        today,
        args.dry_run,
    ));
    steps.extend(publish::publish_files(root, &config.publish, args.dry_run));

    Ok(RunReport {
        previous,
        next,
        dry_run: args.dry_run,
        history: log.source,
        commit_count: log.commits.len(),
        steps,
    })
}
