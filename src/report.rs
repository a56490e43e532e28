//! Per-step outcomes of a version update run.
//!
//! File updates are not transactional: each step succeeds or is skipped on its
//! own. The workflow returns every outcome in a [RunReport] so callers can
//! decide whether a partial update is acceptable.

use std::fmt;
use std::path::PathBuf;

use crate::domain::Version;
use crate::history::HistorySource;
use crate::warning::StepWarning;

/// The fixed steps of a run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    PackageManifest,
    SourceConstant,
    AppManifest,
    ReadmeBadge,
    Disclaimer,
    Changelog,
    Publish,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::PackageManifest => "package manifest",
            Step::SourceConstant => "source constant",
            Step::AppManifest => "app manifest",
            Step::ReadmeBadge => "README badge",
            Step::Disclaimer => "disclaimer",
            Step::Changelog => "changelog",
            Step::Publish => "publish copy",
        };
        f.write_str(name)
    }
}

/// What happened to one target
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The target was written (or would be, in a dry run)
    Applied(String),
    /// The target already carried the new version
    Unchanged,
    /// The step could not run; nothing was written
    Skipped(StepWarning),
    /// An unexpected error interrupted the step
    Failed(String),
}

impl StepOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, StepOutcome::Applied(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub step: Step,
    /// Target path relative to the project root
    pub target: PathBuf,
    pub outcome: StepOutcome,
}

impl StepReport {
    pub fn new(step: Step, target: impl Into<PathBuf>, outcome: StepOutcome) -> Self {
        StepReport {
            step,
            target: target.into(),
            outcome,
        }
    }
}

/// Result of a whole run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub previous: Version,
    pub next: Version,
    pub dry_run: bool,
    pub history: HistorySource,
    pub commit_count: usize,
    pub steps: Vec<StepReport>,
}

impl RunReport {
    /// First report for `step`
    pub fn step(&self, step: Step) -> Option<&StepReport> {
        self.steps.iter().find(|report| report.step == step)
    }

    pub fn applied(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|report| report.outcome.is_applied())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &StepWarning> {
        self.steps.iter().filter_map(|report| match &report.outcome {
            StepOutcome::Skipped(warning) => Some(warning),
            _ => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepReport> {
        self.steps
            .iter()
            .filter(|report| matches!(report.outcome, StepOutcome::Failed(_)))
    }

    /// True when no step was skipped or failed
    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(|report| {
            matches!(
                report.outcome,
                StepOutcome::Applied(_) | StepOutcome::Unchanged
            )
        })
    }
}
