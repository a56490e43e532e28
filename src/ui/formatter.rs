//! Formatting functions for UI output.
//!
//! Status lines go to stdout; warnings and errors go to stderr.

use std::path::Path;

use console::style;

use crate::domain::{Version, VersionBump};
use crate::history::HistorySource;
use crate::report::{RunReport, Step, StepOutcome, StepReport};
use crate::warning::StepWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a non-fatal step warning.
pub fn display_warning(warning: &StepWarning) {
    eprintln!("{} {}", style("⚠").yellow(), warning);
}

/// Display the run banner.
pub fn display_header(project_root: &Path, increment: VersionBump, dry_run: bool) {
    println!("\n{}", style("Updating project version...").bold());
    println!("   Project:   {}", project_root.display());
    println!("   Increment: {}", increment);
    if dry_run {
        println!("   {}", style("Dry run: no files will be written").yellow());
    }
    println!();
}

/// Display the version transition.
pub fn display_versions(previous: &Version, next: &Version) {
    println!("Current version: {}", style(previous).red());
    println!("New version:     {}\n", style(next).green());
}

/// Display where changelog commits came from.
pub fn display_history(source: &HistorySource, commit_count: usize) {
    match source {
        HistorySource::Unavailable(_) => {}
        HistorySource::SinceTag(tag) if commit_count > 0 => {
            display_status(&format!("Found {} commits since {}", commit_count, tag));
        }
        HistorySource::Recent(_) if commit_count > 0 => {
            display_status(&format!(
                "Found {} recent commits (no previous release tag)",
                commit_count
            ));
        }
        _ => {}
    }
}

/// Display the outcome of one step.
pub fn display_step(report: &StepReport) {
    match &report.outcome {
        StepOutcome::Applied(detail) => display_success(detail),
        StepOutcome::Unchanged => display_status(&format!(
            "{} already up to date",
            report.target.display()
        )),
        StepOutcome::Skipped(warning) => display_warning(warning),
        StepOutcome::Failed(reason) => display_error(&format!(
            "Failed to update {}: {}",
            report.target.display(),
            reason
        )),
    }
}

/// Display every step and the closing summary.
pub fn display_report(report: &RunReport) {
    display_versions(&report.previous, &report.next);

    for step in &report.steps {
        if step.step == Step::Changelog {
            display_history(&report.history, report.commit_count);
        }
        display_step(step);
    }

    let verb = if report.dry_run {
        "would be updated"
    } else {
        "updated"
    };
    if report.is_complete() {
        println!(
            "\n{} Version {} to {}",
            style("✓").green(),
            verb,
            style(report.next).bold()
        );
    } else {
        let skipped = report.warnings().count() + report.failures().count();
        println!(
            "\n{} Version {} to {} ({} of {} steps did not apply)",
            style("✓").green(),
            verb,
            style(report.next).bold(),
            skipped,
            report.steps.len()
        );
    }
}

/// Display the git commands to stage and commit the release.
pub fn display_next_steps(lines: &[String]) {
    println!("\nNext steps:");
    for line in lines {
        println!("   {}", style(line).cyan());
    }
}
