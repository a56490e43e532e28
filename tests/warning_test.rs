use std::path::PathBuf;

use update_version::report::{Step, StepOutcome, StepReport};
use update_version::ui;
use update_version::warning::StepWarning;

// ============================================================================
// StepWarning Display Tests
// ============================================================================

#[test]
fn test_file_missing_display() {
    let warning = StepWarning::FileMissing {
        path: PathBuf::from("public/manifest.json"),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("public/manifest.json"),
        "Message should name the file, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("not found"),
        "Message should say the file was not found, got: {}",
        display_msg
    );
}

#[test]
fn test_pattern_not_found_display() {
    let warning = StepWarning::PatternNotFound {
        path: PathBuf::from("config/guidelines.ts"),
        what: "APP_VERSION line".to_string(),
    };

    assert_eq!(
        warning.to_string(),
        "No APP_VERSION line found in config/guidelines.ts"
    );
}

#[test]
fn test_no_badge_anchor_display() {
    let warning = StepWarning::NoBadgeAnchor {
        path: PathBuf::from("README.md"),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("version badge"),
        "Message should mention the badge, got: {}",
        display_msg
    );
    assert!(display_msg.contains("README.md"));
}

#[test]
fn test_unparsable_display() {
    let warning = StepWarning::Unparsable {
        path: PathBuf::from("public/manifest.json"),
        reason: "expected value at line 1 column 1".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("public/manifest.json"));
    assert!(display_msg.contains("expected value"));
}

#[test]
fn test_changelog_entry_exists_display() {
    let warning = StepWarning::ChangelogEntryExists {
        version: "1.3.0".to_string(),
    };

    assert_eq!(
        warning.to_string(),
        "Version 1.3.0 already exists in the changelog"
    );
}

#[test]
fn test_history_warnings_mention_changelog() {
    let unavailable = StepWarning::HistoryUnavailable {
        reason: "not a git repository".to_string(),
    };
    assert!(unavailable.to_string().contains("not a git repository"));
    assert!(unavailable.to_string().contains("skipping changelog"));
    assert!(StepWarning::NoCommits
        .to_string()
        .contains("skipping changelog"));
}

// ============================================================================
// UI display smoke tests
// ============================================================================

#[test]
fn test_display_warning_does_not_panic() {
    ui::display_warning(&StepWarning::NoCommits);
}

#[test]
fn test_display_step_for_every_outcome() {
    let outcomes = vec![
        StepOutcome::Applied("Updated package.json: 1.0.0 → 1.0.1".to_string()),
        StepOutcome::Unchanged,
        StepOutcome::Skipped(StepWarning::FileMissing {
            path: PathBuf::from("README.md"),
        }),
        StepOutcome::Failed("permission denied".to_string()),
    ];

    for outcome in outcomes {
        ui::display_step(&StepReport::new(Step::ReadmeBadge, "README.md", outcome));
    }
}
