//! Commit categorization for changelog grouping.
//!
//! Classification and prefix stripping are both driven by [`RULES`], an
//! ordered table where the first matching rule wins. The ordering carries
//! known quirks that are kept as-is: `fixture: ...` is a bug fix, and
//! `feat!: ...` is a feature because the feature rule runs first.

use std::fmt;

/// Changelog section a commit is filed under.
///
/// Declaration order is the order sections appear in a changelog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    BreakingChanges,
    Features,
    BugFixes,
    Documentation,
    Tests,
    Refactoring,
    Chore,
    Other,
}

impl Category {
    /// All categories in changelog priority order
    pub const ALL: [Category; 8] = [
        Category::BreakingChanges,
        Category::Features,
        Category::BugFixes,
        Category::Documentation,
        Category::Tests,
        Category::Refactoring,
        Category::Chore,
        Category::Other,
    ];

    /// Section heading used in the changelog
    pub fn title(&self) -> &'static str {
        match self {
            Category::BreakingChanges => "Breaking Changes",
            Category::Features => "Features",
            Category::BugFixes => "Bug Fixes",
            Category::Documentation => "Documentation",
            Category::Tests => "Tests",
            Category::Refactoring => "Refactoring",
            Category::Chore => "Chore",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One row of the categorization table.
#[derive(Debug)]
pub struct CategoryRule {
    pub category: Category,
    /// Lower-case prefixes that select this category
    pub prefixes: &'static [&'static str],
    /// Also match when a `!` appears before the first colon
    pub bang_marker: bool,
    /// Conventional-commit tokens removed from the message when rendering
    pub strip_tokens: &'static [&'static str],
}

impl CategoryRule {
    fn matches(&self, message: &str, lowered: &str) -> bool {
        self.prefixes.iter().any(|p| lowered.starts_with(p))
            || (self.bang_marker && has_bang_before_colon(message))
    }
}

pub const RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Features,
        prefixes: &["feat", "feature"],
        bang_marker: false,
        strip_tokens: &["feat:", "feature:"],
    },
    CategoryRule {
        category: Category::BugFixes,
        prefixes: &["fix", "bugfix"],
        bang_marker: false,
        strip_tokens: &["fix:", "bugfix:"],
    },
    CategoryRule {
        category: Category::BreakingChanges,
        prefixes: &["break"],
        bang_marker: true,
        strip_tokens: &[],
    },
    CategoryRule {
        category: Category::Documentation,
        prefixes: &["docs", "doc"],
        bang_marker: false,
        strip_tokens: &["docs:", "doc:"],
    },
    CategoryRule {
        category: Category::Refactoring,
        prefixes: &["refactor"],
        bang_marker: false,
        strip_tokens: &["refactor:"],
    },
    CategoryRule {
        category: Category::Tests,
        prefixes: &["test", "spec"],
        bang_marker: false,
        strip_tokens: &["test:", "spec:"],
    },
    CategoryRule {
        category: Category::Chore,
        prefixes: &["chore", "build"],
        bang_marker: false,
        strip_tokens: &["chore:", "build:"],
    },
];

// Whole message counts as the type part when there is no colon.
fn has_bang_before_colon(message: &str) -> bool {
    let head = message.split(':').next().unwrap_or(message);
    head.contains('!')
}

/// Assign a commit message to its changelog category
pub fn categorize(message: &str) -> Category {
    let lowered = message.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(message, &lowered))
        .map(|rule| rule.category)
        .unwrap_or(Category::Other)
}

/// Remove a leading conventional-commit token (`feat:`, `docs:`, ...).
///
/// Matching is case-insensitive; the remainder is trimmed. Messages without a
/// known token are returned unchanged.
pub fn strip_prefix(message: &str) -> &str {
    for token in RULES.iter().flat_map(|rule| rule.strip_tokens.iter()) {
        if let Some(head) = message.get(..token.len()) {
            if head.eq_ignore_ascii_case(token) {
                return message[token.len()..].trim();
            }
        }
    }
    message
}
