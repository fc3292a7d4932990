//! Build outcomes and the result categories they map onto.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Semantic result of a build, used for report filtering and message selection.
///
/// `Queued` and `Pending` only arise while no terminal result exists. `Other`
/// absorbs every terminal outcome without a dedicated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultCategory {
    Queued,
    Pending,
    Success,
    Unstable,
    Failure,
    Aborted,
    Other,
}

impl ResultCategory {
    /// Every category, in declaration order.
    pub const ALL: [ResultCategory; 7] = [
        ResultCategory::Queued,
        ResultCategory::Pending,
        ResultCategory::Success,
        ResultCategory::Unstable,
        ResultCategory::Failure,
        ResultCategory::Aborted,
        ResultCategory::Other,
    ];

    /// Whether the build has finished.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ResultCategory::Queued | ResultCategory::Pending)
    }

    /// Key naming this category's message in settings (`messageGood`, ...).
    pub fn message_key(&self) -> &'static str {
        match self {
            ResultCategory::Queued => "Queued",
            ResultCategory::Pending => "Pending",
            ResultCategory::Success => "Good",
            ResultCategory::Unstable => "Unstable",
            ResultCategory::Failure => "Failure",
            ResultCategory::Aborted => "Aborted",
            ResultCategory::Other => "Other",
        }
    }

    /// Built-in status description for this category.
    pub fn default_message(&self) -> &'static str {
        match self {
            ResultCategory::Queued => "This commit is scheduled to be built",
            ResultCategory::Pending => "This commit is being built",
            ResultCategory::Success => "This commit looks good",
            ResultCategory::Unstable => "This commit has test failures",
            ResultCategory::Failure => "This commit cannot be built",
            ResultCategory::Aborted => "The build of this commit was aborted",
            ResultCategory::Other => "Something is wrong with the build of this commit",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ResultCategory::Queued => "queued",
            ResultCategory::Pending => "pending",
            ResultCategory::Success => "success",
            ResultCategory::Unstable => "unstable",
            ResultCategory::Failure => "failure",
            ResultCategory::Aborted => "aborted",
            ResultCategory::Other => "other",
        }
    }
}

impl fmt::Display for ResultCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Terminal outcome as reported by the host's build system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildOutcome {
    Success,
    Unstable,
    Failure,
    NotBuilt,
    Aborted,
    /// Any outcome this crate does not know about yet.
    Unrecognized(String),
}

impl FromStr for BuildOutcome {
    type Err = std::convert::Infallible;

    /// Parse a host result name. Never fails: unknown names are kept as
    /// [`BuildOutcome::Unrecognized`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Ok(match normalized.as_str() {
            "SUCCESS" => BuildOutcome::Success,
            "UNSTABLE" => BuildOutcome::Unstable,
            "FAILURE" => BuildOutcome::Failure,
            "NOT_BUILT" => BuildOutcome::NotBuilt,
            "ABORTED" => BuildOutcome::Aborted,
            _ => BuildOutcome::Unrecognized(s.trim().to_string()),
        })
    }
}

/// Where a build is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildProgress {
    /// No run exists yet.
    Queued,
    /// A run exists but has no result.
    Running,
    Completed(BuildOutcome),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_categories() {
        assert!(!ResultCategory::Queued.is_terminal());
        assert!(!ResultCategory::Pending.is_terminal());
        for category in &ResultCategory::ALL[2..] {
            assert!(category.is_terminal(), "{category} should be terminal");
        }
    }

    #[test]
    fn test_success_message_key_is_good() {
        assert_eq!(ResultCategory::Success.message_key(), "Good");
        assert_eq!(ResultCategory::Other.message_key(), "Other");
    }

    #[test]
    fn test_default_messages_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for category in ResultCategory::ALL {
            assert!(seen.insert(category.default_message()));
        }
    }

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&ResultCategory::Aborted).expect("serialize");
        assert_eq!(json, "\"aborted\"");
        let parsed: ResultCategory = serde_json::from_str("\"other\"").expect("deserialize");
        assert_eq!(parsed, ResultCategory::Other);
    }

    #[test]
    fn test_parse_known_outcomes() {
        assert_eq!("SUCCESS".parse::<BuildOutcome>().unwrap(), BuildOutcome::Success);
        assert_eq!("unstable".parse::<BuildOutcome>().unwrap(), BuildOutcome::Unstable);
        assert_eq!("not-built".parse::<BuildOutcome>().unwrap(), BuildOutcome::NotBuilt);
        assert_eq!("NOT_BUILT".parse::<BuildOutcome>().unwrap(), BuildOutcome::NotBuilt);
        assert_eq!(" Aborted ".parse::<BuildOutcome>().unwrap(), BuildOutcome::Aborted);
    }

    #[test]
    fn test_parse_unknown_outcome_is_kept() {
        let outcome: BuildOutcome = "SKIPPED".parse().unwrap();
        assert_eq!(outcome, BuildOutcome::Unrecognized("SKIPPED".to_string()));
    }
}
