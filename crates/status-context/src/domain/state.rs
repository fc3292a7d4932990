//! Commit-status states understood by the hosting API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::result::ResultCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Pending,
    Success,
    Failure,
    Error,
}

impl StatusState {
    /// Conventional state for a result category.
    ///
    /// Hosts normally supply their own default state; this is what the CLI
    /// uses when none is given.
    pub fn for_category(category: ResultCategory) -> Self {
        match category {
            ResultCategory::Queued | ResultCategory::Pending => StatusState::Pending,
            ResultCategory::Success => StatusState::Success,
            ResultCategory::Unstable | ResultCategory::Failure => StatusState::Failure,
            ResultCategory::Aborted | ResultCategory::Other => StatusState::Error,
        }
    }
}

impl fmt::Display for StatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatusState::Pending => "pending",
            StatusState::Success => "success",
            StatusState::Failure => "failure",
            StatusState::Error => "error",
        };
        f.write_str(s)
    }
}

impl FromStr for StatusState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(StatusState::Pending),
            "success" => Ok(StatusState::Success),
            "failure" => Ok(StatusState::Failure),
            "error" => Ok(StatusState::Error),
            other => Err(format!("unknown status state '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_for_category() {
        assert_eq!(StatusState::for_category(ResultCategory::Queued), StatusState::Pending);
        assert_eq!(StatusState::for_category(ResultCategory::Pending), StatusState::Pending);
        assert_eq!(StatusState::for_category(ResultCategory::Success), StatusState::Success);
        assert_eq!(StatusState::for_category(ResultCategory::Unstable), StatusState::Failure);
        assert_eq!(StatusState::for_category(ResultCategory::Failure), StatusState::Failure);
        assert_eq!(StatusState::for_category(ResultCategory::Aborted), StatusState::Error);
        assert_eq!(StatusState::for_category(ResultCategory::Other), StatusState::Error);
    }

    #[test]
    fn test_state_serde_is_lowercase() {
        let json = serde_json::to_string(&StatusState::Failure).expect("serialize");
        assert_eq!(json, "\"failure\"");
    }
}
