//! Classification of what a build is building.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What kind of source reference a build was triggered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeadKind {
    /// A plain branch (or tag) build.
    Branch,
    /// The pull request's own source commit.
    PrHead,
    /// The synthetic merge of a pull request into its target.
    PrMerge,
}

impl HeadKind {
    /// Context suffix appended when type suffixes are enabled.
    pub fn suffix(&self) -> &'static str {
        match self {
            HeadKind::Branch => "/branch",
            HeadKind::PrHead => "/pr-head",
            HeadKind::PrMerge => "/pr-merge",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            HeadKind::Branch => "branch",
            HeadKind::PrHead => "pr-head",
            HeadKind::PrMerge => "pr-merge",
        }
    }
}

impl fmt::Display for HeadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeadKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "branch" => Ok(HeadKind::Branch),
            "pr-head" => Ok(HeadKind::PrHead),
            "pr-merge" => Ok(HeadKind::PrMerge),
            other => Err(format!(
                "unknown head kind '{other}' (expected branch, pr-head or pr-merge)"
            )),
        }
    }
}
