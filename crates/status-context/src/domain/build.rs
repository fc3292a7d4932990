//! Per-invocation view of the build being reported.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::head::HeadKind;
use super::result::ResultCategory;
use super::state::StatusState;

/// Read-only snapshot of a build, supplied by the host for one resolution.
///
/// The `default_*` values are copied verbatim into every produced request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildContext {
    /// Host identifier for the build; only used in log fields.
    pub build_id: String,

    pub head: HeadKind,

    /// `None` while the build is still running.
    pub result: Option<ResultCategory>,

    pub default_target_url: String,

    pub default_state: StatusState,

    pub default_ignore_error: bool,

    /// The host's single static status message, if it has one.
    pub default_message: Option<String>,

    /// Build variables visible to the macro expander.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

impl BuildContext {
    /// Create a context for a running build with pending defaults.
    pub fn new(build_id: impl Into<String>, head: HeadKind) -> Self {
        Self {
            build_id: build_id.into(),
            head,
            result: None,
            default_target_url: String::new(),
            default_state: StatusState::Pending,
            default_ignore_error: false,
            default_message: None,
            variables: BTreeMap::new(),
        }
    }

    pub fn with_result(mut self, result: ResultCategory) -> Self {
        self.result = Some(result);
        self
    }

    pub fn with_target_url(mut self, url: impl Into<String>) -> Self {
        self.default_target_url = url.into();
        self
    }

    pub fn with_state(mut self, state: StatusState) -> Self {
        self.default_state = state;
        self
    }

    pub fn with_ignore_error(mut self, ignore_error: bool) -> Self {
        self.default_ignore_error = ignore_error;
        self
    }

    pub fn with_default_message(mut self, message: impl Into<String>) -> Self {
        self.default_message = Some(message.into());
        self
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// The result category to report; a missing result counts as `Pending`.
    pub fn effective_result(&self) -> ResultCategory {
        self.result.unwrap_or(ResultCategory::Pending)
    }
}
