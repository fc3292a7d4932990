//! Output of a resolution: one commit status to publish.

use serde::{Deserialize, Serialize};

use super::state::StatusState;

/// A single status the host should send to the commit-status API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    /// Status-check identifier.
    pub context: String,

    pub target_url: String,

    /// Human-readable description.
    pub message: String,

    pub state: StatusState,

    /// Whether the host should swallow delivery errors for this status.
    pub ignore_error: bool,
}
