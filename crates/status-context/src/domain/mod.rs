//! Domain model for commit-status notifications.
//!
//! - `ResultCategory`: semantic build outcome used for filtering and messages
//! - `HeadKind`: what is being built (branch, PR head, PR merge)
//! - `BuildContext`: read-only per-invocation view supplied by the host
//! - `NotificationRequest`: one status to publish

pub mod build;
pub mod head;
pub mod request;
pub mod result;
pub mod state;

pub use build::BuildContext;
pub use head::HeadKind;
pub use request::NotificationRequest;
pub use result::{BuildOutcome, BuildProgress, ResultCategory};
pub use state::StatusState;
