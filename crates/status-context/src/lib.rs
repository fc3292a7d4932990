//! status-context - commit-status contexts and messages for CI builds
//!
//! Given a label template and a build's head kind and result, decides which
//! status contexts to publish and with what message:
//! - Splits a template into several labels on a delimiter
//! - Expands token macros through an injected [`MacroExpander`]
//! - Appends `/branch`, `/pr-head` or `/pr-merge` suffixes
//! - Filters reporting per result and picks per-result messages
//!
//! The host performs the actual API call with the returned
//! [`NotificationRequest`]s.

pub mod assembler;
pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod expand;
pub mod filter;
pub mod label;
pub mod message;
pub mod telemetry;

pub use assembler::{resolve_notifications, NotificationStrategy};
pub use classify::{classify_head, classify_result};
pub use config::{
    load_config, load_settings, MessageMode, NotificationConfig, NotificationConfigBuilder,
    NotificationSettings,
};
pub use diagnostics::{Diagnostic, DiagnosticLevel, DiagnosticSink, MemorySink, TracingSink};
pub use domain::{
    BuildContext, BuildOutcome, BuildProgress, HeadKind, NotificationRequest, ResultCategory,
    StatusState,
};
pub use error::{ConfigError, ExpansionError};
pub use expand::{IdentityExpander, MacroExpander, TokenMacroExpander};
pub use filter::should_report;
pub use label::{apply_suffix, split_labels, LabelExpander};
pub use message::resolve_message;
pub use telemetry::init_tracing;
