//! Status message selection.

use std::collections::BTreeMap;

use crate::config::MessageMode;
use crate::domain::ResultCategory;

/// Pick the status message for a result category.
///
/// A non-blank override always wins. Otherwise `PerCategory` uses the
/// built-in text and `HostDefault` uses `host_default` when it is non-blank.
pub fn resolve_message(
    category: ResultCategory,
    overrides: &BTreeMap<ResultCategory, String>,
    mode: MessageMode,
    host_default: Option<&str>,
) -> String {
    if let Some(text) = overrides.get(&category).filter(|t| !t.trim().is_empty()) {
        return text.clone();
    }

    match (mode, host_default) {
        (MessageMode::HostDefault, Some(text)) if !text.trim().is_empty() => text.to_string(),
        _ => category.default_message().to_string(),
    }
}
