//! Label handling: splitting, macro expansion and type suffixes.

use crate::diagnostics::DiagnosticSink;
use crate::domain::{BuildContext, HeadKind};
use crate::expand::MacroExpander;

/// Split a label template into individual labels.
///
/// Without splitting (or with a blank delimiter) the template is returned
/// as-is, untrimmed. Otherwise pieces are trimmed and blank pieces dropped,
/// preserving order.
pub fn split_labels(template: &str, split: bool, delimiter: &str) -> Vec<String> {
    if !split || delimiter.trim().is_empty() {
        return vec![template.to_string()];
    }

    template
        .split(delimiter)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Append the head-kind suffix when enabled.
pub fn apply_suffix(label: &str, head: HeadKind, enabled: bool) -> String {
    if enabled {
        format!("{}{}", label, head.suffix())
    } else {
        label.to_string()
    }
}

/// Expands macro tokens in labels, degrading to the raw label on failure.
pub struct LabelExpander<'a> {
    expander: &'a dyn MacroExpander,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> LabelExpander<'a> {
    pub fn new(expander: &'a dyn MacroExpander, sink: &'a dyn DiagnosticSink) -> Self {
        Self { expander, sink }
    }

    /// Expand `label` for `build`.
    ///
    /// A changed label is recorded as an info diagnostic. An expansion error
    /// is recorded as an error diagnostic and the original label is returned.
    pub fn expand(&self, label: &str, build: &BuildContext) -> String {
        match self.expander.expand(label, build) {
            Ok(expanded) => {
                if expanded != label {
                    self.sink.info(&format!(
                        "Expanded token macro from '{}' to '{}'",
                        label, expanded
                    ));
                }
                expanded
            }
            Err(e) => {
                self.sink.error(&format!(
                    "Unable to expand notification context macro '{}': {}",
                    label, e
                ));
                label.to_string()
            }
        }
    }
}
