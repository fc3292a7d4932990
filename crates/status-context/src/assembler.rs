//! Assembles the notification requests for one build-state change.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::NotificationConfig;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::domain::{BuildContext, NotificationRequest};
use crate::expand::{IdentityExpander, MacroExpander};
use crate::filter::should_report;
use crate::label::{apply_suffix, split_labels, LabelExpander};
use crate::message::resolve_message;

/// Resolve the statuses to publish for `build` under `config`.
///
/// Returns an empty list when the build's result is filtered out or no
/// label survives splitting. Otherwise there is one request per non-blank
/// label, in template order. Never fails: expansion errors fall back to the
/// raw label and are reported through `sink`.
pub fn resolve_notifications(
    config: &NotificationConfig,
    build: &BuildContext,
    expander: &dyn MacroExpander,
    sink: &dyn DiagnosticSink,
) -> Vec<NotificationRequest> {
    let span = tracing::debug_span!("status_context.resolve", build_id = %build.build_id);
    let _guard = span.enter();

    let category = build.effective_result();
    if !should_report(category, config.report_filters()) {
        info!(
            event = "notification.suppressed",
            build_id = %build.build_id,
            result = %category,
        );
        return Vec::new();
    }

    let labels = split_labels(
        config.label_template(),
        config.split_into_multiple(),
        config.delimiter(),
    );
    if labels.is_empty() {
        debug!(event = "notification.no_labels", build_id = %build.build_id);
        return Vec::new();
    }

    let message = resolve_message(
        category,
        config.message_overrides(),
        config.message_mode(),
        build.default_message.as_deref(),
    );
    let label_expander = LabelExpander::new(expander, sink);

    let requests: Vec<NotificationRequest> = labels
        .iter()
        .map(|label| label_expander.expand(label, build))
        .filter(|label| !label.trim().is_empty())
        .map(|label| NotificationRequest {
            context: apply_suffix(&label, build.head, config.type_suffix()),
            target_url: build.default_target_url.clone(),
            message: message.clone(),
            state: build.default_state,
            ignore_error: build.default_ignore_error,
        })
        .collect();

    info!(
        event = "notification.resolved",
        build_id = %build.build_id,
        result = %category,
        head = %build.head,
        count = requests.len(),
    );
    requests
}

/// A configured notification strategy a host can hold on to.
///
/// Equality and hashing follow the config only, so two strategies built
/// from equal configs are interchangeable.
#[derive(Clone)]
pub struct NotificationStrategy {
    config: Arc<NotificationConfig>,
    expander: Arc<dyn MacroExpander>,
    sink: Arc<dyn DiagnosticSink>,
}

impl NotificationStrategy {
    /// A strategy with no macro expansion that logs through `tracing`.
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            config: Arc::new(config),
            expander: Arc::new(IdentityExpander),
            sink: Arc::new(TracingSink),
        }
    }

    pub fn with_expander(mut self, expander: impl MacroExpander + 'static) -> Self {
        self.expander = Arc::new(expander);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    /// Resolve the requests for one build.
    pub fn notifications(&self, build: &BuildContext) -> Vec<NotificationRequest> {
        resolve_notifications(&self.config, build, self.expander.as_ref(), self.sink.as_ref())
    }
}

impl std::fmt::Debug for NotificationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationStrategy")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PartialEq for NotificationStrategy {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

impl Eq for NotificationStrategy {}

impl Hash for NotificationStrategy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.config.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use crate::domain::{HeadKind, ResultCategory, StatusState};

    fn build(head: HeadKind, result: ResultCategory) -> BuildContext {
        BuildContext::new("job#7", head)
            .with_result(result)
            .with_target_url("https://ci.example.com/job/7")
            .with_state(StatusState::for_category(result))
    }

    #[test]
    fn test_single_label_with_suffix() {
        let config = NotificationConfig::builder("ci").type_suffix(true).build();
        let sink = MemorySink::new();

        let requests = resolve_notifications(
            &config,
            &build(HeadKind::PrMerge, ResultCategory::Success),
            &IdentityExpander,
            &sink,
        );

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].context, "ci/pr-merge");
        assert_eq!(requests[0].message, ResultCategory::Success.default_message());
        assert_eq!(requests[0].state, StatusState::Success);
        assert_eq!(requests[0].target_url, "https://ci.example.com/job/7");
        assert!(!requests[0].ignore_error);
    }

    #[test]
    fn test_filtered_result_short_circuits() {
        let config = NotificationConfig::builder("ci/${JOB}")
            .report(ResultCategory::Failure, false)
            .build();
        let sink = MemorySink::new();
        let calls = std::sync::atomic::AtomicUsize::new(0);
        let counting = |t: &str, _: &BuildContext| {
            calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok::<_, crate::error::ExpansionError>(t.to_string())
        };

        let requests = resolve_notifications(
            &config,
            &build(HeadKind::Branch, ResultCategory::Failure),
            &counting,
            &sink,
        );

        assert!(requests.is_empty());
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_missing_result_counts_as_pending() {
        let config = NotificationConfig::builder("ci")
            .report(ResultCategory::Pending, false)
            .build();
        let running = BuildContext::new("job#8", HeadKind::Branch);

        let requests = resolve_notifications(&config, &running, &IdentityExpander, &TracingSink);
        assert!(requests.is_empty());
    }

    #[test]
    fn test_expanded_blank_label_is_skipped() {
        let config = NotificationConfig::builder("${EMPTY}, ci").split_on(",").build();
        let build = build(HeadKind::Branch, ResultCategory::Success).with_variable("EMPTY", "");
        let tokens = crate::expand::TokenMacroExpander::strict();

        let requests = resolve_notifications(&config, &build, &tokens, &TracingSink);
        let contexts: Vec<&str> = requests.iter().map(|r| r.context.as_str()).collect();
        assert_eq!(contexts, vec!["ci"]);
    }

    #[test]
    fn test_strategy_equality_follows_config() {
        let a = NotificationStrategy::new(NotificationConfig::builder("ci").build());
        let b = NotificationStrategy::new(NotificationConfig::builder("ci").build())
            .with_sink(Arc::new(MemorySink::new()));
        let c = NotificationStrategy::new(NotificationConfig::builder("ci").type_suffix(true).build());

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: std::collections::HashSet<NotificationStrategy> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_strategy_uses_injected_sink() {
        let sink = Arc::new(MemorySink::new());
        let strategy = NotificationStrategy::new(NotificationConfig::builder("ci/${JOB}").build())
            .with_expander(crate::expand::TokenMacroExpander::strict())
            .with_sink(sink.clone());

        let requests = strategy.notifications(&build(HeadKind::Branch, ResultCategory::Success));
        assert_eq!(requests[0].context, "ci/${JOB}");
        assert_eq!(sink.records().len(), 1);
    }
}
