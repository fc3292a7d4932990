//! Host-boundary classifiers for build results and heads.

use crate::domain::{BuildOutcome, BuildProgress, HeadKind, ResultCategory};

/// Map a build's progress onto a [`ResultCategory`].
///
/// Exhaustive and side-effect free. Outcomes without a dedicated category
/// (including `NotBuilt` and anything unrecognized) map to `Other`.
pub fn classify_result(progress: &BuildProgress) -> ResultCategory {
    match progress {
        BuildProgress::Queued => ResultCategory::Queued,
        BuildProgress::Running => ResultCategory::Pending,
        BuildProgress::Completed(outcome) => classify_outcome(outcome),
    }
}

fn classify_outcome(outcome: &BuildOutcome) -> ResultCategory {
    match outcome {
        BuildOutcome::Success => ResultCategory::Success,
        BuildOutcome::Unstable => ResultCategory::Unstable,
        BuildOutcome::Failure => ResultCategory::Failure,
        BuildOutcome::Aborted => ResultCategory::Aborted,
        BuildOutcome::NotBuilt | BuildOutcome::Unrecognized(_) => ResultCategory::Other,
    }
}

/// Derive a [`HeadKind`] for hosts that only track pull-request flags.
///
/// `is_merge` is ignored for non-PR builds.
pub fn classify_head(is_pull_request: bool, is_merge: bool) -> HeadKind {
    match (is_pull_request, is_merge) {
        (false, _) => HeadKind::Branch,
        (true, false) => HeadKind::PrHead,
        (true, true) => HeadKind::PrMerge,
    }
}
