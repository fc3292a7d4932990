//! Per-result report filtering.

use std::collections::BTreeMap;

use crate::domain::ResultCategory;

/// Whether a build with this result should be reported at all.
///
/// Filters are opt-out: a category missing from `filters` is reported.
pub fn should_report(category: ResultCategory, filters: &BTreeMap<ResultCategory, bool>) -> bool {
    filters.get(&category).copied().unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filters_report_everything() {
        let filters = BTreeMap::new();
        for category in ResultCategory::ALL {
            assert!(should_report(category, &filters));
        }
    }

    #[test]
    fn test_explicit_exclusion() {
        let filters = BTreeMap::from([(ResultCategory::Failure, false)]);
        assert!(!should_report(ResultCategory::Failure, &filters));
        assert!(should_report(ResultCategory::Success, &filters));
    }

    #[test]
    fn test_explicit_inclusion() {
        let filters = BTreeMap::from([(ResultCategory::Aborted, true)]);
        assert!(should_report(ResultCategory::Aborted, &filters));
    }
}
