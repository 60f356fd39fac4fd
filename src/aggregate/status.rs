use tracing::debug;

use crate::parse::Dataset;

/// Parameters for the fixed-category status histogram.
#[derive(Debug, Clone)]
pub struct HistogramConfig {
    pub status_column: String,
    /// Closed, ordered list of exact-match labels. Output preserves this
    /// order, not count order.
    pub target_categories: Vec<String>,
}

/// Counts per target category plus an overflow counter for non-empty
/// statuses outside the target set. The overflow is tracked, not plotted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusHistogram {
    pub categories: Vec<(String, u64)>,
    pub other: u64,
}

/// Count rows per target status label, in the caller-specified order.
pub fn count_statuses(dataset: &Dataset, config: &HistogramConfig) -> StatusHistogram {
    let mut categories: Vec<(String, u64)> = config
        .target_categories
        .iter()
        .map(|label| (label.clone(), 0))
        .collect();
    let mut other = 0;

    for row in dataset.rows() {
        let status = row.get_or_empty(&config.status_column).trim();
        match categories.iter_mut().find(|(label, _)| label == status) {
            Some((_, count)) => *count += 1,
            None if !status.is_empty() => other += 1,
            None => {}
        }
    }

    debug!(other, "counted statuses outside the target set");
    StatusHistogram { categories, other }
}
