pub mod defendants;
pub mod nations;
pub mod status;

pub use defendants::{split_by_type, BinarySplit, BinarySplitConfig};
pub use nations::{cumulative_claims, NationRankingConfig, NationSeries, SeriesPoint};
pub use status::{count_statuses, HistogramConfig, StatusHistogram};
