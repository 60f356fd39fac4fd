use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::parse::Dataset;

/// Parameters for the top-N nation ranking and cumulative time series.
#[derive(Debug, Clone)]
pub struct NationRankingConfig {
    /// Column holding one or more comma-joined nation names.
    pub nation_column: String,
    /// Column holding the year the claim was resolved.
    pub resolution_year_column: String,
    /// How many nations to retain, ranked by total claim count.
    pub top_n: usize,
    /// Rows resolved before this year are excluded; each series starts with
    /// a synthetic zero point at this year.
    pub baseline_year: i32,
}

/// One step of a nation's cumulative claim history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPoint {
    pub year: i32,
    pub yearly: u64,
    pub cumulative: u64,
    /// Hover annotation for the renderer.
    pub annotation: String,
}

/// Cumulative claims over time for one ranked nation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationSeries {
    pub nation: String,
    /// Starts with the synthetic baseline zero point; strictly ascending by
    /// year, cumulative counts strictly increasing after the first point.
    pub points: Vec<SeriesPoint>,
}

/// Split a possibly multi-valued nation cell into trimmed, non-empty names.
/// A joint claim names several nations in one cell; each counts separately.
fn nation_names(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(',').map(str::trim).filter(|n| !n.is_empty())
}

/// Rank nations by total claim count and build one cumulative time series
/// per retained nation, ordered by rank.
pub fn cumulative_claims(dataset: &Dataset, config: &NationRankingConfig) -> Vec<NationSeries> {
    // Count claims per nation, remembering first-encounter order so that
    // ties rank deterministically.
    let mut counts: HashMap<&str, u64> = HashMap::new();
    let mut encounter_order: Vec<&str> = Vec::new();

    for row in dataset.rows() {
        let cell = row.get_or_empty(&config.nation_column);
        for nation in nation_names(cell) {
            let count = counts.entry(nation).or_insert(0);
            if *count == 0 {
                encounter_order.push(nation);
            }
            *count += 1;
        }
    }

    let mut ranked = encounter_order;
    ranked.sort_by_key(|nation| std::cmp::Reverse(counts[nation]));
    ranked.truncate(config.top_n);
    debug!(top = ?ranked, "ranked nations");

    // Per-nation year buckets over rows with a resolvable year at or after
    // the baseline. BTreeMap keeps years ascending.
    let mut claims_by_year: HashMap<&str, BTreeMap<i32, u64>> = HashMap::new();
    for row in dataset.rows() {
        let year = match row
            .get_or_empty(&config.resolution_year_column)
            .parse::<i32>()
        {
            Ok(y) if y >= config.baseline_year => y,
            _ => continue,
        };
        for nation in nation_names(row.get_or_empty(&config.nation_column)) {
            if !ranked.contains(&nation) {
                continue;
            }
            *claims_by_year
                .entry(nation)
                .or_default()
                .entry(year)
                .or_insert(0) += 1;
        }
    }

    ranked
        .iter()
        .map(|&nation| {
            let mut points = vec![SeriesPoint {
                year: config.baseline_year,
                yearly: 0,
                cumulative: 0,
                annotation: format!("Starting point for {nation}"),
            }];

            let mut cumulative = 0;
            if let Some(years) = claims_by_year.get(nation) {
                for (&year, &yearly) in years {
                    cumulative += yearly;
                    points.push(SeriesPoint {
                        year,
                        yearly,
                        cumulative,
                        annotation: format!(
                            "<b>{nation}</b><br>Year: {year}<br>\
                             New Claims in Year: {yearly}<br>Total Claims: {cumulative}"
                        ),
                    });
                }
            }

            NationSeries {
                nation: nation.to_string(),
                points,
            }
        })
        .collect()
}
