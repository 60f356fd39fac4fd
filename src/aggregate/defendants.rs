use tracing::debug;

use crate::parse::Dataset;

/// Parameters for the two-way defendant-type split.
#[derive(Debug, Clone)]
pub struct BinarySplitConfig {
    pub type_column: String,
    /// Substring identifying the first category, e.g. "Public".
    pub first_label: String,
    /// Substring identifying the second category, e.g. "Private".
    pub second_label: String,
}

/// Row counts per category. Unclassified rows are tracked but excluded from
/// the percentage denominator; whether they should instead count toward it
/// is a product decision left open upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinarySplit {
    pub first_count: u64,
    pub second_count: u64,
    pub unclassified: u64,
}

impl BinarySplit {
    /// Percentages of the two plotted categories over their combined total.
    /// `None` when both counts are zero, so callers pick the display
    /// fallback instead of propagating a NaN.
    pub fn percentages(&self) -> Option<(f64, f64)> {
        let denominator = (self.first_count + self.second_count) as f64;
        if denominator == 0.0 {
            return None;
        }
        Some((
            self.first_count as f64 / denominator * 100.0,
            self.second_count as f64 / denominator * 100.0,
        ))
    }
}

/// Classify every row by substring test against the type column. First
/// label wins if a value somehow contains both.
pub fn split_by_type(dataset: &Dataset, config: &BinarySplitConfig) -> BinarySplit {
    let mut split = BinarySplit {
        first_count: 0,
        second_count: 0,
        unclassified: 0,
    };

    for row in dataset.rows() {
        let value = row.get_or_empty(&config.type_column);
        if value.contains(&config.first_label) {
            split.first_count += 1;
        } else if value.contains(&config.second_label) {
            split.second_count += 1;
        } else {
            split.unclassified += 1;
        }
    }

    debug!(
        first = split.first_count,
        second = split.second_count,
        unclassified = split.unclassified,
        "classified rows"
    );
    split
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BinarySplitConfig {
        BinarySplitConfig {
            type_column: "respondent_type".into(),
            first_label: "Public".into(),
            second_label: "Private".into(),
        }
    }

    fn dataset_of_types(types: &[&str]) -> Dataset {
        let mut text = String::from("respondent_type\n");
        for t in types {
            text.push_str(&format!("\"{t}\"\n"));
        }
        Dataset::parse(&text)
    }

    #[test]
    fn thirty_seventy_split_is_exact() {
        let mut types = vec!["Public institution"; 30];
        types.extend(vec!["Private collector"; 70]);
        let split = split_by_type(&dataset_of_types(&types), &config());

        assert_eq!(split.first_count, 30);
        assert_eq!(split.second_count, 70);
        let (public, private) = split.percentages().unwrap();
        assert_eq!(public, 30.0);
        assert_eq!(private, 70.0);
    }

    #[test]
    fn unclassified_rows_stay_out_of_denominator() {
        let split = split_by_type(
            &dataset_of_types(&["Public", "Private", "", "Museum"]),
            &config(),
        );
        assert_eq!(split.unclassified, 2);
        let (public, private) = split.percentages().unwrap();
        assert_eq!(public, 50.0);
        assert_eq!(private, 50.0);
    }

    #[test]
    fn first_label_wins_when_both_substrings_present() {
        let split = split_by_type(&dataset_of_types(&["Public and Private"]), &config());
        assert_eq!(split.first_count, 1);
        assert_eq!(split.second_count, 0);
    }

    #[test]
    fn zero_denominator_yields_none() {
        let split = split_by_type(&dataset_of_types(&["Museum", ""]), &config());
        assert_eq!(split.percentages(), None);
    }

    #[test]
    fn missing_column_counts_everything_unclassified() {
        let ds = Dataset::parse("other\nx\ny\n");
        let split = split_by_type(&ds, &config());
        assert_eq!(split.unclassified, 2);
        assert_eq!(split.percentages(), None);
    }
}
