//! Declarative chart descriptions handed to the external Plotly renderer.
//!
//! These structs mirror the trace and layout objects the renderer consumes;
//! nothing here draws anything.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::aggregate::{BinarySplit, BinarySplitConfig, NationSeries, StatusHistogram};

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Trace {
    Scatter(ScatterTrace),
    Bar(BarTrace),
    Pie(PieTrace),
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<String>,
    pub y: Vec<u64>,
    pub mode: String,
    pub name: String,
    pub text: Vec<String>,
    pub hovertemplate: String,
    pub line: LineStyle,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineStyle {
    pub width: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarTrace {
    #[serde(rename = "type")]
    pub trace_type: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub customdata: Vec<u64>,
    pub hovertemplate: String,
    pub marker: Marker,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub color: Vec<String>,
    pub line: MarkerLine,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerLine {
    pub color: Vec<String>,
    pub width: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PieTrace {
    #[serde(rename = "type")]
    pub trace_type: String,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub hovertemplate: String,
    pub textinfo: String,
    pub insidetextorientation: String,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[Value; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rangemode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticksuffix: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct LegendTitle {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traceorder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<LegendTitle>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct Layout {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
}

/// Everything the renderer needs for one chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartDescription {
    pub traces: Vec<Trace>,
    pub layout: Layout,
}

impl ChartDescription {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Line chart of cumulative claims per ranked nation. Trace order follows
/// the rank order of `series`; years render as `YYYY-01-01` date strings.
pub fn cumulative_claims_chart(
    series: &[NationSeries],
    baseline_year: i32,
    legend_title: &str,
) -> ChartDescription {
    let traces = series
        .iter()
        .map(|s| {
            Trace::Scatter(ScatterTrace {
                x: s.points.iter().map(|p| format!("{}-01-01", p.year)).collect(),
                y: s.points.iter().map(|p| p.cumulative).collect(),
                mode: "lines+markers".into(),
                name: s.nation.clone(),
                text: s.points.iter().map(|p| p.annotation.clone()).collect(),
                hovertemplate: "%{text}<extra></extra>".into(),
                line: LineStyle { width: 3 },
            })
        })
        .collect();

    let today = Utc::now().format("%Y-%m-%d").to_string();
    ChartDescription {
        traces,
        layout: Layout {
            xaxis: Some(Axis {
                title: Some("Year Claim Resolved".into()),
                axis_type: Some("date".into()),
                range: Some([
                    Value::from(format!("{baseline_year}-01-01")),
                    Value::from(today),
                ]),
                ..Axis::default()
            }),
            yaxis: Some(Axis {
                title: Some("Total Number of Claims".into()),
                rangemode: Some("tozero".into()),
                ..Axis::default()
            }),
            hovermode: Some("x unified".into()),
            legend: Some(Legend {
                traceorder: Some("normal".into()),
                title: Some(LegendTitle {
                    text: legend_title.into(),
                }),
                ..Legend::default()
            }),
            margin: Some(Margin {
                l: 80,
                r: 50,
                b: 50,
                t: 50,
            }),
            ..Layout::default()
        },
    }
}

/// Bar chart of the public/private defendant split, as percentages with raw
/// counts in customdata. An empty split renders as two zero bars.
pub fn defendant_split_chart(split: &BinarySplit, config: &BinarySplitConfig) -> ChartDescription {
    let (first_pct, second_pct) = split.percentages().unwrap_or((0.0, 0.0));

    let trace = Trace::Bar(BarTrace {
        trace_type: "bar".into(),
        x: vec![config.first_label.clone(), config.second_label.clone()],
        y: vec![first_pct, second_pct],
        customdata: vec![split.first_count, split.second_count],
        hovertemplate: "<b>%{x} Defendants</b><br>Percentage: %{y:.1f}%<br>\
                        Number of Cases: %{customdata}<extra></extra>"
            .into(),
        marker: Marker {
            color: vec![
                "rgba(2, 64, 115, 0.8)".into(),
                "rgba(232, 129, 3, 0.8)".into(),
            ],
            line: MarkerLine {
                color: vec!["rgba(2, 64, 115, 1)".into(), "rgba(232, 129, 3, 1)".into()],
                width: 2,
            },
        },
    });

    ChartDescription {
        traces: vec![trace],
        layout: Layout {
            xaxis: Some(Axis {
                title: Some("Defendant Type".into()),
                ..Axis::default()
            }),
            yaxis: Some(Axis {
                title: Some("Percentage of Total Cases".into()),
                range: Some([Value::from(0), Value::from(100)]),
                ticksuffix: Some("%".into()),
                ..Axis::default()
            }),
            showlegend: Some(false),
            ..Layout::default()
        },
    }
}

/// Pie chart of case statuses, slices in the fixed category order.
pub fn status_histogram_chart(histogram: &StatusHistogram) -> ChartDescription {
    let (labels, values) = histogram
        .categories
        .iter()
        .map(|(label, count)| (label.clone(), *count))
        .unzip();

    let trace = Trace::Pie(PieTrace {
        trace_type: "pie".into(),
        labels,
        values,
        hovertemplate: "<b>%{label}</b><br>Percentage: %{percent}<br>\
                        Number of Cases: %{value}<extra></extra>"
            .into(),
        textinfo: "percent".into(),
        insidetextorientation: "horizontal".into(),
    });

    ChartDescription {
        traces: vec![trace],
        layout: Layout {
            showlegend: Some(true),
            legend: Some(Legend {
                x: Some(1.0),
                xanchor: Some("left".into()),
                y: Some(0.5),
                ..Legend::default()
            }),
            height: Some(600),
            margin: Some(Margin {
                l: 20,
                r: 250,
                b: 20,
                t: 20,
            }),
            ..Layout::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{
        cumulative_claims, count_statuses, split_by_type, HistogramConfig, NationRankingConfig,
    };
    use crate::parse::Dataset;

    #[test]
    fn scatter_traces_follow_rank_order_and_start_at_baseline() {
        let ds = Dataset::parse(
            "complainant_nation,year_claim_resolved\n\
             Greece,1995\nGreece,1998\nItaly,1996\n",
        );
        let series = cumulative_claims(
            &ds,
            &NationRankingConfig {
                nation_column: "complainant_nation".into(),
                resolution_year_column: "year_claim_resolved".into(),
                top_n: 2,
                baseline_year: 1980,
            },
        );
        let chart = cumulative_claims_chart(&series, 1980, "Complainant Nation");

        assert_eq!(chart.traces.len(), 2);
        match &chart.traces[0] {
            Trace::Scatter(t) => {
                assert_eq!(t.name, "Greece");
                assert_eq!(t.x[0], "1980-01-01");
                assert_eq!(t.y, vec![0, 1, 2]);
            }
            other => panic!("expected scatter trace, got {other:?}"),
        }
        let legend = chart.layout.legend.unwrap();
        assert_eq!(legend.title.unwrap().text, "Complainant Nation");
    }

    #[test]
    fn empty_defendant_split_renders_zero_bars() {
        let split = BinarySplit {
            first_count: 0,
            second_count: 0,
            unclassified: 3,
        };
        let config = BinarySplitConfig {
            type_column: "respondent_type".into(),
            first_label: "Public".into(),
            second_label: "Private".into(),
        };
        let chart = defendant_split_chart(&split, &config);
        match &chart.traces[0] {
            Trace::Bar(t) => {
                assert_eq!(t.y, vec![0.0, 0.0]);
                assert_eq!(t.x, vec!["Public", "Private"]);
            }
            other => panic!("expected bar trace, got {other:?}"),
        }
    }

    #[test]
    fn defendant_chart_carries_counts_and_percentages() {
        let ds = Dataset::parse(
            "respondent_type\nPublic institution\nPublic institution\nPublic institution\n\
             Private collector\n",
        );
        let config = BinarySplitConfig {
            type_column: "respondent_type".into(),
            first_label: "Public".into(),
            second_label: "Private".into(),
        };
        let chart = defendant_split_chart(&split_by_type(&ds, &config), &config);
        match &chart.traces[0] {
            Trace::Bar(t) => {
                assert_eq!(t.y, vec![75.0, 25.0]);
                assert_eq!(t.customdata, vec![3, 1]);
            }
            other => panic!("expected bar trace, got {other:?}"),
        }
    }

    #[test]
    fn pie_labels_keep_fixed_category_order() {
        let ds = Dataset::parse(
            "case_status\nUnresolved\nObject(s) relinquished\nObject(s) relinquished\n",
        );
        let hist = count_statuses(
            &ds,
            &HistogramConfig {
                status_column: "case_status".into(),
                target_categories: vec!["Object(s) relinquished".into(), "Unresolved".into()],
            },
        );
        let chart = status_histogram_chart(&hist);
        match &chart.traces[0] {
            Trace::Pie(t) => {
                assert_eq!(t.labels, vec!["Object(s) relinquished", "Unresolved"]);
                assert_eq!(t.values, vec![2, 1]);
            }
            other => panic!("expected pie trace, got {other:?}"),
        }
    }

    #[test]
    fn serialized_layout_drops_unset_fields() {
        let chart = status_histogram_chart(&StatusHistogram {
            categories: vec![("Unresolved".into(), 1)],
            other: 0,
        });
        let json: serde_json::Value = serde_json::from_str(&chart.to_json().unwrap()).unwrap();
        assert_eq!(json["layout"]["showlegend"], true);
        assert_eq!(json["layout"]["height"], 600);
        assert!(json["layout"].get("xaxis").is_none());
        assert_eq!(json["traces"][0]["type"], "pie");
    }
}
