use anyhow::Result;
use cpdr_charts::{
    aggregate::{
        count_statuses, cumulative_claims, split_by_type, BinarySplitConfig, HistogramConfig,
        NationRankingConfig,
    },
    chart::{
        cumulative_claims_chart, defendant_split_chart, status_histogram_chart, ChartDescription,
    },
    fetch, Dataset,
};
use reqwest::Client;
use std::{fs, path::PathBuf, sync::Arc};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_SOURCE: &str = "cpdr_published_cases.csv";
const TOP_NATIONS: usize = 5;
const BASELINE_YEAR: i32 = 1980;
const STATUS_CATEGORIES: &[&str] = &[
    "Object(s) relinquished",
    "Object(s) not relinquished",
    "Some objects relinquished",
    "Unresolved",
];

fn nation_config(nation_column: &str) -> NationRankingConfig {
    NationRankingConfig {
        nation_column: nation_column.to_string(),
        resolution_year_column: "year_claim_resolved".to_string(),
        top_n: TOP_NATIONS,
        baseline_year: BASELINE_YEAR,
    }
}

fn complainant_chart(dataset: &Dataset) -> ChartDescription {
    let series = cumulative_claims(dataset, &nation_config("complainant_nation"));
    let top: Vec<&str> = series.iter().map(|s| s.nation.as_str()).collect();
    info!(top = ?top, "top complainant nations");
    cumulative_claims_chart(&series, BASELINE_YEAR, "Complainant Nation")
}

fn respondent_chart(dataset: &Dataset) -> ChartDescription {
    let series = cumulative_claims(dataset, &nation_config("respondent_nation"));
    let top: Vec<&str> = series.iter().map(|s| s.nation.as_str()).collect();
    info!(top = ?top, "top respondent nations");
    cumulative_claims_chart(&series, BASELINE_YEAR, "Respondent Nation")
}

fn defendant_chart(dataset: &Dataset) -> ChartDescription {
    let config = BinarySplitConfig {
        type_column: "respondent_type".to_string(),
        first_label: "Public".to_string(),
        second_label: "Private".to_string(),
    };
    let split = split_by_type(dataset, &config);
    info!(
        public = split.first_count,
        private = split.second_count,
        unknown = split.unclassified,
        "defendant types"
    );
    defendant_split_chart(&split, &config)
}

fn status_chart(dataset: &Dataset) -> ChartDescription {
    let config = HistogramConfig {
        status_column: "case_status".to_string(),
        target_categories: STATUS_CATEGORIES.iter().map(|s| s.to_string()).collect(),
    };
    let histogram = count_statuses(dataset, &config);
    info!(other = histogram.other, "statuses outside the target set");
    status_histogram_chart(&histogram)
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) configure source + output dir ────────────────────────────
    let mut args = std::env::args().skip(1);
    let source = args.next().unwrap_or_else(|| DEFAULT_SOURCE.to_string());
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "charts".to_string()));
    fs::create_dir_all(&out_dir)?;

    // ─── 3) fetch + parse once ───────────────────────────────────────
    let client = Client::new();
    let text = fetch::load_source(&client, &source).await?;
    let dataset = Arc::new(Dataset::parse(&text));
    info!(rows = dataset.len(), source = %source, "parsed dataset");

    // ─── 4) run the four chart pipelines concurrently ────────────────
    let pipelines: Vec<(&str, fn(&Dataset) -> ChartDescription)> = vec![
        ("complainant_claims", complainant_chart),
        ("respondent_claims", respondent_chart),
        ("defendant_types", defendant_chart),
        ("case_statuses", status_chart),
    ];

    let mut handles = Vec::with_capacity(pipelines.len());
    for (name, build) in pipelines {
        let dataset = Arc::clone(&dataset);
        let path = out_dir.join(format!("{name}.json"));
        handles.push(tokio::spawn(async move {
            let chart = build(&dataset);
            tokio::fs::write(&path, chart.to_json()?).await?;
            info!("wrote {}", path.display());
            Ok::<_, anyhow::Error>(())
        }));
    }

    for handle in handles {
        handle.await??;
    }

    info!("all done");
    Ok(())
}
