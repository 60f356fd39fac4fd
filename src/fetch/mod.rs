use anyhow::{Context, Result};
use reqwest::Client;
use std::path::Path;
use tokio::fs;
use url::Url;

/// Fetch the published-cases CSV over HTTP(S) and return its full text.
pub async fn fetch_csv(client: &Client, url: &str) -> Result<String> {
    let url = Url::parse(url).with_context(|| format!("invalid CSV url {url}"))?;
    let text = client
        .get(url.clone())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
        .with_context(|| format!("reading body of {url}"))?;
    Ok(text)
}

/// Read a local copy of the CSV.
pub async fn read_csv_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

/// Load CSV text from an http(s) URL or a filesystem path.
pub async fn load_source(client: &Client, source: &str) -> Result<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_csv(client, source).await
    } else {
        read_csv_file(source).await
    }
}
