use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use tracing::instrument;

use crate::error::{AppError, Result};

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

/// Fetch a page directly and return its body as text.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_html(url: &str) -> Result<String> {
    let response = CLIENT.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Fetch(format!("Upstream returned {}", status)));
    }
    let html = response.text().await?;
    Ok(html)
}

/// Fetch a page through a CORS-bypass proxy that wraps the body in a JSON
/// envelope (`{"contents": "<html>..."}`). A response without that field is a
/// fetch failure, not a crash.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_via_proxy(proxy_base: &str, url: &str) -> Result<String> {
    let mut proxy_url = url::Url::parse(proxy_base)
        .map_err(|e| AppError::Fetch(format!("Invalid proxy base URL: {}", e)))?;
    proxy_url.set_path("/get");
    proxy_url.query_pairs_mut().append_pair("url", url);

    let response = CLIENT.get(proxy_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Fetch(format!("Proxy returned {}", status)));
    }

    let body: serde_json::Value = response.json().await?;
    body["contents"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| AppError::Fetch("Proxy response did not include page contents".to_string()))
}
