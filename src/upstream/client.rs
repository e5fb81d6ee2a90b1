//! River-level API client.

use std::collections::BTreeMap;
use std::error::Error as _;
use std::time::{Duration, Instant};

use futures::future::join_all;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::{FetchError, Result};
use crate::metrics;
use crate::registry::{Page, River};

use super::types::RiverResult;

/// Aggregated results for one page, keyed by river key.
pub type PageResults = BTreeMap<String, RiverResult>;

/// Client for the upstream river-level API.
#[derive(Debug, Clone)]
pub struct RiverClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL river paths are appended to.
    base_url: String,
}

impl RiverClient {
    /// Create a client from config.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base(&config.river_api_base, config.upstream_timeout())
    }

    /// Create a client for an explicit base URL and per-fetch timeout.
    pub fn with_base(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .tcp_nodelay(true)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    /// Get the upstream base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every river on `page` concurrently.
    ///
    /// Always yields one entry per configured river; a failed fetch only
    /// affects its own entry.
    #[instrument(skip(self, page), fields(page = %page.id))]
    pub async fn rivers_for_page(&self, page: &Page) -> PageResults {
        let fetches = page
            .rivers
            .iter()
            .map(|river| async move { (river.key.clone(), self.fetch_river(river).await) });

        let results: PageResults = join_all(fetches).await.into_iter().collect();

        debug!(
            rivers = results.len(),
            failed = results.values().filter(|r| !r.is_ok()).count(),
            "Page fetch complete"
        );

        results
    }

    /// Fetch one river and fold any failure into the result.
    #[instrument(skip(self, river), fields(river = %river.key))]
    pub async fn fetch_river(&self, river: &River) -> RiverResult {
        let start = Instant::now();
        metrics::inc_upstream_fetches();

        let result = match self.fetch_json(&river.api_path).await {
            Ok(data) => {
                debug!("Fetched river data");
                RiverResult::data(river, data)
            }
            Err(e) => {
                metrics::inc_upstream_failures(e.kind());
                let message = describe(&e);
                warn!(error = %message, "River fetch failed");
                RiverResult::error(river, message)
            }
        };

        metrics::record_upstream_latency(start, &river.key);
        result
    }

    /// GET `{base}{path}` and parse the body as JSON.
    async fn fetch_json(&self, path: &str) -> std::result::Result<Value, FetchError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Error text for a river's `error` field. Transport errors include their
/// source chain, since reqwest's top-level message omits the cause.
fn describe(err: &FetchError) -> String {
    match err {
        FetchError::Transport(e) => {
            let mut message = e.to_string();
            let mut source = e.source();
            while let Some(cause) = source {
                message.push_str(": ");
                message.push_str(&cause.to_string());
                source = cause.source();
            }
            message
        }
        other => other.to_string(),
    }
}
