//! Ticker universe discovery from a sector-filtered screener page.

use async_trait::async_trait;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, warn};

use crate::services::error::ServiceError;
use crate::services::http::build_browser_client;

#[async_trait]
pub trait UniverseDiscovery: Send + Sync {
    /// Symbols listed for `sector`. Failures degrade to an empty set.
    async fn discover(&self, sector: &str) -> BTreeSet<String>;
}

/// Anchor elements carrying the `screener-link-primary` class.
static TICKER_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<a\s[^>]*class\s*=\s*["'][^"']*\bscreener-link-primary\b[^"']*["'][^>]*>(.*?)</a>"#,
    )
    .expect("ticker link pattern is a valid regex")
});

static INNER_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is a valid regex"));

/// Scrapes the Finviz screener for ticker links.
pub struct FinvizScreener {
    client: reqwest::Client,
    base_url: String,
}

impl FinvizScreener {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        Ok(Self::with_client(base_url, build_browser_client(timeout)?))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_sector(&self, sector: &str) -> Result<BTreeSet<String>, ServiceError> {
        let url = format!("{}/screener.ashx", self.base_url);
        let filter = format!("sec_{}", sector);
        let html = self
            .client
            .get(&url)
            .query(&[("v", "111"), ("f", filter.as_str()), ("ft", "4")])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(parse_screener_page(&html))
    }
}

#[async_trait]
impl UniverseDiscovery for FinvizScreener {
    async fn discover(&self, sector: &str) -> BTreeSet<String> {
        match self.fetch_sector(sector).await {
            Ok(tickers) => {
                if tickers.is_empty() {
                    warn!(sector = %sector, "Discovery: no tickers found, page layout may have changed");
                } else {
                    debug!(sector = %sector, count = tickers.len(), "Discovery: found {} tickers", tickers.len());
                }
                tickers
            }
            Err(e) => {
                warn!(sector = %sector, error = %e, "Discovery: screener request failed");
                BTreeSet::new()
            }
        }
    }
}

/// Pull alphabetic ticker tokens out of screener markup. Markup nested
/// inside a link is dropped before the token is checked.
pub fn parse_screener_page(html: &str) -> BTreeSet<String> {
    TICKER_LINK
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| INNER_TAG.replace_all(m.as_str(), "").trim().to_string())
        .filter(|t| !t.is_empty() && t.chars().all(char::is_alphabetic))
        .collect()
}
