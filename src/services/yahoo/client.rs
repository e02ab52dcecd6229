use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

use super::response::{ChartEnvelope, QuoteEnvelope};
use crate::models::fundamentals::Fundamentals;
use crate::models::price::{LookbackPeriod, PriceSeries};
use crate::services::error::ServiceError;
use crate::services::http::build_session_client;
use crate::services::market_data::{FundamentalsProvider, PriceHistoryProvider};

/// Reads daily bars from the chart API and trailing metrics from the quote API.
///
/// The quote API only answers requests that carry a session cookie and the
/// matching crumb. Both are obtained on the first quote and reused until the
/// API rejects them.
pub struct YahooFinanceClient {
    client: reqwest::Client,
    base_url: String,
    cookie_url: String,
    crumb: Mutex<Option<String>>,
}

impl YahooFinanceClient {
    pub fn new(
        base_url: impl Into<String>,
        cookie_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        Ok(Self::with_client(
            base_url,
            cookie_url,
            build_session_client(timeout)?,
        ))
    }

    /// `client` must keep cookies, or every quote request is rejected.
    pub fn with_client(
        base_url: impl Into<String>,
        cookie_url: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cookie_url: cookie_url.into(),
            crumb: Mutex::new(None),
        }
    }

    /// Decode the body even on error statuses, since Yahoo reports failures
    /// inside the JSON envelope.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ServiceError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ServiceError::Unauthorized(format!(
                "{} returned status {}",
                url, status
            )));
        }
        let body = response.text().await?;

        match serde_json::from_str::<T>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => {
                Err(ServiceError::Api(format!("{} returned status {}", url, status)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Crumb for the current session; a new session is opened when none is
    /// cached or `renew` is set.
    async fn crumb(&self, renew: bool) -> Result<String, ServiceError> {
        let mut cached = self.crumb.lock().await;
        if !renew {
            if let Some(crumb) = cached.as_ref() {
                return Ok(crumb.clone());
            }
        }

        let crumb = self.open_session().await?;
        *cached = Some(crumb.clone());
        Ok(crumb)
    }

    async fn open_session(&self) -> Result<String, ServiceError> {
        // The cookie page answers 404 but still sets the session cookie.
        self.client.get(&self.cookie_url).send().await?;

        let url = format!("{}/v1/test/getcrumb", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        let crumb = body.trim();

        if !status.is_success() || crumb.is_empty() || crumb.contains(|c: char| c == '<' || c == '{') {
            return Err(ServiceError::Unauthorized(format!(
                "crumb request returned status {}",
                status
            )));
        }

        debug!("Yahoo: opened quote session");
        Ok(crumb.to_string())
    }

    async fn fetch_quote(&self, symbol: &str, crumb: &str) -> Result<Fundamentals, ServiceError> {
        let url = format!("{}/v7/finance/quote", self.base_url);
        let envelope: QuoteEnvelope = self
            .get_json(&url, &[("symbols", symbol), ("crumb", crumb)])
            .await?;
        envelope.into_fundamentals(symbol)
    }
}

#[async_trait]
impl PriceHistoryProvider for YahooFinanceClient {
    async fn price_history(
        &self,
        symbol: &str,
        lookback: LookbackPeriod,
    ) -> Result<PriceSeries, ServiceError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let range = lookback.as_range();
        let envelope: ChartEnvelope = self
            .get_json(&url, &[("range", range.as_str()), ("interval", "1d")])
            .await?;

        let series = envelope.into_series(symbol)?;
        debug!(symbol = %symbol, points = series.len(), range = %range, "Yahoo: fetched price history");
        Ok(series)
    }
}

#[async_trait]
impl FundamentalsProvider for YahooFinanceClient {
    async fn fundamentals(&self, symbol: &str) -> Result<Fundamentals, ServiceError> {
        let crumb = self.crumb(false).await?;
        let fundamentals = match self.fetch_quote(symbol, &crumb).await {
            Err(ServiceError::Unauthorized(reason)) => {
                debug!(symbol = %symbol, reason = %reason, "Yahoo: crumb rejected, renewing session");
                let crumb = self.crumb(true).await?;
                self.fetch_quote(symbol, &crumb).await?
            }
            other => other?,
        };

        debug!(
            symbol = %symbol,
            pe = ?fundamentals.trailing_pe,
            eps = ?fundamentals.trailing_eps,
            "Yahoo: fetched fundamentals"
        );
        Ok(fundamentals)
    }
}
