//! Yahoo Finance chart and quote payloads.

use chrono::DateTime;
use serde::Deserialize;

use crate::models::fundamentals::Fundamentals;
use crate::models::price::{PricePoint, PriceSeries};
use crate::services::error::ServiceError;

#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub chart: ChartBody,
}

#[derive(Debug, Deserialize)]
pub struct ChartBody {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    #[serde(default)]
    pub symbol: Option<String>,
    /// Exchange offset from UTC in seconds; bars are dated in exchange time.
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
pub struct ChartQuote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl ApiErrorBody {
    pub fn into_error(self) -> ServiceError {
        ServiceError::Api(format!("{}: {}", self.code, self.description))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteEnvelope {
    pub quote_response: QuoteBody,
}

#[derive(Debug, Deserialize)]
pub struct QuoteBody {
    #[serde(default)]
    pub result: Vec<QuoteResult>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub symbol: String,
    #[serde(default, rename = "trailingPE")]
    pub trailing_pe: Option<f64>,
    #[serde(default)]
    pub eps_trailing_twelve_months: Option<f64>,
}

impl ChartEnvelope {
    /// Convert the first chart result into a series, skipping bars without a close.
    pub fn into_series(self, symbol: &str) -> Result<PriceSeries, ServiceError> {
        if let Some(error) = self.chart.error {
            return Err(error.into_error());
        }

        let result = self
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| ServiceError::NoData(symbol.to_string()))?;

        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default();

        if closes.len() != result.timestamp.len() {
            return Err(ServiceError::Decode(format!(
                "{} timestamps but {} closes for {}",
                result.timestamp.len(),
                closes.len(),
                symbol
            )));
        }

        let offset = result.meta.gmtoffset;
        let points = result
            .timestamp
            .iter()
            .zip(closes)
            .filter_map(|(&ts, close)| {
                let close = close?;
                let date = DateTime::from_timestamp(ts + offset, 0)?.date_naive();
                Some(PricePoint::new(date, close))
            })
            .collect();

        Ok(PriceSeries::new(symbol, points))
    }
}

impl QuoteEnvelope {
    /// Fundamentals for `symbol`; an unknown symbol yields unavailable fields.
    pub fn into_fundamentals(self, symbol: &str) -> Result<Fundamentals, ServiceError> {
        if let Some(error) = self.quote_response.error {
            return Err(error.into_error());
        }

        let quote = self
            .quote_response
            .result
            .into_iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(symbol));

        Ok(match quote {
            Some(q) => Fundamentals::new(q.trailing_pe, q.eps_trailing_twelve_months),
            None => Fundamentals::unavailable(),
        })
    }
}
