//! Market data provider interfaces.

use async_trait::async_trait;

use crate::models::fundamentals::Fundamentals;
use crate::models::price::{LookbackPeriod, PriceSeries};
use crate::services::error::ServiceError;

#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Daily closes for `symbol` covering `lookback`, oldest first.
    async fn price_history(
        &self,
        symbol: &str,
        lookback: LookbackPeriod,
    ) -> Result<PriceSeries, ServiceError>;
}

#[async_trait]
pub trait FundamentalsProvider: Send + Sync {
    /// Trailing P/E and EPS for `symbol`; missing fields are not an error.
    async fn fundamentals(&self, symbol: &str) -> Result<Fundamentals, ServiceError>;
}
