use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmaIndicator {
    pub value: f64,
    pub period: u32,
}

/// Distance of the latest close below the highest close of a trailing window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawdownIndicator {
    pub recent_high: f64,
    pub latest_close: f64,
    pub drawdown_pct: f64,
    /// Points actually inspected; below the requested lookback on short series.
    pub window: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub symbol: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub smas: Vec<SmaIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawdown: Option<DrawdownIndicator>,
    pub timestamp: DateTime<Utc>,
}

impl IndicatorSet {
    pub fn new(symbol: String, price: f64) -> Self {
        Self {
            symbol,
            price,
            smas: Vec::new(),
            drawdown: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_sma(mut self, sma: SmaIndicator) -> Self {
        self.smas.push(sma);
        self
    }

    pub fn with_drawdown(mut self, drawdown: DrawdownIndicator) -> Self {
        self.drawdown = Some(drawdown);
        self
    }

    pub fn sma(&self, period: u32) -> Option<f64> {
        self.smas.iter().find(|s| s.period == period).map(|s| s.value)
    }
}
