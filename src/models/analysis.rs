use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::indicators::IndicatorSet;

/// Short-term trend from the SMA20/SMA50 relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShortTermSignal {
    Bullish,
    Bearish,
}

impl fmt::Display for ShortTermSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortTermSignal::Bullish => f.write_str("Bullish (Buy)"),
            ShortTermSignal::Bearish => f.write_str("Bearish (Wait)"),
        }
    }
}

/// Long-term view from trailing P/E and EPS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LongTermSignal {
    StrongFundamentals,
    ModerateFundamentals,
    GrowthStock,
    WeakFundamentals,
}

impl fmt::Display for LongTermSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LongTermSignal::StrongFundamentals => f.write_str("Strong fundamentals (Long-term Buy ✅)"),
            LongTermSignal::ModerateFundamentals => {
                f.write_str("Moderate fundamentals (Consider Hold ⚖️)")
            }
            LongTermSignal::GrowthStock => f.write_str("Growth stock (High risk 🚀)"),
            LongTermSignal::WeakFundamentals => f.write_str("Weak fundamentals (Hold/Avoid ❌)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DipAlert {
    /// Unrounded drop below the recent high, in percent.
    pub percent_drop: f64,
    pub message: String,
}

/// Outcome of analysing one symbol in one cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub symbol: String,
    pub short_term: ShortTermSignal,
    pub long_term: LongTermSignal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dip_alert: Option<DipAlert>,
    pub indicators: IndicatorSet,
}

impl AnalysisResult {
    /// Bullish trend backed by strong fundamentals.
    pub fn is_strong_buy(&self) -> bool {
        self.short_term == ShortTermSignal::Bullish
            && self.long_term == LongTermSignal::StrongFundamentals
    }
}
