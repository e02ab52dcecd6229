//! Per-symbol analysis: SMA trend, fundamental tier and dip alert.

use crate::common::math::means_tied;
use crate::config::SignalConfig;
use crate::indicators::structure::calculate_drawdown;
use crate::indicators::trend::calculate_smas;
use crate::models::analysis::{AnalysisResult, ShortTermSignal};
use crate::models::fundamentals::Fundamentals;
use crate::models::indicators::IndicatorSet;
use crate::models::price::PriceSeries;
use crate::signals::dip::detect_dip;
use crate::signals::fundamentals::classify_fundamentals;

pub const MIN_POINTS: usize = 50;

/// Which results a caller wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// Every analysable symbol yields a result.
    Full,
    /// Only symbols with a dip alert yield a result.
    DipOnly,
}

pub struct SignalEngine {
    config: SignalConfig,
}

impl SignalEngine {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Analyse one symbol. `None` when the series is too short, the SMAs
    /// cannot be computed, or the mode filters the result out.
    pub fn analyze(
        &self,
        series: &PriceSeries,
        fundamentals: &Fundamentals,
        mode: AnalysisMode,
    ) -> Option<AnalysisResult> {
        if series.len() < self.config.min_points {
            return None;
        }

        let latest = series.latest()?;
        let smas = calculate_smas(series, &[self.config.short_window, self.config.long_window]);
        let short_sma = smas.iter().find(|s| s.period == self.config.short_window)?.value;
        let long_sma = smas.iter().find(|s| s.period == self.config.long_window)?.value;

        // A tie is not a crossover.
        let tied = means_tied(short_sma, long_sma, self.config.long_window as usize);
        let short_term = if short_sma > long_sma && !tied {
            ShortTermSignal::Bullish
        } else {
            ShortTermSignal::Bearish
        };

        let long_term = classify_fundamentals(fundamentals, &self.config.pe_bands);

        let drawdown = calculate_drawdown(series, self.config.dip_lookback);
        let dip_alert = drawdown.as_ref().and_then(|d| {
            detect_dip(&series.symbol, d, long_term, self.config.dip_threshold_pct)
        });

        if mode == AnalysisMode::DipOnly && dip_alert.is_none() {
            return None;
        }

        let mut indicators = IndicatorSet::new(series.symbol.clone(), latest.close);
        for sma in smas {
            indicators = indicators.with_sma(sma);
        }
        if let Some(drawdown) = drawdown {
            indicators = indicators.with_drawdown(drawdown);
        }

        Some(AnalysisResult {
            symbol: series.symbol.clone(),
            short_term,
            long_term,
            pe_ratio: fundamentals.trailing_pe,
            eps: fundamentals.trailing_eps,
            dip_alert,
            indicators,
        })
    }
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new(SignalConfig::default())
    }
}
