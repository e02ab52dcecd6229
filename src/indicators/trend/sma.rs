//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::models::indicators::SmaIndicator;
use crate::models::price::PriceSeries;

/// Calculate the latest SMA for a specific period
pub fn calculate_sma(series: &PriceSeries, period: u32) -> Option<SmaIndicator> {
    if series.len() < period as usize {
        return None;
    }

    let closes = series.closes();
    let value = math::sma(&closes, period as usize)?;

    Some(SmaIndicator { value, period })
}

/// Calculate multiple SMAs at once
pub fn calculate_smas(series: &PriceSeries, periods: &[u32]) -> Vec<SmaIndicator> {
    periods
        .iter()
        .filter_map(|&period| calculate_sma(series, period))
        .collect()
}
