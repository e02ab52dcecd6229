//! Drawdown of the latest close from the recent high

use crate::common::math;
use crate::models::indicators::DrawdownIndicator;
use crate::models::price::PriceSeries;

/// Calculate how far the latest close sits below the highest close of the
/// trailing `lookback` points. Short series use every point available.
pub fn calculate_drawdown(series: &PriceSeries, lookback: usize) -> Option<DrawdownIndicator> {
    let latest_close = series.latest()?.close;
    let closes = series.closes();

    let recent_high = math::trailing_max(&closes, lookback)?;
    let drawdown_pct = math::percent_below(recent_high, latest_close)?;

    Some(DrawdownIndicator {
        recent_high,
        latest_close,
        drawdown_pct,
        window: lookback.min(closes.len()),
    })
}
