//! Dip alerts: a drop from the recent high on a fundamentally strong name

use crate::models::analysis::{DipAlert, LongTermSignal};
use crate::models::indicators::DrawdownIndicator;

pub const DEFAULT_DIP_LOOKBACK: usize = 60;
pub const DEFAULT_DIP_THRESHOLD_PCT: f64 = 10.0;

/// Raise a dip alert when the drawdown reaches `threshold_pct` and the
/// fundamentals are strong.
pub fn detect_dip(
    symbol: &str,
    drawdown: &DrawdownIndicator,
    long_term: LongTermSignal,
    threshold_pct: f64,
) -> Option<DipAlert> {
    if drawdown.drawdown_pct < threshold_pct || long_term != LongTermSignal::StrongFundamentals {
        return None;
    }

    Some(DipAlert {
        percent_drop: drawdown.drawdown_pct,
        message: format!(
            "📉 DIP ALERT: {} dropped {:.2}% from recent high. Strong fundamentals, consider buying!",
            symbol, drawdown.drawdown_pct
        ),
    })
}
