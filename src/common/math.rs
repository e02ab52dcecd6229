//! Rolling-window math over closing prices.

/// Mean of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }

    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Whether two window means are equal up to the rounding of summing `terms` values.
pub fn means_tied(a: f64, b: f64, terms: usize) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= f64::EPSILON * scale * terms.max(1) as f64
}

/// Maximum of the last `window` values, or of all values when fewer exist.
pub fn trailing_max(values: &[f64], window: usize) -> Option<f64> {
    if values.is_empty() || window == 0 {
        return None;
    }

    let start = values.len().saturating_sub(window);
    values[start..]
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<f64>, v| match acc {
            Some(max) if max >= v => Some(max),
            _ => Some(v),
        })
}

/// Percentage drop of `current` below `reference`.
pub fn percent_below(reference: f64, current: f64) -> Option<f64> {
    if reference <= 0.0 || !reference.is_finite() || !current.is_finite() {
        return None;
    }
    Some((reference - current) / reference * 100.0)
}

/// Round to two decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
