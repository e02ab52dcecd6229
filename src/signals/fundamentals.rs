//! Fundamental tiering from trailing P/E and EPS

use crate::models::analysis::LongTermSignal;
use crate::models::fundamentals::Fundamentals;

/// P/E bands separating the fundamental tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeBands {
    /// Strictly below this is strong.
    pub strong_below: f64,
    /// Up to and including this is moderate; above is growth.
    pub moderate_max: f64,
}

impl PeBands {
    pub const STRONG_BELOW: f64 = 25.0;
    pub const MODERATE_MAX: f64 = 40.0;

    /// Bands must be ordered for the tiers to be reachable
    pub fn verify(&self) -> bool {
        self.strong_below.is_finite()
            && self.moderate_max.is_finite()
            && self.strong_below <= self.moderate_max
    }
}

impl Default for PeBands {
    fn default() -> Self {
        Self {
            strong_below: Self::STRONG_BELOW,
            moderate_max: Self::MODERATE_MAX,
        }
    }
}

/// Classify fundamentals. Tiering needs a P/E and a positive EPS; anything
/// else is weak.
pub fn classify_fundamentals(fundamentals: &Fundamentals, bands: &PeBands) -> LongTermSignal {
    let (pe, eps) = match (fundamentals.trailing_pe, fundamentals.trailing_eps) {
        (Some(pe), Some(eps)) if pe.is_finite() && eps.is_finite() => (pe, eps),
        _ => return LongTermSignal::WeakFundamentals,
    };

    if eps <= 0.0 {
        return LongTermSignal::WeakFundamentals;
    }

    if pe < bands.strong_below {
        LongTermSignal::StrongFundamentals
    } else if pe <= bands.moderate_max {
        LongTermSignal::ModerateFundamentals
    } else {
        LongTermSignal::GrowthStock
    }
}
