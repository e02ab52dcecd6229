use crate::signals::dip::{DEFAULT_DIP_LOOKBACK, DEFAULT_DIP_THRESHOLD_PCT};
use crate::signals::engine::MIN_POINTS;
use crate::signals::fundamentals::PeBands;

/// Windows and thresholds used by the signal engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalConfig {
    pub short_window: u32,
    pub long_window: u32,
    pub min_points: usize,
    pub dip_lookback: usize,
    pub dip_threshold_pct: f64,
    pub pe_bands: PeBands,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            short_window: 20,
            long_window: 50,
            min_points: MIN_POINTS,
            dip_lookback: DEFAULT_DIP_LOOKBACK,
            dip_threshold_pct: DEFAULT_DIP_THRESHOLD_PCT,
            pe_bands: PeBands::default(),
        }
    }
}

impl SignalConfig {
    /// Check that windows are usable with the minimum series length.
    pub fn validate(&self) -> Result<(), String> {
        if self.short_window == 0 || self.long_window == 0 {
            return Err("SMA windows must be positive".to_string());
        }
        if self.short_window >= self.long_window {
            return Err(format!(
                "short window {} must be below long window {}",
                self.short_window, self.long_window
            ));
        }
        if self.min_points < self.long_window as usize {
            return Err(format!(
                "minimum points {} cannot be below the long window {}",
                self.min_points, self.long_window
            ));
        }
        if self.dip_lookback == 0 {
            return Err("dip lookback must be positive".to_string());
        }
        if !self.pe_bands.verify() {
            return Err("P/E bands must be finite and ordered".to_string());
        }
        Ok(())
    }
}
