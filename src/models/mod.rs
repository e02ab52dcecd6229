//! Shared data models spanning the engine layers.

pub mod analysis;
pub mod fundamentals;
pub mod indicators;
pub mod price;

pub use analysis::{AnalysisResult, DipAlert, LongTermSignal, ShortTermSignal};
pub use fundamentals::Fundamentals;
pub use indicators::{DrawdownIndicator, IndicatorSet, SmaIndicator};
pub use price::{LookbackPeriod, PricePoint, PriceSeries};
