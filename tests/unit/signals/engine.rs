//! Unit tests for the per-symbol signal engine

use chrono::{Duration, NaiveDate};
use stock_advisor::models::analysis::{LongTermSignal, ShortTermSignal};
use stock_advisor::models::fundamentals::Fundamentals;
use stock_advisor::models::price::{PricePoint, PriceSeries};
use stock_advisor::signals::engine::{AnalysisMode, SignalEngine};

fn series_from_closes(symbol: &str, closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, close)| PricePoint::new(start + Duration::days(i as i64), *close))
        .collect();
    PriceSeries::new(symbol, points)
}

/// 59 closes at 100 followed by one at `last`.
fn flat_then(last: f64) -> Vec<f64> {
    let mut closes = vec![100.0; 59];
    closes.push(last);
    closes
}

fn strong() -> Fundamentals {
    Fundamentals::new(Some(20.0), Some(5.0))
}

#[test]
fn test_short_series_is_skipped() {
    let engine = SignalEngine::default();
    let series = series_from_closes("NVDA", &vec![100.0; 49]);
    assert!(engine.analyze(&series, &strong(), AnalysisMode::Full).is_none());
}

#[test]
fn test_uptrend_is_bullish_strong_buy() {
    let engine = SignalEngine::default();
    let closes: Vec<f64> = (1..=60).map(|i| i as f64).collect();
    let series = series_from_closes("NVDA", &closes);

    let result = engine.analyze(&series, &strong(), AnalysisMode::Full).unwrap();
    assert_eq!(result.short_term, ShortTermSignal::Bullish);
    assert_eq!(result.long_term, LongTermSignal::StrongFundamentals);
    assert!(result.is_strong_buy());
    assert!(result.dip_alert.is_none());
    assert_eq!(result.pe_ratio, Some(20.0));
    assert_eq!(result.eps, Some(5.0));
    assert_eq!(result.indicators.price, 60.0);
    assert!(result.indicators.sma(20).unwrap() > result.indicators.sma(50).unwrap());
}

#[test]
fn test_flat_series_is_bearish() {
    let engine = SignalEngine::default();
    let series = series_from_closes("AMD", &vec![42.0; 55]);

    let result = engine.analyze(&series, &strong(), AnalysisMode::Full).unwrap();
    assert_eq!(result.short_term, ShortTermSignal::Bearish);
    assert!(!result.is_strong_buy());
}

#[test]
fn test_flat_series_with_inexact_closes_is_bearish() {
    let engine = SignalEngine::default();
    for close in [0.1, 33.33, 99.99, 123.45] {
        let series = series_from_closes("RR.L", &vec![close; 60]);
        let result = engine.analyze(&series, &strong(), AnalysisMode::Full).unwrap();
        assert_eq!(result.short_term, ShortTermSignal::Bearish, "close {}", close);
        assert!(!result.is_strong_buy());
    }
}

#[test]
fn test_dip_requires_strong_fundamentals() {
    let engine = SignalEngine::default();
    let series = series_from_closes("MSFT", &flat_then(85.0));

    let strong_result = engine.analyze(&series, &strong(), AnalysisMode::Full).unwrap();
    let alert = strong_result.dip_alert.expect("expected a dip alert");
    assert!((alert.percent_drop - 15.0).abs() < 1e-9);

    let moderate = Fundamentals::new(Some(30.0), Some(5.0));
    let moderate_result = engine.analyze(&series, &moderate, AnalysisMode::Full).unwrap();
    assert_eq!(moderate_result.long_term, LongTermSignal::ModerateFundamentals);
    assert!(moderate_result.dip_alert.is_none());
}

#[test]
fn test_dip_only_mode_filters_non_dips() {
    let engine = SignalEngine::default();

    let shallow = series_from_closes("XOM", &flat_then(95.0));
    assert!(engine.analyze(&shallow, &strong(), AnalysisMode::DipOnly).is_none());

    let deep = series_from_closes("XOM", &flat_then(88.0));
    let result = engine.analyze(&deep, &strong(), AnalysisMode::DipOnly).unwrap();
    assert!(result.dip_alert.is_some());

    let weak = Fundamentals::new(Some(20.0), Some(-1.0));
    assert!(engine.analyze(&deep, &weak, AnalysisMode::DipOnly).is_none());
}

#[test]
fn test_missing_fundamentals_still_analyzed() {
    let engine = SignalEngine::default();
    let closes: Vec<f64> = (1..=60).map(|i| i as f64).collect();
    let series = series_from_closes("FWRG", &closes);

    let result = engine
        .analyze(&series, &Fundamentals::unavailable(), AnalysisMode::Full)
        .unwrap();
    assert_eq!(result.short_term, ShortTermSignal::Bullish);
    assert_eq!(result.long_term, LongTermSignal::WeakFundamentals);
    assert!(result.pe_ratio.is_none());
}
