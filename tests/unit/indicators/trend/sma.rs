//! Unit tests for SMA indicator

use chrono::{Duration, NaiveDate};
use stock_advisor::indicators::trend::{calculate_sma, calculate_smas};
use stock_advisor::models::price::{PricePoint, PriceSeries};

fn create_test_series(count: usize, base_price: f64) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let points = (0..count)
        .map(|i| PricePoint::new(start + Duration::days(i as i64), base_price + i as f64 * 0.1))
        .collect();
    PriceSeries::new("TEST", points)
}

#[test]
fn test_sma_insufficient_data() {
    let series = create_test_series(10, 100.0);
    assert!(calculate_sma(&series, 20).is_none());
}

#[test]
fn test_sma_sufficient_data() {
    let series = create_test_series(20, 100.0);
    let sma = calculate_sma(&series, 20).unwrap();
    assert_eq!(sma.period, 20);
    // Mean of 100.0, 100.1, ..., 101.9
    assert!((sma.value - 100.95).abs() < 1e-9);
}

#[test]
fn test_calculate_multiple_smas_skips_unavailable() {
    let series = create_test_series(30, 100.0);
    let smas = calculate_smas(&series, &[20, 50]);
    assert_eq!(smas.len(), 1);
    assert_eq!(smas[0].period, 20);
}

#[test]
fn test_uptrend_fast_above_slow() {
    let series = create_test_series(60, 100.0);
    let fast = calculate_sma(&series, 20).unwrap();
    let slow = calculate_sma(&series, 50).unwrap();
    assert!(fast.value > slow.value);
}
