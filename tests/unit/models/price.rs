//! Unit tests for price series invariants

use chrono::NaiveDate;
use stock_advisor::models::price::{LookbackPeriod, PricePoint, PriceSeries};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

#[test]
fn test_series_sorted_and_deduplicated() {
    let series = PriceSeries::new(
        "AAPL",
        vec![
            PricePoint::new(day(5), 172.0),
            PricePoint::new(day(4), 170.0),
            PricePoint::new(day(5), 173.5),
            PricePoint::new(day(6), f64::NAN),
        ],
    );

    let dates: Vec<NaiveDate> = series.points().iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![day(4), day(5)]);
    // The later report for a repeated date wins.
    assert_eq!(series.latest().unwrap().close, 173.5);
    assert_eq!(series.closes(), vec![170.0, 173.5]);
}

#[test]
fn test_empty_series() {
    let series = PriceSeries::new("AAPL", Vec::new());
    assert!(series.is_empty());
    assert!(series.latest().is_none());
}

#[test]
fn test_lookback_parse_and_range() {
    assert_eq!("1y".parse::<LookbackPeriod>(), Ok(LookbackPeriod::Years(1)));
    assert_eq!(" 6MO ".parse::<LookbackPeriod>(), Ok(LookbackPeriod::Months(6)));
    assert_eq!(LookbackPeriod::Months(3).as_range(), "3mo");
    assert_eq!(LookbackPeriod::default().to_string(), "1y");
}

#[test]
fn test_lookback_rejects_bad_input() {
    assert!("0y".parse::<LookbackPeriod>().is_err());
    assert!("y".parse::<LookbackPeriod>().is_err());
    assert!("1w".parse::<LookbackPeriod>().is_err());
}
