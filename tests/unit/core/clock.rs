//! Unit tests for the clock abstraction

use chrono::{NaiveDate, Timelike};
use stock_advisor::core::clock::{Clock, FixedClock, SystemClock};

#[test]
fn test_fixed_clock_hour() {
    let clock = FixedClock::at(15, 30);
    assert_eq!(clock.now().hour(), 15);
    assert_eq!(clock.now().minute(), 30);
}

#[test]
fn test_fixed_clock_set() {
    let clock = FixedClock::at(9, 0);
    let later = NaiveDate::from_ymd_opt(2024, 6, 4)
        .unwrap()
        .and_hms_opt(15, 0, 0)
        .unwrap();
    clock.set(later);
    assert_eq!(clock.now(), later);
    assert_eq!(clock.now().hour(), 15);
}

#[test]
fn test_system_clock_hour_in_range() {
    assert!(SystemClock.now().hour() < 24);
}
