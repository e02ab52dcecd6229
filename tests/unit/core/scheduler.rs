//! Unit tests for interval to cron conversion

use cron::Schedule;
use std::str::FromStr;
use stock_advisor::core::scheduler::cron_expression;

#[test]
fn test_hourly_intervals() {
    assert_eq!(cron_expression(3600).unwrap(), "0 0 */1 * * *");
    assert_eq!(cron_expression(7200).unwrap(), "0 0 */2 * * *");
    assert_eq!(cron_expression(86_400).unwrap(), "0 0 0 * * *");
}

#[test]
fn test_minute_and_second_intervals() {
    assert_eq!(cron_expression(300).unwrap(), "0 */5 * * * *");
    assert_eq!(cron_expression(30).unwrap(), "*/30 * * * * *");
}

#[test]
fn test_rejected_intervals() {
    assert!(cron_expression(0).is_err());
    assert!(cron_expression(90).is_err());
    assert!(cron_expression(172_800).is_err());
}

#[test]
fn test_expressions_parse() {
    for interval in [30, 300, 3600, 7200, 86_400] {
        let expr = cron_expression(interval).unwrap();
        assert!(Schedule::from_str(&expr).is_ok(), "failed to parse {}", expr);
    }
}
