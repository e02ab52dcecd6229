//! Unit tests for the log-only notification sink

use stock_advisor::services::{LogNotifier, Notifier};
use tokio_test::{assert_ok, block_on};

#[test]
fn test_log_notifier_accepts_messages() {
    let sink = LogNotifier;
    assert_ok!(block_on(sink.send("⏰ 3PM Market Open: No strong buy picks right now.")));
    assert_eq!(sink.name(), "log");
}
