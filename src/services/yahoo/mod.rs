//! Yahoo Finance price history and fundamentals.

pub mod client;
pub mod response;

pub use client::YahooFinanceClient;
