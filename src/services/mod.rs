//! External collaborators: market data, universe discovery and notifications.

pub mod discovery;
pub mod error;
pub mod http;
pub mod market_data;
pub mod notifier;
pub mod yahoo;

pub use discovery::{FinvizScreener, UniverseDiscovery};
pub use error::ServiceError;
pub use market_data::{FundamentalsProvider, PriceHistoryProvider};
pub use notifier::{LogNotifier, Notifier, TelegramNotifier};
pub use yahoo::YahooFinanceClient;
