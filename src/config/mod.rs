//! Process configuration read from the environment.
//!
//! Every knob has a default except the notification credentials; without
//! them alerts are only logged.

pub mod signal;

pub use signal::SignalConfig;

use secrecy::SecretString;
use std::env;
use thiserror::Error;
use url::Url;

use crate::models::price::LookbackPeriod;

pub const DEFAULT_WATCHLIST: &[&str] = &[
    "RR.L", "NVDA", "AMD", "LITE", "MP", "FWRG", "AAPL", "MSFT", "GOOGL", "META", "AVGO",
];

pub const DEFAULT_DIP_ONLY_SYMBOLS: &[&str] = &[
    "TSLA", "PLTR", "SNOW", "CRM", "ORCL", "BIDU", "INTC", // tech
    "JPM", "BAC", "WFC", "GS", "MS", "C", // banks
    "XOM", "CVX", "COP", "EOG", "PSX", // energy
    "LMT", "NOC", "RTX", "GD", "BA", "HII", "BWXT", // defense
];

pub const DEFAULT_DISCOVERY_SECTORS: &[&str] = &["defense", "energy", "technology"];

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_YAHOO_COOKIE_URL: &str = "https://fc.yahoo.com";
pub const DEFAULT_FINVIZ_BASE_URL: &str = "https://finviz.com";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("incomplete configuration: {0}")]
    Incomplete(String),
}

/// Deployment environment name (`production`, `sandbox`, ...).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Credentials and endpoint for the Telegram sink.
#[derive(Debug)]
pub struct TelegramConfig {
    pub bot_token: SecretString,
    pub chat_id: String,
    pub api_url: String,
}

#[derive(Debug)]
pub struct AdvisorConfig {
    pub watchlist: Vec<String>,
    pub dip_only_symbols: Vec<String>,
    pub discovery_sectors: Vec<String>,
    pub evaluation_interval_seconds: u64,
    /// Local hour (0-23) whose cycle sends the daily summary.
    pub summary_hour: u32,
    pub lookback: LookbackPeriod,
    pub http_timeout_seconds: u64,
    pub yahoo_base_url: String,
    /// Page that sets the session cookie required by the quote API.
    pub yahoo_cookie_url: String,
    pub finviz_base_url: String,
    pub telegram: Option<TelegramConfig>,
    pub port: Option<u16>,
    pub run_once: bool,
    pub signal: SignalConfig,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            watchlist: to_owned_list(DEFAULT_WATCHLIST),
            dip_only_symbols: to_owned_list(DEFAULT_DIP_ONLY_SYMBOLS),
            discovery_sectors: to_owned_list(DEFAULT_DISCOVERY_SECTORS),
            evaluation_interval_seconds: 3600,
            summary_hour: 15,
            lookback: LookbackPeriod::default(),
            http_timeout_seconds: 30,
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            yahoo_cookie_url: DEFAULT_YAHOO_COOKIE_URL.to_string(),
            finviz_base_url: DEFAULT_FINVIZ_BASE_URL.to_string(),
            telegram: None,
            port: None,
            run_once: false,
            signal: SignalConfig::default(),
        }
    }
}

impl AdvisorConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns the raw value of a key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get("WATCHLIST") {
            config.watchlist = parse_symbols(&raw);
        }
        if let Some(raw) = get("DIP_ONLY_SYMBOLS") {
            config.dip_only_symbols = parse_symbols(&raw);
        }
        // An explicitly empty value turns discovery off.
        if let Some(raw) = lookup("DISCOVERY_SECTORS") {
            config.discovery_sectors = parse_list(&raw)
                .into_iter()
                .map(|s| s.to_ascii_lowercase())
                .collect();
        }

        if let Some(raw) = get("EVAL_INTERVAL_SECONDS") {
            let interval: u64 = parse_number("EVAL_INTERVAL_SECONDS", &raw)?;
            if interval == 0 {
                return Err(invalid("EVAL_INTERVAL_SECONDS", &raw, "must be greater than zero"));
            }
            config.evaluation_interval_seconds = interval;
        }

        if let Some(raw) = get("SUMMARY_HOUR") {
            let hour: u32 = parse_number("SUMMARY_HOUR", &raw)?;
            if hour > 23 {
                return Err(invalid("SUMMARY_HOUR", &raw, "must be between 0 and 23"));
            }
            config.summary_hour = hour;
        }

        if let Some(raw) = get("HISTORY_RANGE") {
            config.lookback = raw
                .parse()
                .map_err(|reason: String| invalid("HISTORY_RANGE", &raw, &reason))?;
        }

        if let Some(raw) = get("HTTP_TIMEOUT_SECONDS") {
            let timeout: u64 = parse_number("HTTP_TIMEOUT_SECONDS", &raw)?;
            if timeout == 0 {
                return Err(invalid("HTTP_TIMEOUT_SECONDS", &raw, "must be greater than zero"));
            }
            config.http_timeout_seconds = timeout;
        }

        if let Some(raw) = get("YAHOO_BASE_URL") {
            config.yahoo_base_url = parse_base_url("YAHOO_BASE_URL", &raw)?;
        }
        if let Some(raw) = get("YAHOO_COOKIE_URL") {
            config.yahoo_cookie_url = parse_base_url("YAHOO_COOKIE_URL", &raw)?;
        }
        if let Some(raw) = get("FINVIZ_BASE_URL") {
            config.finviz_base_url = parse_base_url("FINVIZ_BASE_URL", &raw)?;
        }

        let api_url = match get("TELEGRAM_API_URL") {
            Some(raw) => parse_base_url("TELEGRAM_API_URL", &raw)?,
            None => DEFAULT_TELEGRAM_API_URL.to_string(),
        };
        config.telegram = match (get("TELEGRAM_BOT_TOKEN"), get("TELEGRAM_CHAT_ID")) {
            (Some(token), Some(chat_id)) => Some(TelegramConfig {
                bot_token: SecretString::new(token.trim().to_string().into()),
                chat_id: chat_id.trim().to_string(),
                api_url,
            }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::Incomplete(
                    "TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID must be set together".to_string(),
                ))
            }
        };

        if let Some(raw) = get("PORT") {
            config.port = Some(parse_number("PORT", &raw)?);
        }

        if let Some(raw) = get("RUN_ONCE") {
            config.run_once = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(invalid("RUN_ONCE", &raw, "expected true or false")),
            };
        }

        config
            .signal
            .validate()
            .map_err(ConfigError::Incomplete)?;

        Ok(config)
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn parse_list(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !out.iter().any(|existing| existing == item) {
            out.push(item.to_string());
        }
    }
    out
}

/// Split a comma-separated symbol list, upper-casing and dropping repeats.
pub fn parse_symbols(raw: &str) -> Vec<String> {
    parse_list(&raw.to_ascii_uppercase())
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| invalid(key, raw, &e.to_string()))
}

fn parse_base_url(key: &'static str, raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| invalid(key, raw, &e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(key, raw, "scheme must be http or https"));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
