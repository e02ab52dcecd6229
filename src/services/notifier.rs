//! Notification sinks for alert messages.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::TelegramConfig;
use crate::services::error::ServiceError;
use crate::services::http::build_api_client;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one plain-text message.
    async fn send(&self, message: &str) -> Result<(), ServiceError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Posts messages through the Telegram Bot API.
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_url: String,
    bot_token: SecretString,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig, timeout: Duration) -> Result<Self, ServiceError> {
        Ok(Self::with_client(config, build_api_client(timeout)?))
    }

    pub fn with_client(config: TelegramConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            bot_token: config.bot_token,
            chat_id: config.chat_id,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &str) -> Result<(), ServiceError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.api_url,
            self.bot_token.expose_secret()
        );
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text: message,
        };

        // The token is part of the URL, so transport errors are stripped of it.
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.without_url()))?;
        let status = response.status();
        let body: BotApiResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Request(e.without_url()))?;

        if !status.is_success() || !body.ok {
            return Err(ServiceError::Api(format!(
                "sendMessage failed with status {}: {}",
                status,
                body.description.unwrap_or_else(|| "no description".to_string())
            )));
        }

        debug!(chat_id = %self.chat_id, chars = message.chars().count(), "Telegram: message delivered");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}

/// Writes messages to the log; used when no sink credentials are configured.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: &str) -> Result<(), ServiceError> {
        info!(target: "stock_advisor::notification", "{}", message);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
