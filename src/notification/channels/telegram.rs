//! Telegram Bot API channel
//!
//! `POST {api_url}/bot{token}/sendMessage` with `{"chat_id", "text"}`.

use crate::config::Config;
use crate::error::DeliveryError;
use crate::notification::channel::NotificationChannel;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const CHANNEL_NAME: &str = "telegram";

/// Telegram channel config
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API base URL
    pub api_url: String,
    pub bot_token: String,
    /// Recipient chat id
    pub chat_id: String,
    /// `None` leaves the timeout to the transport
    pub timeout_secs: Option<u64>,
}

impl From<&Config> for TelegramConfig {
    fn from(config: &Config) -> Self {
        Self {
            api_url: config.telegram_api_url.clone(),
            bot_token: config.telegram_token.clone(),
            chat_id: config.telegram_chat_id.clone(),
            timeout_secs: config.request_timeout_secs,
        }
    }
}

/// sendMessage request body
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Bot API response envelope
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram channel
#[derive(Debug)]
pub struct TelegramChannel {
    client: Client,
    config: TelegramConfig,
}

impl TelegramChannel {
    pub fn new(config: TelegramConfig) -> Result<Self> {
        if config.bot_token.is_empty() {
            return Err(anyhow!("Telegram bot token is required"));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    pub fn chat_id(&self) -> &str {
        &self.config.chat_id
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_url.trim_end_matches('/'),
            self.config.bot_token
        )
    }

    fn failure(&self, reason: impl Into<String>) -> DeliveryError {
        DeliveryError::new(CHANNEL_NAME, reason)
    }
}

#[async_trait]
impl NotificationChannel for TelegramChannel {
    fn name(&self) -> &str {
        CHANNEL_NAME
    }

    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        let payload = SendMessageRequest {
            chat_id: &self.config.chat_id,
            text,
        };

        // without_url(): the request URL embeds the bot token
        let response = self
            .client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.failure(format!("HTTP request failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.failure(format!("Failed to read response: {}", e.without_url())))?;

        match serde_json::from_str::<TelegramResponse>(&body) {
            Ok(resp) if resp.ok && status.is_success() => {
                debug!(chat_id = %self.config.chat_id, "Telegram message delivered");
                Ok(())
            }
            Ok(resp) => Err(self.failure(format!(
                "Bot API error ({}): {}",
                status,
                resp.description.unwrap_or_else(|| "Unknown error".to_string())
            ))),
            Err(_) if !status.is_success() => {
                Err(self.failure(format!("Bot API error ({})", status)))
            }
            Err(e) => Err(self.failure(format!("Failed to parse response: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TelegramConfig {
        TelegramConfig {
            api_url: "https://api.telegram.org/".to_string(),
            bot_token: "123:abc".to_string(),
            chat_id: "42".to_string(),
            timeout_secs: Some(30),
        }
    }

    #[test]
    fn test_requires_token() {
        let result = TelegramChannel::new(TelegramConfig {
            bot_token: String::new(),
            ..config()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_send_message_url() {
        let channel = TelegramChannel::new(config()).unwrap();
        assert_eq!(
            channel.send_message_url(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
        assert_eq!(channel.name(), "telegram");
        assert_eq!(channel.chat_id(), "42");
    }

    #[test]
    fn test_config_from_app_config() {
        let app = Config::new("p", "bot-token", "777");
        let config = TelegramConfig::from(&app);
        assert_eq!(config.bot_token, "bot-token");
        assert_eq!(config.chat_id, "777");
        assert_eq!(config.api_url, crate::config::DEFAULT_TELEGRAM_API_URL);
        assert_eq!(config.timeout_secs, None);
    }
}
