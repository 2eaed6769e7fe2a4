//! Homework status API client
//!
//! One GET per poll: `OAuth` authorization header plus the `from_date` cursor.
//! The decoded body is returned as-is; shape checks live in `validator`.

use crate::config::Config;
use crate::error::ApiError;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

/// Source of raw homework status responses
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch every homework updated since `from_date` (unix seconds)
    async fn fetch(&self, from_date: i64) -> Result<Value, ApiError>;
}

/// HTTP client for the homework status API
pub struct ApiClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| anyhow!("Cannot create HTTP client: {}", e))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token: config.practicum_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn network_error(&self, from_date: i64, source: reqwest::Error) -> ApiError {
        ApiError::Network {
            endpoint: self.endpoint.clone(),
            from_date,
            source,
        }
    }
}

#[async_trait]
impl StatusSource for ApiClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, ApiError> {
        debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let start = Instant::now();
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| self.network_error(from_date, e))?;

        let status = response.status();
        debug!(%status, elapsed_ms = start.elapsed().as_millis(), "API request completed");

        if !status.is_success() {
            return Err(ApiError::RemoteStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.network_error(from_date, e))?;

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_uses_configured_endpoint() {
        let mut config = Config::new("p", "t", "1");
        config.endpoint = "http://localhost:9/api/".to_string();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9/api/");
    }
}
