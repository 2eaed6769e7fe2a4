//! Runtime configuration
//!
//! Built once at startup and handed to the components by reference.
//!
//! Sources, lowest to highest precedence:
//! 1. compiled-in defaults
//! 2. JSON file `~/.config/homework-status-bot/config.json` (or an explicit path)
//! 3. environment variables `PRACTICUM_TOKEN`, `TELEGRAM_TOKEN`, `TELEGRAM_CHAT_ID`,
//!    `HWBOT_RETRY_PERIOD`, `HWBOT_ENDPOINT`

use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Homework status API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Telegram Bot API base URL
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Pause between two polls (seconds)
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;

const PRACTICUM_TOKEN_NAME: &str = "Practicum token (PRACTICUM_TOKEN)";
const TELEGRAM_TOKEN_NAME: &str = "Telegram token (TELEGRAM_TOKEN)";
const TELEGRAM_CHAT_ID_NAME: &str = "Telegram chat id (TELEGRAM_CHAT_ID)";

/// Fully resolved configuration
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Credential for the homework status API
    pub practicum_token: String,
    /// Telegram bot token
    pub telegram_token: String,
    /// Recipient chat
    pub telegram_chat_id: String,
    pub endpoint: String,
    pub telegram_api_url: String,
    pub retry_period_secs: u64,
    /// HTTP request timeout; `None` leaves it to the transport
    pub request_timeout_secs: Option<u64>,
}

// Tokens stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_period_secs", &self.retry_period_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// On-disk config, every field optional
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    practicum_token: Option<String>,
    telegram_token: Option<String>,
    telegram_chat_id: Option<String>,
    endpoint: Option<String>,
    telegram_api_url: Option<String>,
    retry_period_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
}

impl Config {
    /// Config with the three required values and defaults for the rest
    pub fn new(
        practicum_token: impl Into<String>,
        telegram_token: impl Into<String>,
        telegram_chat_id: impl Into<String>,
    ) -> Self {
        Self {
            practicum_token: practicum_token.into(),
            telegram_token: telegram_token.into(),
            telegram_chat_id: telegram_chat_id.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
            retry_period_secs: DEFAULT_RETRY_PERIOD_SECS,
            request_timeout_secs: None,
        }
    }

    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/homework-status-bot/config.json"))
    }

    /// Load from the config file and the process environment
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`] with a custom environment lookup
    pub fn load_with<F>(path: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match path {
            Some(path) => read_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => read_file(&default)?,
                _ => FileConfig::default(),
            },
        };

        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let pick = |key: &str, from_file: Option<String>| {
            lookup(key).or(from_file.filter(|v| !v.trim().is_empty()))
        };

        let practicum_token = pick("PRACTICUM_TOKEN", file.practicum_token);
        let telegram_token = pick("TELEGRAM_TOKEN", file.telegram_token);
        let telegram_chat_id = pick("TELEGRAM_CHAT_ID", file.telegram_chat_id);

        let mut missing = Vec::new();
        if practicum_token.is_none() {
            missing.push(PRACTICUM_TOKEN_NAME);
        }
        if telegram_token.is_none() {
            missing.push(TELEGRAM_TOKEN_NAME);
        }
        if telegram_chat_id.is_none() {
            missing.push(TELEGRAM_CHAT_ID_NAME);
        }
        let (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) =
            (practicum_token, telegram_token, telegram_chat_id)
        else {
            return Err(ConfigError::MissingCredentials(missing));
        };

        let mut config = Self::new(practicum_token, telegram_token, telegram_chat_id);

        if let Some(endpoint) = pick("HWBOT_ENDPOINT", file.endpoint) {
            config.endpoint = endpoint;
        }
        if let Some(url) = file.telegram_api_url.filter(|u| !u.is_empty()) {
            config.telegram_api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = file.retry_period_secs {
            config.retry_period_secs = validate_retry_period("retry_period_secs", secs)?;
        }
        if let Some(raw) = lookup("HWBOT_RETRY_PERIOD") {
            let secs = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "HWBOT_RETRY_PERIOD",
                value: raw.clone(),
            })?;
            config.retry_period_secs = validate_retry_period("HWBOT_RETRY_PERIOD", secs)?;
        }
        if file.request_timeout_secs.is_some() {
            config.request_timeout_secs = file.request_timeout_secs;
        }

        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// A zero period would poll the API in a tight loop
fn validate_retry_period(name: &'static str, secs: u64) -> Result<u64, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            name,
            value: secs.to_string(),
        });
    }
    Ok(secs)
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Read config file");
    Ok(config)
}
