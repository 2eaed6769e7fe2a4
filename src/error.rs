//! Error taxonomy for the poller
//!
//! - `ConfigError`: startup-fatal, checked once before the loop starts
//! - `ApiError` / `ShapeError`: iteration-level, the batch is not trusted
//! - `TimestampError` / `FormatError`: item-level, only that homework is skipped
//! - `DeliveryError`: the chat message was not delivered

use std::path::PathBuf;

/// Failure of the remote status API call
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout, DNS, ...)
    #[error("request to {endpoint} with from_date={from_date} failed: {source}")]
    Network {
        endpoint: String,
        from_date: i64,
        #[source]
        source: reqwest::Error,
    },

    /// Completed request with a non-success HTTP status
    #[error("API returned status {status}")]
    RemoteStatus { status: u16 },

    /// Successful status but the body is not JSON
    #[error("API response is not valid JSON: {0}")]
    Decode(String),
}

/// Response root failed the shape check
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("not a mapping")]
    NotAMapping,
    #[error("missing homeworks")]
    MissingHomeworks,
    #[error("homeworks not a sequence")]
    HomeworksNotASequence,
}

/// A single homework could not be turned into a message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("homework is missing field \"{0}\"")]
    MissingField(&'static str),
    #[error("unknown homework status: {0}")]
    UnknownStatus(String),
}

/// `date_updated` of a single homework is absent or malformed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("homework has no date_updated")]
    Missing,
    #[error("cannot parse date_updated {value:?}: {reason}")]
    Malformed { value: String, reason: String },
}

/// The notification channel did not deliver the message
#[derive(Debug, thiserror::Error)]
#[error("failed to deliver message via {channel}: {reason}")]
pub struct DeliveryError {
    pub channel: String,
    pub reason: String,
}

impl DeliveryError {
    pub fn new(channel: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            reason: reason.into(),
        }
    }
}

/// Iteration-operational failure: the whole batch is abandoned and retried
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid API response: {0}")]
    Shape(#[from] ShapeError),
}

/// Configuration could not be assembled
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required configuration: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("cannot read config file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}
