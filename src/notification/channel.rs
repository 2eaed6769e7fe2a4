//! Notification channel trait

use crate::error::DeliveryError;
use async_trait::async_trait;

/// Delivers one text message to the configured recipient
///
/// A single attempt per call. Retries belong to the poll loop.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Channel name (for logs)
    fn name(&self) -> &str;

    /// Send `text`; on error nothing was delivered
    async fn send(&self, text: &str) -> Result<(), DeliveryError>;
}
