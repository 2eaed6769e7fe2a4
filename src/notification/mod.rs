//! Notification delivery
//!
//! All channels implement [`NotificationChannel`]; the poll loop only sees the trait.

pub mod channel;
pub mod channels;

pub use channel::NotificationChannel;
pub use channels::{TelegramChannel, TelegramConfig};
