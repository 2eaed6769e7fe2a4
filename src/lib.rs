//! Homework Status Bot - polls the homework review API and relays status
//! changes to a Telegram chat

pub mod config;
pub mod error;
pub mod homework;
pub mod notification;
pub mod poller;

pub use config::Config;
pub use error::{ApiError, ConfigError, DeliveryError, FormatError, PollError, ShapeError, TimestampError};
pub use homework::{ApiClient, HomeworkStatus, StatusSource};
pub use notification::{NotificationChannel, TelegramChannel, TelegramConfig};
pub use poller::{FailureNotice, IterationReport, PollLoop, PollState};
