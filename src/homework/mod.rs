//! Homework status data source: API client, response checks and formatting

pub mod api;
pub mod formatter;
pub mod status;
pub mod timestamp;
pub mod validator;

pub use api::{ApiClient, StatusSource};
pub use formatter::{failure_message, parse_status, status_message};
pub use status::HomeworkStatus;
pub use timestamp::{homework_timestamp, parse_date_updated, DATE_UPDATED_FORMAT};
pub use validator::{check_response, current_date};
