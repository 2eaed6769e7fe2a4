//! Status-change message formatting

use super::status::HomeworkStatus;
use crate::error::FormatError;
use serde_json::Value;

/// Build the status-change message for one homework record
///
/// Output: `Changed status for "<name>". <verdict>`
pub fn parse_status(homework: &Value) -> Result<String, FormatError> {
    let name = homework
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(FormatError::MissingField("homework_name"))?;
    let code = match homework.get("status") {
        None | Some(Value::Null) => return Err(FormatError::MissingField("status")),
        Some(Value::String(code)) => code.as_str(),
        Some(other) => return Err(FormatError::UnknownStatus(other.to_string())),
    };
    let status = HomeworkStatus::from_code(code)
        .ok_or_else(|| FormatError::UnknownStatus(code.to_string()))?;

    Ok(status_message(name, status))
}

pub fn status_message(name: &str, status: HomeworkStatus) -> String {
    format!("Changed status for \"{}\". {}", name, status.verdict())
}

/// Operational failure notice
pub fn failure_message(description: &str) -> String {
    format!("Program failure: {}", description)
}
