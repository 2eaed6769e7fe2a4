//! Response shape check
//!
//! Only the envelope is checked here; single homeworks are checked later so a
//! broken record does not discard its siblings.

use crate::error::ShapeError;
use serde_json::Value;

/// Return the `homeworks` list of a decoded API response
pub fn check_response(response: &Value) -> Result<&[Value], ShapeError> {
    let root = response.as_object().ok_or(ShapeError::NotAMapping)?;
    let homeworks = root.get("homeworks").ok_or(ShapeError::MissingHomeworks)?;
    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or(ShapeError::HomeworksNotASequence)
}

/// Server-reported `current_date`, if present and an integer
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}
