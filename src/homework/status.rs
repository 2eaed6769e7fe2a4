//! Review verdicts for homework status codes
//!
//! The phrases are user-facing and must match exactly.

/// Known homework review status
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// Look up a status by its API code, `None` for unknown codes
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(HomeworkStatus::Approved),
            "reviewing" => Some(HomeworkStatus::Reviewing),
            "rejected" => Some(HomeworkStatus::Rejected),
            _ => None,
        }
    }

    /// Status code as sent by the API
    pub fn code(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Human-readable verdict
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Work reviewed: the reviewer liked everything.",
            HomeworkStatus::Reviewing => "Work has been taken up for review.",
            HomeworkStatus::Rejected => "Work reviewed: the reviewer has comments.",
        }
    }
}
