use serde::{Deserialize, Serialize};

/// Cleaning tasks use title-case status strings, unlike the other entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionStatus {
    Pending,
    Completed,
    #[serde(other)]
    Unknown,
}

impl CompletionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionStatus::Pending => "Pending",
            CompletionStatus::Completed => "Completed",
            CompletionStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningTask {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_staff: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_status: Option<CompletionStatus>,
}

impl CleaningTask {
    pub fn is_completed(&self) -> bool {
        self.completion_status == Some(CompletionStatus::Completed)
    }

    /// The cached task with its status flipped, as sent by "mark complete".
    pub fn completed(&self) -> CleaningTask {
        CleaningTask {
            completion_status: Some(CompletionStatus::Completed),
            ..self.clone()
        }
    }
}
