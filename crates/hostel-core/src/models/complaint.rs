use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    Pending,
    InProgress,
    Resolved,
    #[serde(other)]
    Unknown,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "PENDING",
            ComplaintStatus::InProgress => "IN_PROGRESS",
            ComplaintStatus::Resolved => "RESOLVED",
            ComplaintStatus::Unknown => "UNKNOWN",
        }
    }
}

impl std::str::FromStr for ComplaintStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "PENDING" => Ok(ComplaintStatus::Pending),
            "IN_PROGRESS" => Ok(ComplaintStatus::InProgress),
            "RESOLVED" => Ok(ComplaintStatus::Resolved),
            _ => Err(format!(
                "unknown complaint status '{}' (expected PENDING, IN_PROGRESS or RESOLVED)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintPriority {
    Low,
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

impl ComplaintPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintPriority::Low => "LOW",
            ComplaintPriority::Medium => "MEDIUM",
            ComplaintPriority::High => "HIGH",
            ComplaintPriority::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: u64,
    #[serde(default)]
    pub resident_id: Option<u64>,
    #[serde(default)]
    pub resident_name: Option<String>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<ComplaintPriority>,
    #[serde(default)]
    pub status: Option<ComplaintStatus>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default, with = "crate::models::date")]
    pub complaint_date: Option<NaiveDate>,
    #[serde(default, with = "crate::models::date")]
    pub resolved_date: Option<NaiveDate>,
}

impl Complaint {
    /// Anything not resolved counts as open, including an unknown status.
    pub fn is_open(&self) -> bool {
        self.status != Some(ComplaintStatus::Resolved)
    }
}
