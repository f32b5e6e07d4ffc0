use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResidentStatus {
    Active,
    Inactive,
    Pending,
    #[serde(other)]
    Unknown,
}

impl ResidentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResidentStatus::Active => "ACTIVE",
            ResidentStatus::Inactive => "INACTIVE",
            ResidentStatus::Pending => "PENDING",
            ResidentStatus::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nic: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default, with = "crate::models::date")]
    pub join_date: Option<NaiveDate>,
    #[serde(default, with = "crate::models::date")]
    pub leave_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<ResidentStatus>,
    #[serde(default)]
    pub room_id: Option<u64>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub room_type: Option<String>,
}

impl Resident {
    pub fn is_active(&self) -> bool {
        self.status == Some(ResidentStatus::Active)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}
