use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisitStatus {
    New,
    Contacted,
    Closed,
    #[serde(other)]
    Unknown,
}

impl VisitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitStatus::New => "NEW",
            VisitStatus::Contacted => "CONTACTED",
            VisitStatus::Closed => "CLOSED",
            VisitStatus::Unknown => "UNKNOWN",
        }
    }
}

impl std::str::FromStr for VisitStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NEW" => Ok(VisitStatus::New),
            "CONTACTED" => Ok(VisitStatus::Contacted),
            "CLOSED" => Ok(VisitStatus::Closed),
            _ => Err(format!(
                "unknown visit status '{}' (expected NEW, CONTACTED or CLOSED)",
                s
            )),
        }
    }
}

/// Prospective-resident visit request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: u64,
    #[serde(default)]
    pub visitor_name: Option<String>,
    #[serde(default)]
    pub visitor_contact: Option<String>,
    #[serde(default)]
    pub visitor_email: Option<String>,
    #[serde(default)]
    pub preferred_room_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, with = "crate::models::date")]
    pub visit_date: Option<NaiveDate>,
    #[serde(default)]
    pub visit_time: Option<String>,
    #[serde(default)]
    pub status: Option<VisitStatus>,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

impl Visit {
    pub fn is_new(&self) -> bool {
        self.status == Some(VisitStatus::New)
    }
}
