use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
    #[serde(other)]
    Unknown,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "PRESENT",
            AttendanceStatus::Absent => "ABSENT",
            AttendanceStatus::Leave => "LEAVE",
            AttendanceStatus::Unknown => "UNKNOWN",
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PRESENT" => Ok(AttendanceStatus::Present),
            "ABSENT" => Ok(AttendanceStatus::Absent),
            "LEAVE" => Ok(AttendanceStatus::Leave),
            _ => Err(format!(
                "unknown attendance status '{}' (expected PRESENT, ABSENT or LEAVE)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: u64,
    #[serde(default)]
    pub resident_id: Option<u64>,
    #[serde(default)]
    pub resident_name: Option<String>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default, with = "crate::models::date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<AttendanceStatus>,
    #[serde(default)]
    pub check_in_time: Option<String>,
    #[serde(default)]
    pub check_out_time: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// `attendance/stats` payload: counts for the backend's current day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceStats {
    #[serde(with = "crate::models::date")]
    pub date: Option<NaiveDate>,
    pub present: u64,
    pub absent: u64,
    pub leave: u64,
    pub total: u64,
}
