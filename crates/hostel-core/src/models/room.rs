use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
    #[serde(other)]
    Unknown,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "AVAILABLE",
            RoomStatus::Occupied => "OCCUPIED",
            RoomStatus::Maintenance => "MAINTENANCE",
            RoomStatus::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: u64,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub price_per_month: Option<f64>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub current_occupancy: Option<u32>,
    #[serde(default)]
    pub available_spots: Option<u32>,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: Option<RoomStatus>,
}

impl Room {
    pub fn is_available(&self) -> bool {
        self.status == Some(RoomStatus::Available)
    }

    /// `101 (SINGLE)` style label used in pickers.
    pub fn label(&self) -> String {
        let number = self.room_number.as_deref().unwrap_or("?");
        match self.room_type.as_deref() {
            Some(kind) => format!("{} ({})", number, kind),
            None => number.to_string(),
        }
    }
}
