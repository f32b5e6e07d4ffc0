use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::endpoints::Resource;
use crate::dashboard::errors::DashboardError;

/// Dashboard sections, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Dashboard,
    Rooms,
    Residents,
    Payments,
    Complaints,
    Visits,
    Attendance,
    Food,
    Cleaning,
}

impl SectionId {
    pub const ALL: [SectionId; 9] = [
        SectionId::Dashboard,
        SectionId::Rooms,
        SectionId::Residents,
        SectionId::Payments,
        SectionId::Complaints,
        SectionId::Visits,
        SectionId::Attendance,
        SectionId::Food,
        SectionId::Cleaning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Dashboard => "dashboard",
            SectionId::Rooms => "rooms",
            SectionId::Residents => "residents",
            SectionId::Payments => "payments",
            SectionId::Complaints => "complaints",
            SectionId::Visits => "visits",
            SectionId::Attendance => "attendance",
            SectionId::Food => "food",
            SectionId::Cleaning => "cleaning",
        }
    }

    /// Page title shown while the section is active.
    pub fn title(&self) -> &'static str {
        match self {
            SectionId::Dashboard => "Dashboard Overview",
            SectionId::Rooms => "Room Management",
            SectionId::Residents => "Resident Management",
            SectionId::Payments => "Payment Management",
            SectionId::Complaints => "Complaint Management",
            SectionId::Visits => "Visit Management",
            SectionId::Attendance => "Daily Attendance",
            SectionId::Food => "Food Preferences",
            SectionId::Cleaning => "Cleaning Schedule",
        }
    }

    /// Section that lists `resource`.
    pub fn for_resource(resource: Resource) -> SectionId {
        match resource {
            Resource::Rooms => SectionId::Rooms,
            Resource::Residents => SectionId::Residents,
            Resource::Payments => SectionId::Payments,
            Resource::Complaints => SectionId::Complaints,
            Resource::Visits => SectionId::Visits,
            Resource::Attendance => SectionId::Attendance,
            Resource::Food => SectionId::Food,
            Resource::Cleaning => SectionId::Cleaning,
        }
    }

    pub fn valid_names() -> String {
        SectionId::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SectionId::ALL
            .into_iter()
            .find(|section| section.as_str() == wanted)
            .ok_or_else(|| DashboardError::UnknownSection {
                name: s.to_string(),
            })
    }
}
