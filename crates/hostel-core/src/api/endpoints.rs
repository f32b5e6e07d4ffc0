//! Request builders for the backend's REST catalog.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::api::request::ApiRequest;

/// Top-level REST resources, each supporting list/get/create/update/delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Rooms,
    Residents,
    Payments,
    Complaints,
    Visits,
    Attendance,
    Food,
    Cleaning,
}

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::Rooms,
        Resource::Residents,
        Resource::Payments,
        Resource::Complaints,
        Resource::Visits,
        Resource::Attendance,
        Resource::Food,
        Resource::Cleaning,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Resource::Rooms => "rooms",
            Resource::Residents => "residents",
            Resource::Payments => "payments",
            Resource::Complaints => "complaints",
            Resource::Visits => "visits",
            Resource::Attendance => "attendance",
            Resource::Food => "food",
            Resource::Cleaning => "cleaning",
        }
    }

    /// Singular noun used in confirmation prompts.
    pub fn noun(&self) -> &'static str {
        match self {
            Resource::Rooms => "room",
            Resource::Residents => "resident",
            Resource::Payments => "payment",
            Resource::Complaints => "complaint",
            Resource::Visits => "visit",
            Resource::Attendance => "attendance record",
            Resource::Food => "food preference",
            Resource::Cleaning => "task",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.path() == s)
            .ok_or_else(|| format!("unknown resource '{}'", s))
    }
}

pub fn list(resource: Resource) -> ApiRequest {
    ApiRequest::get(resource.path())
}

pub fn get(resource: Resource, id: u64) -> ApiRequest {
    ApiRequest::get(format!("{}/{}", resource.path(), id))
}

pub fn create(resource: Resource, body: serde_json::Value) -> ApiRequest {
    ApiRequest::post(resource.path()).with_json(body)
}

pub fn update(resource: Resource, id: u64, body: serde_json::Value) -> ApiRequest {
    ApiRequest::put(format!("{}/{}", resource.path(), id)).with_json(body)
}

pub fn delete(resource: Resource, id: u64) -> ApiRequest {
    ApiRequest::delete(format!("{}/{}", resource.path(), id))
}

pub fn available_rooms() -> ApiRequest {
    ApiRequest::get("rooms/available")
}

pub fn collect_payment(payment_id: u64, method: &str) -> ApiRequest {
    ApiRequest::put(format!("payments/{}/pay", payment_id)).with_query("method", method)
}

pub fn assign_room(resident_id: u64, room_id: u64) -> ApiRequest {
    ApiRequest::put(format!("residents/{}/assign-room/{}", resident_id, room_id))
}

pub fn complaint_status(complaint_id: u64, status: &str, resolution: Option<&str>) -> ApiRequest {
    let request =
        ApiRequest::put(format!("complaints/{}/status", complaint_id)).with_query("status", status);
    match resolution {
        Some(resolution) => request.with_query("resolution", resolution),
        None => request,
    }
}

pub fn visit_status(visit_id: u64, status: &str) -> ApiRequest {
    ApiRequest::put(format!("visits/{}/status", visit_id)).with_query("status", status)
}

pub fn mark_attendance(resident_id: u64, status: &str) -> ApiRequest {
    ApiRequest::post(format!("attendance/mark/{}", resident_id)).with_query("status", status)
}

pub fn attendance_stats() -> ApiRequest {
    ApiRequest::get("attendance/stats")
}

pub fn food_stats() -> ApiRequest {
    ApiRequest::get("food/stats")
}

pub fn food_by_date(date: NaiveDate) -> ApiRequest {
    ApiRequest::get(format!("food/date/{}", date.format("%Y-%m-%d")))
}

pub fn login(body: serde_json::Value) -> ApiRequest {
    ApiRequest::post("auth/login").with_json(body)
}
