//! Typed edit forms and their JSON payloads.
//!
//! `from_record` copies a record's editable fields unchanged, so submitting an
//! untouched edit form writes back exactly what was loaded. Defaults such as
//! today's date or a `PENDING` status are applied only by the `new_*`
//! constructors.

use chrono::NaiveDate;
use serde_json::{Value, json};

use crate::models::attendance::AttendanceStatus;
use crate::models::cleaning::{CleaningTask, CompletionStatus};
use crate::models::payment::{Payment, PaymentMethod, PaymentStatus};
use crate::models::resident::{Resident, ResidentStatus};
use crate::models::room::{Room, RoomStatus};

fn date_value(date: Option<NaiveDate>) -> Value {
    match date {
        Some(date) => Value::String(date.format("%Y-%m-%d").to_string()),
        None => Value::Null,
    }
}

fn text_or_null(text: &Option<String>) -> Value {
    match text.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Value::String(text.to_string()),
        _ => Value::Null,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomForm {
    pub room_number: String,
    pub room_type: String,
    pub price_per_month: Option<f64>,
    pub capacity: Option<u32>,
    /// Comma separated, the way the backend accepts it on write.
    pub facilities: String,
    pub image_url: String,
    pub status: RoomStatus,
}

impl RoomForm {
    pub fn new_room(room_number: impl Into<String>, room_type: impl Into<String>) -> Self {
        Self {
            room_number: room_number.into(),
            room_type: room_type.into(),
            price_per_month: None,
            capacity: None,
            facilities: String::new(),
            image_url: String::new(),
            status: RoomStatus::Available,
        }
    }

    pub fn from_record(room: &Room) -> Self {
        Self {
            room_number: room.room_number.clone().unwrap_or_default(),
            room_type: room.room_type.clone().unwrap_or_default(),
            price_per_month: room.price_per_month,
            capacity: room.capacity,
            facilities: room.facilities.join(","),
            image_url: room.image_url.clone().unwrap_or_default(),
            status: room.status.unwrap_or(RoomStatus::Available),
        }
    }

    pub fn to_payload(&self) -> Value {
        json!({
            "roomNumber": self.room_number,
            "roomType": self.room_type,
            "pricePerMonth": self.price_per_month,
            "capacity": self.capacity,
            "facilities": self.facilities,
            "imageUrl": self.image_url,
            "status": self.status.as_str(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResidentForm {
    pub name: String,
    pub nic: String,
    pub contact: String,
    pub email: String,
    pub course: String,
    pub status: ResidentStatus,
    pub rating: Option<u8>,
    pub join_date: Option<NaiveDate>,
}

impl ResidentForm {
    /// New resident: rating 3, joining today, active.
    pub fn new_resident(name: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            name: name.into(),
            nic: String::new(),
            contact: String::new(),
            email: String::new(),
            course: String::new(),
            status: ResidentStatus::Active,
            rating: Some(3),
            join_date: Some(today),
        }
    }

    pub fn from_record(resident: &Resident) -> Self {
        Self {
            name: resident.name.clone().unwrap_or_default(),
            nic: resident.nic.clone().unwrap_or_default(),
            contact: resident.contact.clone().unwrap_or_default(),
            email: resident.email.clone().unwrap_or_default(),
            course: resident.course.clone().unwrap_or_default(),
            status: resident.status.unwrap_or(ResidentStatus::Active),
            rating: resident.rating,
            join_date: resident.join_date,
        }
    }

    pub fn to_payload(&self) -> Value {
        json!({
            "name": self.name,
            "nic": self.nic,
            "contact": self.contact,
            "email": self.email,
            "course": self.course,
            "status": self.status.as_str(),
            "rating": self.rating,
            "joinDate": date_value(self.join_date),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentForm {
    pub resident_id: Option<u64>,
    pub month: String,
    pub amount: f64,
    pub food_charge: f64,
    pub late_fee: f64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub payment_date: Option<NaiveDate>,
    pub paid_date: Option<NaiveDate>,
}

impl PaymentForm {
    /// New invoice: pending, dated today, cash by default.
    pub fn new_payment(resident_id: u64, month: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            resident_id: Some(resident_id),
            month: month.into(),
            amount: 0.0,
            food_charge: 0.0,
            late_fee: 0.0,
            method: PaymentMethod::Cash,
            status: PaymentStatus::Pending,
            payment_date: Some(today),
            paid_date: None,
        }
    }

    pub fn from_record(payment: &Payment) -> Self {
        Self {
            resident_id: payment.resident_id,
            month: payment.month.clone().unwrap_or_default(),
            amount: payment.amount.unwrap_or(0.0),
            food_charge: payment.food_charge.unwrap_or(0.0),
            late_fee: payment.late_fee.unwrap_or(0.0),
            method: payment.method.unwrap_or(PaymentMethod::Cash),
            status: payment.status.unwrap_or(PaymentStatus::Pending),
            payment_date: payment.payment_date,
            paid_date: payment.paid_date,
        }
    }

    pub fn total(&self) -> f64 {
        self.amount + self.food_charge + self.late_fee
    }

    pub fn to_payload(&self) -> Value {
        json!({
            "residentId": self.resident_id,
            "month": self.month,
            "amount": self.amount,
            "foodCharge": self.food_charge,
            "lateFee": self.late_fee,
            "total": self.total(),
            "method": self.method.as_str(),
            "status": self.status.as_str(),
            "paymentDate": date_value(self.payment_date),
            "paidDate": date_value(self.paid_date),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleaningForm {
    pub area: String,
    pub day_of_week: String,
    pub time_slot: String,
    pub assigned_staff: String,
    pub notes: Option<String>,
    pub completion_status: CompletionStatus,
}

impl CleaningForm {
    pub fn new_task(
        area: impl Into<String>,
        day_of_week: impl Into<String>,
        time_slot: impl Into<String>,
        assigned_staff: impl Into<String>,
    ) -> Self {
        Self {
            area: area.into(),
            day_of_week: day_of_week.into(),
            time_slot: time_slot.into(),
            assigned_staff: assigned_staff.into(),
            notes: None,
            completion_status: CompletionStatus::Pending,
        }
    }

    pub fn from_record(task: &CleaningTask) -> Self {
        Self {
            area: task.area.clone().unwrap_or_default(),
            day_of_week: task.day_of_week.clone().unwrap_or_default(),
            time_slot: task.time_slot.clone().unwrap_or_default(),
            assigned_staff: task.assigned_staff.clone().unwrap_or_default(),
            notes: task.notes.clone(),
            completion_status: task.completion_status.unwrap_or(CompletionStatus::Pending),
        }
    }

    pub fn to_payload(&self) -> Value {
        json!({
            "area": self.area,
            "dayOfWeek": self.day_of_week,
            "timeSlot": self.time_slot,
            "assignedStaff": self.assigned_staff,
            "notes": text_or_null(&self.notes),
            "completionStatus": self.completion_status.as_str(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceForm {
    pub resident_id: u64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub remarks: Option<String>,
}

impl AttendanceForm {
    pub fn new_record(resident_id: u64, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            resident_id,
            date,
            status,
            check_in_time: None,
            check_out_time: None,
            remarks: None,
        }
    }

    /// Empty optional fields are sent as `null`.
    pub fn to_payload(&self) -> Value {
        json!({
            "residentId": self.resident_id,
            "date": date_value(Some(self.date)),
            "status": self.status.as_str(),
            "checkInTime": text_or_null(&self.check_in_time),
            "checkOutTime": text_or_null(&self.check_out_time),
            "remarks": text_or_null(&self.remarks),
        })
    }
}
