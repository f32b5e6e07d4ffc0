//! View models produced by section loaders.
//!
//! These replace rendered markup: a front end only formats them.

use std::collections::HashSet;

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

use crate::dashboard::section::SectionId;
use crate::models::{
    Attendance, AttendanceStats, CleaningTask, Complaint, FoodPreference, FoodStats, Payment,
    Resident, Room, Visit,
};

/// Rows shown in the dashboard's pending-payments overview.
pub const PENDING_OVERVIEW_LIMIT: usize = 5;

/// Items taken from each source for "recent activities".
pub const RECENT_ACTIVITY_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Idle,
    Loading,
    Rendered,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub section: SectionId,
    pub title: String,
    pub state: LoadState,
    pub active: bool,
    /// Content of the last successful load; kept when a later load fails.
    pub content: Option<SectionContent>,
    /// Inline error marker from the last failed load.
    pub error: Option<String>,
    pub loaded_at: Option<DateTime<Local>>,
}

impl SectionView {
    pub fn idle(section: SectionId, title: impl Into<String>) -> Self {
        Self {
            section,
            title: title.into(),
            state: LoadState::Idle,
            active: false,
            content: None,
            error: None,
            loaded_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum SectionContent {
    Dashboard(DashboardSummary),
    Rooms(Vec<Room>),
    Residents(Vec<Resident>),
    Payments(PaymentsView),
    Complaints(Vec<Complaint>),
    Visits(Vec<Visit>),
    Attendance(AttendanceView),
    Food(FoodView),
    Cleaning(Vec<CleaningTask>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Complaint,
    Payment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub text: String,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_rooms: usize,
    pub available_rooms: usize,
    pub total_residents: usize,
    pub active_residents: usize,
    pub pending_payments: usize,
    pub pending_amount: f64,
    pub open_complaints: usize,
    pub new_visits: usize,
    pub recent_activities: Vec<Activity>,
    pub pending_overview: Vec<PaymentRow>,
    /// Pending payments beyond the overview limit.
    pub more_pending: usize,
}

impl DashboardSummary {
    /// Derive every counter from the fetched collections.
    pub fn build(
        rooms: &[Room],
        residents: &[Resident],
        payments: &[Payment],
        complaints: &[Complaint],
        visits: &[Visit],
    ) -> Self {
        let pending: Vec<&Payment> = payments.iter().filter(|p| p.is_pending()).collect();

        let mut recent_activities: Vec<Activity> = complaints
            .iter()
            .take(RECENT_ACTIVITY_LIMIT)
            .map(|c| Activity {
                kind: ActivityKind::Complaint,
                text: format!(
                    "Complaint: \"{}\" from {}",
                    c.title.as_deref().unwrap_or(""),
                    c.resident_name.as_deref().unwrap_or("Resident")
                ),
                date: c.complaint_date,
            })
            .collect();
        recent_activities.extend(
            payments
                .iter()
                .filter(|p| p.is_paid())
                .take(RECENT_ACTIVITY_LIMIT)
                .map(|p| Activity {
                    kind: ActivityKind::Payment,
                    text: format!(
                        "Payment: {} from {}",
                        format_rupees(p.effective_total()),
                        p.resident_name.as_deref().unwrap_or("Resident")
                    ),
                    date: p.paid_date.or(p.payment_date),
                }),
        );

        Self {
            total_rooms: rooms.len(),
            available_rooms: rooms.iter().filter(|r| r.is_available()).count(),
            total_residents: residents.len(),
            active_residents: residents.iter().filter(|r| r.is_active()).count(),
            pending_payments: pending.len(),
            pending_amount: pending.iter().map(|p| p.effective_total()).sum(),
            open_complaints: complaints.iter().filter(|c| c.is_open()).count(),
            new_visits: visits.iter().filter(|v| v.is_new()).count(),
            recent_activities,
            pending_overview: pending
                .iter()
                .take(PENDING_OVERVIEW_LIMIT)
                .map(|p| PaymentRow::from_payment(p))
                .collect(),
            more_pending: pending.len().saturating_sub(PENDING_OVERVIEW_LIMIT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRow {
    #[serde(flatten)]
    pub payment: Payment,
    /// See [`Payment::effective_total`].
    pub row_total: f64,
}

impl PaymentRow {
    pub fn from_payment(payment: &Payment) -> Self {
        Self {
            row_total: payment.effective_total(),
            payment: payment.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaymentsView {
    pub rows: Vec<PaymentRow>,
    pub total_pending: f64,
    pub total_collected: f64,
    pub record_count: usize,
}

impl PaymentsView {
    pub fn build(payments: &[Payment]) -> Self {
        Self {
            rows: payments.iter().map(PaymentRow::from_payment).collect(),
            total_pending: payments
                .iter()
                .filter(|p| p.is_pending())
                .map(Payment::effective_total)
                .sum(),
            total_collected: payments
                .iter()
                .filter(|p| p.is_paid())
                .map(Payment::effective_total)
                .sum(),
            record_count: payments.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceView {
    pub date: NaiveDate,
    /// Records dated `date`.
    pub marked: Vec<Attendance>,
    /// Active residents without a record for `date`.
    pub unmarked: Vec<Resident>,
    pub stats: AttendanceStats,
    pub active_residents: usize,
}

impl AttendanceView {
    pub fn build(
        records: &[Attendance],
        residents: &[Resident],
        stats: AttendanceStats,
        today: NaiveDate,
    ) -> Self {
        let (marked, unmarked) = partition_attendance(records, residents, today);
        Self {
            date: today,
            marked,
            unmarked,
            stats,
            active_residents: residents.iter().filter(|r| r.is_active()).count(),
        }
    }
}

/// Split the day's roll call into marked records and unmarked active residents.
pub fn partition_attendance(
    records: &[Attendance],
    residents: &[Resident],
    today: NaiveDate,
) -> (Vec<Attendance>, Vec<Resident>) {
    let marked: Vec<Attendance> = records
        .iter()
        .filter(|a| a.date == Some(today))
        .cloned()
        .collect();
    let marked_ids: HashSet<u64> = marked.iter().filter_map(|a| a.resident_id).collect();
    let unmarked = residents
        .iter()
        .filter(|r| r.is_active() && !marked_ids.contains(&r.id))
        .cloned()
        .collect();
    (marked, unmarked)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodView {
    /// Set when the list was narrowed to a single day.
    pub date: Option<NaiveDate>,
    pub preferences: Vec<FoodPreference>,
    pub stats: Option<FoodStats>,
}

/// `Rs. 1,200` style amount; fractions are kept only when non-zero.
pub fn format_rupees(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    if fraction == 0 {
        format!("Rs. {}{}", sign, grouped)
    } else if fraction % 10 == 0 {
        format!("Rs. {}{}.{}", sign, grouped, fraction / 10)
    } else {
        format!("Rs. {}{}.{:02}", sign, grouped, fraction)
    }
}
