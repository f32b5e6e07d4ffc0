//! Built-in section loaders.
//!
//! Each loader fetches its collections, replaces the matching cache entries
//! on success, and returns the section's view content. Errors go back to the
//! controller, which keeps the previous content on screen.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::endpoints::{self, Resource};
use crate::api::errors::ApiError;
use crate::dashboard::context::DashboardContext;
use crate::dashboard::registry::{LoaderFn, loader};
use crate::dashboard::section::SectionId;
use crate::dashboard::views::{
    AttendanceView, DashboardSummary, FoodView, PaymentsView, SectionContent,
};
use crate::models::{
    Attendance, AttendanceStats, CleaningTask, Complaint, FoodPreference, FoodStats, Payment,
    Resident, Room, Visit,
};

/// The nine built-in loaders, in navigation order.
pub fn default_loaders() -> Vec<(SectionId, LoaderFn)> {
    vec![
        (SectionId::Dashboard, loader(load_dashboard)),
        (SectionId::Rooms, loader(load_rooms)),
        (SectionId::Residents, loader(load_residents)),
        (SectionId::Payments, loader(load_payments)),
        (SectionId::Complaints, loader(load_complaints)),
        (SectionId::Visits, loader(load_visits)),
        (SectionId::Attendance, loader(load_attendance)),
        (SectionId::Food, loader(load_food)),
        (SectionId::Cleaning, loader(load_cleaning)),
    ]
}

/// Keep a successful fetch (and cache it); degrade a failed one to empty.
fn settle<T: Clone>(
    resource: Resource,
    result: Result<Vec<T>, ApiError>,
    store: impl FnOnce(Vec<T>),
) -> Vec<T> {
    match result {
        Ok(items) => {
            store(items.clone());
            items
        }
        Err(e) => {
            warn!(
                event = "core.dashboard.fetch_degraded",
                resource = %resource,
                error = %e
            );
            Vec::new()
        }
    }
}

/// Overview: five concurrent fetches, any of which may fail.
///
/// A failed fetch counts as an empty collection. A 401 is still reported so
/// the controller can stop polling.
pub async fn load_dashboard(ctx: Arc<DashboardContext>) -> Result<SectionContent, ApiError> {
    let client = &ctx.client;
    let (rooms, residents, payments, complaints, visits) = futures::join!(
        client.fetch_list::<Room>(endpoints::list(Resource::Rooms)),
        client.fetch_list::<Resident>(endpoints::list(Resource::Residents)),
        client.fetch_list::<Payment>(endpoints::list(Resource::Payments)),
        client.fetch_list::<Complaint>(endpoints::list(Resource::Complaints)),
        client.fetch_list::<Visit>(endpoints::list(Resource::Visits)),
    );

    let unauthorized = [
        rooms.as_ref().err(),
        residents.as_ref().err(),
        payments.as_ref().err(),
        complaints.as_ref().err(),
        visits.as_ref().err(),
    ]
    .into_iter()
    .flatten()
    .find(|e| e.is_unauthorized())
    .cloned();
    if let Some(e) = unauthorized {
        return Err(e);
    }

    let cache = &ctx.cache;
    let rooms = settle(Resource::Rooms, rooms, |v| cache.set_rooms(v));
    let residents = settle(Resource::Residents, residents, |v| cache.set_residents(v));
    let payments = settle(Resource::Payments, payments, |v| cache.set_payments(v));
    let complaints = settle(Resource::Complaints, complaints, |v| cache.set_complaints(v));
    let visits = settle(Resource::Visits, visits, |v| cache.set_visits(v));

    let summary = DashboardSummary::build(&rooms, &residents, &payments, &complaints, &visits);
    debug!(
        event = "core.dashboard.summary_built",
        rooms = summary.total_rooms,
        pending_payments = summary.pending_payments
    );
    Ok(SectionContent::Dashboard(summary))
}

pub async fn load_rooms(ctx: Arc<DashboardContext>) -> Result<SectionContent, ApiError> {
    let rooms: Vec<Room> = ctx
        .client
        .fetch_list(endpoints::list(Resource::Rooms))
        .await?;
    ctx.cache.set_rooms(rooms.clone());
    Ok(SectionContent::Rooms(rooms))
}

pub async fn load_residents(ctx: Arc<DashboardContext>) -> Result<SectionContent, ApiError> {
    let residents: Vec<Resident> = ctx
        .client
        .fetch_list(endpoints::list(Resource::Residents))
        .await?;
    ctx.cache.set_residents(residents.clone());
    Ok(SectionContent::Residents(residents))
}

pub async fn load_payments(ctx: Arc<DashboardContext>) -> Result<SectionContent, ApiError> {
    let payments: Vec<Payment> = ctx
        .client
        .fetch_list(endpoints::list(Resource::Payments))
        .await?;
    let view = PaymentsView::build(&payments);
    ctx.cache.set_payments(payments);
    Ok(SectionContent::Payments(view))
}

pub async fn load_complaints(ctx: Arc<DashboardContext>) -> Result<SectionContent, ApiError> {
    let complaints: Vec<Complaint> = ctx
        .client
        .fetch_list(endpoints::list(Resource::Complaints))
        .await?;
    ctx.cache.set_complaints(complaints.clone());
    Ok(SectionContent::Complaints(complaints))
}

pub async fn load_visits(ctx: Arc<DashboardContext>) -> Result<SectionContent, ApiError> {
    let visits: Vec<Visit> = ctx
        .client
        .fetch_list(endpoints::list(Resource::Visits))
        .await?;
    ctx.cache.set_visits(visits.clone());
    Ok(SectionContent::Visits(visits))
}

/// Today's roll call: marked records, unmarked active residents and counts.
pub async fn load_attendance(ctx: Arc<DashboardContext>) -> Result<SectionContent, ApiError> {
    let client = &ctx.client;
    let (records, residents, stats) = futures::join!(
        client.fetch_list::<Attendance>(endpoints::list(Resource::Attendance)),
        client.fetch_list::<Resident>(endpoints::list(Resource::Residents)),
        client.fetch_one::<AttendanceStats>(endpoints::attendance_stats()),
    );
    let records = records?;
    let residents = residents?;
    let stats = match stats {
        Ok(stats) => stats.unwrap_or_default(),
        Err(e) if e.is_unauthorized() => return Err(e),
        Err(e) => {
            warn!(event = "core.dashboard.stats_degraded", section = "attendance", error = %e);
            AttendanceStats::default()
        }
    };

    let view = AttendanceView::build(&records, &residents, stats, ctx.today());
    ctx.cache.set_attendance(records);
    ctx.cache.set_residents(residents);
    Ok(SectionContent::Attendance(view))
}

pub async fn load_food(ctx: Arc<DashboardContext>) -> Result<SectionContent, ApiError> {
    let client = &ctx.client;
    let (preferences, stats) = futures::join!(
        client.fetch_list::<FoodPreference>(endpoints::list(Resource::Food)),
        client.fetch_one::<FoodStats>(endpoints::food_stats()),
    );
    let preferences = preferences?;
    let stats = match stats {
        Ok(stats) => stats,
        Err(e) if e.is_unauthorized() => return Err(e),
        Err(e) => {
            warn!(event = "core.dashboard.stats_degraded", section = "food", error = %e);
            None
        }
    };

    ctx.cache.set_food(preferences.clone());
    Ok(SectionContent::Food(FoodView {
        date: None,
        preferences,
        stats,
    }))
}

pub async fn load_cleaning(ctx: Arc<DashboardContext>) -> Result<SectionContent, ApiError> {
    let tasks: Vec<CleaningTask> = ctx
        .client
        .fetch_list(endpoints::list(Resource::Cleaning))
        .await?;
    ctx.cache.set_cleaning(tasks.clone());
    Ok(SectionContent::Cleaning(tasks))
}
