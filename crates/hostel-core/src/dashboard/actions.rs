//! Mutating actions.
//!
//! Every action reports through the notifier, returns an [`ActionOutcome`]
//! instead of an error, and re-runs the loaders of the sections it touched.
//! Nothing is patched in place: the owning collection is always re-fetched.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api::endpoints::{self, Resource};
use crate::api::errors::ApiError;
use crate::api::request::ApiRequest;
use crate::dashboard::context::EditorKind;
use crate::dashboard::controller::Dashboard;
use crate::dashboard::errors::DashboardError;
use crate::dashboard::section::SectionId;
use crate::dashboard::views::{FoodView, SectionContent};
use crate::models::forms::{AttendanceForm, CleaningForm, PaymentForm, ResidentForm, RoomForm};
use crate::models::{
    AttendanceStatus, ComplaintStatus, FoodPreference, PaymentMethod, Resident, Room, VisitStatus,
};
use crate::notify::Notice;

const GENERIC_FAILURE: &str = "Failed";
const DEFAULT_RESOLUTION: &str = "Resolved";
const MARK_ALL_PROMPT: &str = "Mark all active residents as PRESENT for today?";

/// Asks the operator to approve a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed,
    /// The backend answered `success:false`.
    Rejected(String),
    Failed(String),
    Cancelled,
    Unauthorized,
    /// The record is not in the collection cache.
    NotFound,
}

impl ActionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ActionOutcome::Completed)
    }
}

impl Dashboard {
    pub async fn collect_payment(&self, payment_id: u64, method: PaymentMethod) -> ActionOutcome {
        if method == PaymentMethod::Unknown {
            return self.reject("Unsupported payment method");
        }
        self.run_mutation(
            "collect_payment",
            endpoints::collect_payment(payment_id, method.as_str()),
            "Failed to collect payment",
            "Payment collected successfully!",
            &[SectionId::Payments, SectionId::Dashboard],
        )
        .await
    }

    /// Create, or update the room whose editor is open.
    pub async fn save_room(&self, form: &RoomForm) -> ActionOutcome {
        let ctx = self.context();
        let request = match ctx.editing(EditorKind::Room) {
            Some(id) => endpoints::update(Resource::Rooms, id, form.to_payload()),
            None => endpoints::create(Resource::Rooms, form.to_payload()),
        };
        let outcome = self
            .run_mutation(
                "save_room",
                request,
                GENERIC_FAILURE,
                "Room saved!",
                &[SectionId::Rooms],
            )
            .await;
        if outcome.is_completed() {
            ctx.set_editing(EditorKind::Room, None);
        }
        outcome
    }

    /// Create or update a resident, then assign `room_id` when one was chosen.
    pub async fn save_resident(&self, form: &ResidentForm, room_id: Option<u64>) -> ActionOutcome {
        let ctx = self.context();
        let editing = ctx.editing(EditorKind::Resident);
        let request = match editing {
            Some(id) => endpoints::update(Resource::Residents, id, form.to_payload()),
            None => endpoints::create(Resource::Residents, form.to_payload()),
        };

        let saved = match ctx.client.mutate(request, GENERIC_FAILURE).await {
            Ok(data) => data,
            Err(e) => return self.action_failed("save_resident", e),
        };

        let resident_id = editing.or_else(|| {
            saved
                .as_ref()
                .and_then(|data| data.get("id"))
                .and_then(|id| id.as_u64())
        });
        if let (Some(room_id), Some(resident_id)) = (room_id, resident_id)
            && let Err(e) = ctx
                .client
                .mutate(endpoints::assign_room(resident_id, room_id), GENERIC_FAILURE)
                .await
        {
            let outcome = self.action_failed("save_resident.assign_room", e);
            self.reload(&[SectionId::Residents]).await;
            return outcome;
        }

        ctx.set_editing(EditorKind::Resident, None);
        info!(event = "core.dashboard.action_completed", action = "save_resident");
        ctx.notify(Notice::success("Resident saved!"));
        self.reload(&[SectionId::Residents]).await;
        ActionOutcome::Completed
    }

    pub async fn save_payment(&self, form: &PaymentForm) -> ActionOutcome {
        let ctx = self.context();
        let request = match ctx.editing(EditorKind::Payment) {
            Some(id) => endpoints::update(Resource::Payments, id, form.to_payload()),
            None => endpoints::create(Resource::Payments, form.to_payload()),
        };
        let outcome = self
            .run_mutation(
                "save_payment",
                request,
                GENERIC_FAILURE,
                "Payment saved!",
                &[SectionId::Payments, SectionId::Dashboard],
            )
            .await;
        if outcome.is_completed() {
            ctx.set_editing(EditorKind::Payment, None);
        }
        outcome
    }

    pub async fn add_cleaning_task(&self, form: &CleaningForm) -> ActionOutcome {
        self.run_mutation(
            "add_cleaning_task",
            endpoints::create(Resource::Cleaning, form.to_payload()),
            GENERIC_FAILURE,
            "Task added!",
            &[SectionId::Cleaning],
        )
        .await
    }

    pub async fn mark_attendance(&self, form: &AttendanceForm) -> ActionOutcome {
        self.run_mutation(
            "mark_attendance",
            endpoints::create(Resource::Attendance, form.to_payload()),
            "Failed to mark attendance",
            "Attendance marked!",
            &[SectionId::Attendance],
        )
        .await
    }

    /// Load a room into an edit form and mark it as being edited.
    pub async fn open_room_editor(&self, room_id: u64) -> Result<Option<RoomForm>, DashboardError> {
        let ctx = self.context();
        let room: Option<Room> = ctx
            .client
            .fetch_one(endpoints::get(Resource::Rooms, room_id))
            .await
            .map_err(|e| self.query_failed("open_room_editor", e))?;
        Ok(room.map(|room| {
            ctx.set_editing(EditorKind::Room, Some(room_id));
            RoomForm::from_record(&room)
        }))
    }

    pub async fn open_resident_editor(
        &self,
        resident_id: u64,
    ) -> Result<Option<ResidentForm>, DashboardError> {
        let ctx = self.context();
        let resident: Option<Resident> = ctx
            .client
            .fetch_one(endpoints::get(Resource::Residents, resident_id))
            .await
            .map_err(|e| self.query_failed("open_resident_editor", e))?;
        Ok(resident.map(|resident| {
            ctx.set_editing(EditorKind::Resident, Some(resident_id));
            ResidentForm::from_record(&resident)
        }))
    }

    /// Payments are edited from the cached collection, not re-fetched.
    pub fn open_payment_editor(&self, payment_id: u64) -> Result<PaymentForm, DashboardError> {
        let ctx = self.context();
        let payment = ctx
            .cache
            .find_payment(payment_id)
            .ok_or(DashboardError::NotInCache {
                kind: "payment",
                id: payment_id,
                section: SectionId::Payments,
            })?;
        ctx.set_editing(EditorKind::Payment, Some(payment_id));
        Ok(PaymentForm::from_record(&payment))
    }

    /// Back to new-record mode.
    pub fn close_editor(&self, kind: EditorKind) {
        self.context().set_editing(kind, None);
    }

    pub async fn assign_room(&self, resident_id: u64, room_id: u64) -> ActionOutcome {
        self.run_mutation(
            "assign_room",
            endpoints::assign_room(resident_id, room_id),
            GENERIC_FAILURE,
            "Room assigned!",
            &[SectionId::Residents, SectionId::Rooms],
        )
        .await
    }

    /// Delete after the operator confirms `Delete this <noun>?`.
    pub async fn delete(&self, resource: Resource, id: u64, confirm: &dyn Confirm) -> ActionOutcome {
        if !confirm.confirm(&format!("Delete this {}?", resource.noun())) {
            info!(event = "core.dashboard.action_cancelled", action = "delete", resource = %resource, id = id);
            return ActionOutcome::Cancelled;
        }
        let owner = SectionId::for_resource(resource);
        let refresh: &[SectionId] = if resource == Resource::Payments {
            &[SectionId::Payments, SectionId::Dashboard]
        } else {
            std::slice::from_ref(&owner)
        };
        self.run_mutation(
            "delete",
            endpoints::delete(resource, id),
            GENERIC_FAILURE,
            "Deleted!",
            refresh,
        )
        .await
    }

    pub async fn update_complaint_status(
        &self,
        complaint_id: u64,
        status: ComplaintStatus,
    ) -> ActionOutcome {
        if status == ComplaintStatus::Unknown {
            return self.reject("Unsupported complaint status");
        }
        self.run_mutation(
            "update_complaint_status",
            endpoints::complaint_status(complaint_id, status.as_str(), None),
            GENERIC_FAILURE,
            "Updated!",
            &[SectionId::Complaints],
        )
        .await
    }

    /// Resolve with the given notes, `Resolved` when none are given.
    pub async fn resolve_complaint(&self, complaint_id: u64, resolution: Option<&str>) -> ActionOutcome {
        let resolution = resolution
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_RESOLUTION);
        self.run_mutation(
            "resolve_complaint",
            endpoints::complaint_status(
                complaint_id,
                ComplaintStatus::Resolved.as_str(),
                Some(resolution),
            ),
            GENERIC_FAILURE,
            "Resolved!",
            &[SectionId::Complaints, SectionId::Dashboard],
        )
        .await
    }

    pub async fn update_visit_status(&self, visit_id: u64, status: VisitStatus) -> ActionOutcome {
        if status == VisitStatus::Unknown {
            return self.reject("Unsupported visit status");
        }
        self.run_mutation(
            "update_visit_status",
            endpoints::visit_status(visit_id, status.as_str()),
            GENERIC_FAILURE,
            "Updated!",
            &[SectionId::Visits],
        )
        .await
    }

    /// Write back the cached task with its status set to `Completed`.
    pub async fn mark_cleaning_complete(&self, task_id: u64) -> ActionOutcome {
        let Some(task) = self.context().cache.find_cleaning_task(task_id) else {
            warn!(event = "core.dashboard.action_not_found", action = "mark_cleaning_complete", id = task_id);
            return ActionOutcome::NotFound;
        };
        let body = match serde_json::to_value(task.completed()) {
            Ok(body) => body,
            Err(e) => return self.action_failed_with("mark_cleaning_complete", e.to_string()),
        };
        self.run_mutation(
            "mark_cleaning_complete",
            endpoints::update(Resource::Cleaning, task_id, body),
            GENERIC_FAILURE,
            "Completed!",
            &[SectionId::Cleaning],
        )
        .await
    }

    pub async fn quick_mark_attendance(
        &self,
        resident_id: u64,
        status: AttendanceStatus,
    ) -> ActionOutcome {
        if status == AttendanceStatus::Unknown {
            return self.reject("Unsupported attendance status");
        }
        self.run_mutation(
            "quick_mark_attendance",
            endpoints::mark_attendance(resident_id, status.as_str()),
            GENERIC_FAILURE,
            &format!("Marked as {}!", status.as_str()),
            &[SectionId::Attendance],
        )
        .await
    }

    /// Mark every active resident present, one request each. Individual
    /// failures are counted, not reported.
    pub async fn mark_all_present(&self, confirm: &dyn Confirm) -> ActionOutcome {
        if !confirm.confirm(MARK_ALL_PROMPT) {
            return ActionOutcome::Cancelled;
        }
        let ctx = self.context();
        let residents: Vec<Resident> = match ctx
            .client
            .fetch_list(endpoints::list(Resource::Residents))
            .await
        {
            Ok(residents) => residents,
            Err(e) if e.is_unauthorized() => return self.action_failed("mark_all_present", e),
            Err(e) => {
                warn!(event = "core.dashboard.action_failed", action = "mark_all_present", error = %e);
                ctx.notify(Notice::error("Failed to mark all present"));
                return ActionOutcome::Failed(e.user_message());
            }
        };

        ctx.notify(Notice::warning("Marking attendance..."));
        let present = AttendanceStatus::Present.as_str();
        let mut marked = 0usize;
        for resident in residents.iter().filter(|r| r.is_active()) {
            match ctx
                .client
                .mutate(endpoints::mark_attendance(resident.id, present), GENERIC_FAILURE)
                .await
            {
                Ok(_) => marked += 1,
                Err(e) if e.is_unauthorized() => return self.action_failed("mark_all_present", e),
                Err(e) => {
                    warn!(
                        event = "core.dashboard.mark_present_failed",
                        resident_id = resident.id,
                        error = %e
                    );
                }
            }
        }

        info!(event = "core.dashboard.action_completed", action = "mark_all_present", marked = marked);
        ctx.notify(Notice::success(format!("Marked {} residents as present!", marked)));
        self.reload(&[SectionId::Attendance]).await;
        ActionOutcome::Completed
    }

    /// Narrow the food section to one day. Stats from the last full load are
    /// kept.
    pub async fn load_food_by_date(&self, date: NaiveDate) -> ActionOutcome {
        let ctx = self.context();
        let preferences: Vec<FoodPreference> =
            match ctx.client.fetch_list(endpoints::food_by_date(date)).await {
                Ok(preferences) => preferences,
                Err(e) if e.is_unauthorized() => return self.action_failed("load_food_by_date", e),
                Err(e) => {
                    warn!(event = "core.dashboard.action_failed", action = "load_food_by_date", error = %e);
                    ctx.notify(Notice::error("Failed to load"));
                    return ActionOutcome::Failed(e.user_message());
                }
            };

        let stats = match self.view(SectionId::Food).and_then(|v| v.content) {
            Some(SectionContent::Food(view)) => view.stats,
            _ => None,
        };
        ctx.cache.set_food(preferences.clone());
        self.show_content(
            SectionId::Food,
            SectionContent::Food(FoodView {
                date: Some(date),
                preferences,
                stats,
            }),
        );
        ctx.notify(Notice::success(format!(
            "Loaded preferences for {}",
            date.format("%Y-%m-%d")
        )));
        ActionOutcome::Completed
    }

    /// Rooms with free spots, for the assign-room picker.
    pub async fn available_rooms(&self) -> Result<Vec<Room>, DashboardError> {
        let ctx = self.context();
        let rooms: Vec<Room> = ctx
            .client
            .fetch_list(endpoints::available_rooms())
            .await
            .map_err(|e| self.query_failed("available_rooms", e))?;
        if rooms.is_empty() {
            ctx.notify(Notice::warning("No available rooms!"));
        }
        Ok(rooms)
    }

    async fn run_mutation(
        &self,
        action: &'static str,
        request: ApiRequest,
        fallback: &str,
        success: &str,
        refresh: &[SectionId],
    ) -> ActionOutcome {
        let path = request.path.clone();
        match self.context().client.mutate(request, fallback).await {
            Ok(_) => {
                info!(event = "core.dashboard.action_completed", action = action, path = %path);
                self.context().notify(Notice::success(success));
                self.reload(refresh).await;
                ActionOutcome::Completed
            }
            Err(e) => self.action_failed(action, e),
        }
    }

    fn action_failed(&self, action: &'static str, error: ApiError) -> ActionOutcome {
        warn!(event = "core.dashboard.action_failed", action = action, error = %error);
        let message = error.user_message();
        self.context().notify(Notice::error(message.clone()));
        match error {
            ApiError::Unauthorized { .. } => {
                self.session_expired();
                ActionOutcome::Unauthorized
            }
            ApiError::Rejected { .. } => ActionOutcome::Rejected(message),
            _ => ActionOutcome::Failed(message),
        }
    }

    fn action_failed_with(&self, action: &'static str, message: String) -> ActionOutcome {
        warn!(event = "core.dashboard.action_failed", action = action, error = %message);
        self.context().notify(Notice::error(GENERIC_FAILURE));
        ActionOutcome::Failed(message)
    }

    fn reject(&self, message: &str) -> ActionOutcome {
        self.context().notify(Notice::error(message));
        ActionOutcome::Rejected(message.to_string())
    }

    fn query_failed(&self, action: &'static str, error: ApiError) -> DashboardError {
        warn!(event = "core.dashboard.query_failed", action = action, error = %error);
        if error.is_unauthorized() {
            self.context().notify(Notice::error(error.user_message()));
            self.session_expired();
        } else {
            self.context().notify(Notice::error("Failed to load"));
        }
        DashboardError::Api(error)
    }
}
