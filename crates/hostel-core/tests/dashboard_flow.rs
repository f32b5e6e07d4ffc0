//! End-to-end refresh and action flows against the scripted backend.

mod common;

use std::time::Duration;

use common::{harness, june_first};
use hostel_core::api::Method;
use hostel_core::dashboard::{
    ActionOutcome, DashboardEvent, EditorKind, LoadOutcome, LoadState, SectionContent, SectionId,
};
use hostel_core::models::{
    AttendanceForm, AttendanceStatus, CleaningForm, PaymentMethod, RoomForm,
};
use serde_json::json;

fn payments_fixture() -> serde_json::Value {
    json!([
        {"id": 1, "residentId": 3, "residentName": "Nimal", "month": "2024-06",
         "amount": 1000, "foodCharge": 200, "status": "PENDING"}
    ])
}

#[tokio::test]
async fn test_overview_treats_failed_fetch_as_empty() {
    let h = harness(SectionId::Dashboard);
    h.transport.data(
        Method::Get,
        "rooms",
        json!([
            {"id": 1, "roomNumber": "101", "status": "AVAILABLE"},
            {"id": 2, "roomNumber": "102", "status": "OCCUPIED"}
        ]),
    );
    h.transport.data(
        Method::Get,
        "residents",
        json!([
            {"id": 1, "name": "A", "status": "ACTIVE"},
            {"id": 2, "name": "B", "status": "ACTIVE"},
            {"id": 3, "name": "C", "status": "INACTIVE"}
        ]),
    );
    h.transport.respond(Method::Get, "payments", 500, "<html>oops</html>");
    h.transport.data(
        Method::Get,
        "complaints",
        json!([{"id": 1, "title": "Leak", "status": "PENDING"}]),
    );
    h.transport
        .data(Method::Get, "visits", json!([{"id": 1, "status": "NEW"}]));

    let outcome = h
        .dashboard
        .activate_section(SectionId::Dashboard)
        .await
        .unwrap();
    assert_eq!(outcome, LoadOutcome::Rendered);

    let view = h.dashboard.view(SectionId::Dashboard).unwrap();
    assert_eq!(view.state, LoadState::Rendered);
    assert!(view.error.is_none());
    let Some(SectionContent::Dashboard(summary)) = view.content else {
        panic!("expected overview content");
    };
    assert_eq!(summary.total_rooms, 2);
    assert_eq!(summary.available_rooms, 1);
    assert_eq!(summary.total_residents, 3);
    assert_eq!(summary.active_residents, 2);
    assert_eq!(summary.pending_payments, 0);
    assert_eq!(summary.pending_amount, 0.0);
    assert_eq!(summary.open_complaints, 1);
    assert_eq!(summary.new_visits, 1);
    assert!(h.notices.messages().is_empty());
}

#[tokio::test]
async fn test_payment_row_total_falls_back_to_parts() {
    let h = harness(SectionId::Dashboard);
    h.transport
        .data(Method::Get, "payments", payments_fixture());

    h.dashboard
        .activate_section(SectionId::Payments)
        .await
        .unwrap();

    let Some(SectionContent::Payments(view)) = h.dashboard.view(SectionId::Payments).unwrap().content
    else {
        panic!("expected payments content");
    };
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].row_total, 1200.0);
    assert_eq!(view.total_pending, 1200.0);
    assert_eq!(view.total_collected, 0.0);
}

#[tokio::test]
async fn test_collect_cash_reloads_payments_and_overview() {
    let h = harness(SectionId::Dashboard);
    h.transport
        .data(Method::Get, "payments", payments_fixture());
    h.transport.data(Method::Put, "payments/1/pay", json!(null));

    let outcome = h.dashboard.collect_payment(1, PaymentMethod::Cash).await;
    assert_eq!(outcome, ActionOutcome::Completed);

    let requests = h.transport.requests();
    let pay = &requests[0];
    assert_eq!(pay.method, Method::Put);
    assert_eq!(pay.url("http://localhost:8080/api"), "http://localhost:8080/api/payments/1/pay?method=CASH");
    assert_eq!(pay.header("Authorization"), Some("Bearer t0k3n"));

    let calls = h.transport.calls();
    assert_eq!(h.transport.count("GET payments"), 2);
    assert!(calls.contains(&"GET rooms".to_string()));
    assert!(calls.contains(&"GET visits".to_string()));
    assert_eq!(h.notices.messages(), vec!["Payment collected successfully!"]);

    assert_eq!(
        h.dashboard.view(SectionId::Payments).unwrap().state,
        LoadState::Rendered
    );
    assert_eq!(
        h.dashboard.view(SectionId::Dashboard).unwrap().state,
        LoadState::Rendered
    );
}

#[tokio::test]
async fn test_rejected_collection_surfaces_backend_message() {
    let h = harness(SectionId::Dashboard);
    h.transport.respond(
        Method::Put,
        "payments/1/pay",
        400,
        r#"{"success":false,"message":"Payment already collected"}"#,
    );

    let outcome = h.dashboard.collect_payment(1, PaymentMethod::Cash).await;
    assert_eq!(
        outcome,
        ActionOutcome::Rejected("Payment already collected".to_string())
    );
    assert_eq!(h.transport.calls(), vec!["PUT payments/1/pay"]);
    assert_eq!(h.notices.messages(), vec!["Payment already collected"]);
}

#[tokio::test]
async fn test_resident_without_todays_record_is_unmarked() {
    let h = harness(SectionId::Dashboard);
    h.transport.data(
        Method::Get,
        "residents",
        json!([
            {"id": 1, "name": "A", "status": "ACTIVE"},
            {"id": 2, "name": "B", "status": "ACTIVE"},
            {"id": 3, "name": "C", "status": "INACTIVE"}
        ]),
    );
    h.transport.data(
        Method::Get,
        "attendance",
        json!([
            {"id": 9, "residentId": 1, "date": "2024-06-01", "status": "PRESENT"},
            {"id": 10, "residentId": 2, "date": [2024, 5, 31], "status": "PRESENT"}
        ]),
    );
    h.transport.data(
        Method::Get,
        "attendance/stats",
        json!({"present": 1, "absent": 0, "leave": 0, "total": 1}),
    );

    h.dashboard
        .activate_section(SectionId::Attendance)
        .await
        .unwrap();

    let Some(SectionContent::Attendance(view)) =
        h.dashboard.view(SectionId::Attendance).unwrap().content
    else {
        panic!("expected attendance content");
    };
    assert_eq!(view.date, june_first());
    assert_eq!(view.marked.len(), 1);
    let unmarked: Vec<u64> = view.unmarked.iter().map(|r| r.id).collect();
    assert_eq!(unmarked, vec![2]);
    assert_eq!(view.stats.present, 1);
}

#[tokio::test]
async fn test_unchanged_resident_edit_puts_original_fields() {
    let h = harness(SectionId::Dashboard);
    h.transport.data(
        Method::Get,
        "residents/3",
        json!({"id": 3, "name": "Nimal", "nic": "991234567V", "contact": "0771234567",
               "email": "nimal@uni.lk", "course": "CS", "rating": 5,
               "joinDate": "2023-09-01", "status": "INACTIVE"}),
    );
    h.transport
        .data(Method::Put, "residents/3", json!({"id": 3}));

    let form = h
        .dashboard
        .open_resident_editor(3)
        .await
        .unwrap()
        .unwrap();
    let outcome = h.dashboard.save_resident(&form, None).await;
    assert_eq!(outcome, ActionOutcome::Completed);

    let update = h
        .transport
        .requests()
        .into_iter()
        .find(|r| r.method == Method::Put)
        .unwrap();
    assert_eq!(update.path, "residents/3");
    assert_eq!(
        update.body.unwrap(),
        json!({
            "name": "Nimal",
            "nic": "991234567V",
            "contact": "0771234567",
            "email": "nimal@uni.lk",
            "course": "CS",
            "status": "INACTIVE",
            "rating": 5,
            "joinDate": "2023-09-01",
        })
    );
    assert_eq!(
        h.dashboard
            .context()
            .editing(hostel_core::dashboard::EditorKind::Resident),
        None
    );
}

#[tokio::test]
async fn test_unauthorized_load_ends_session_and_polling() {
    let h = harness(SectionId::Rooms);
    h.transport.respond(Method::Get, "rooms", 401, "");
    let mut events = h.dashboard.subscribe();

    h.dashboard.start_auto_refresh(Duration::from_secs(30)).unwrap();
    let outcome = h.dashboard.activate_section(SectionId::Rooms).await.unwrap();

    assert_eq!(outcome, LoadOutcome::Unauthorized);
    assert_eq!(h.navigator.redirects(), 1);
    assert_eq!(h.guard.token(), None);
    assert!(!h.dashboard.is_auto_refreshing());

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    assert!(seen.contains(&DashboardEvent::SessionExpired));
    assert!(seen.contains(&DashboardEvent::AutoRefreshStopped));
}

#[tokio::test(start_paused = true)]
async fn test_second_start_leaves_one_timer() {
    let h = harness(SectionId::Cleaning);

    h.dashboard.start_auto_refresh(Duration::from_secs(30)).unwrap();
    h.dashboard.start_auto_refresh(Duration::from_secs(30)).unwrap();
    tokio::time::sleep(Duration::from_secs(91)).await;

    assert_eq!(h.transport.count("GET cleaning"), 3);
    assert!(h.dashboard.last_refresh().is_some());
    h.dashboard.stop_auto_refresh();
}

#[tokio::test]
async fn test_reactivation_reruns_loader_with_single_active_section() {
    let h = harness(SectionId::Dashboard);

    h.dashboard.activate_section(SectionId::Visits).await.unwrap();
    h.dashboard.activate_section(SectionId::Rooms).await.unwrap();
    h.dashboard.activate_section(SectionId::Rooms).await.unwrap();

    assert_eq!(h.transport.count("GET rooms"), 2);
    assert_eq!(h.transport.count("GET visits"), 1);
    let active: Vec<SectionId> = h
        .dashboard
        .views()
        .into_iter()
        .filter(|v| v.active)
        .map(|v| v.section)
        .collect();
    assert_eq!(active, vec![SectionId::Rooms]);
    assert_eq!(h.dashboard.page_title().as_deref(), Some("Room Management"));
}

#[tokio::test]
async fn test_failed_reload_keeps_previous_rooms() {
    let h = harness(SectionId::Rooms);
    h.transport.data(
        Method::Get,
        "rooms",
        json!([{"id": 1, "roomNumber": "101", "status": "AVAILABLE"}]),
    );
    h.dashboard.activate_section(SectionId::Rooms).await.unwrap();

    h.transport.fail(Method::Get, "rooms", "connection refused");
    let outcome = h.dashboard.manual_refresh().await;
    assert!(matches!(outcome, LoadOutcome::Failed(_)));

    let view = h.dashboard.view(SectionId::Rooms).unwrap();
    assert_eq!(view.state, LoadState::Failed);
    assert!(view.error.unwrap().contains("connection refused"));
    let Some(SectionContent::Rooms(rooms)) = view.content else {
        panic!("expected previous rooms");
    };
    assert_eq!(rooms.len(), 1);
    assert_eq!(h.dashboard.context().cache.rooms().len(), 1);
}

#[tokio::test]
async fn test_mark_all_present_counts_active_residents() {
    let h = harness(SectionId::Dashboard);
    h.transport.data(
        Method::Get,
        "residents",
        json!([
            {"id": 1, "status": "ACTIVE"},
            {"id": 2, "status": "ACTIVE"},
            {"id": 3, "status": "PENDING"}
        ]),
    );
    h.transport.respond(
        Method::Post,
        "attendance/mark/2",
        200,
        r#"{"success":false,"message":"Already marked"}"#,
    );

    let outcome = h.dashboard.mark_all_present(&|_: &str| true).await;
    assert_eq!(outcome, ActionOutcome::Completed);
    assert_eq!(h.transport.count("POST attendance/mark/1"), 1);
    assert_eq!(h.transport.count("POST attendance/mark/3"), 0);
    assert!(
        h.notices
            .messages()
            .contains(&"Marked 1 residents as present!".to_string())
    );
}

fn room_fixture() -> serde_json::Value {
    json!({"id": 4, "roomNumber": "104", "roomType": "DOUBLE", "pricePerMonth": 15000.0,
           "capacity": 2, "facilities": ["WiFi", "Fan"], "imageUrl": "img/104.jpg",
           "status": "MAINTENANCE"})
}

#[tokio::test]
async fn test_unchanged_room_edit_puts_original_fields() {
    let h = harness(SectionId::Rooms);
    h.transport.data(Method::Get, "rooms/4", room_fixture());
    h.transport.data(Method::Put, "rooms/4", json!({"id": 4}));

    let form = h.dashboard.open_room_editor(4).await.unwrap().unwrap();
    assert_eq!(h.dashboard.context().editing(EditorKind::Room), Some(4));

    let outcome = h.dashboard.save_room(&form).await;
    assert_eq!(outcome, ActionOutcome::Completed);

    let update = h
        .transport
        .requests()
        .into_iter()
        .find(|r| r.method == Method::Put)
        .unwrap();
    assert_eq!(update.path, "rooms/4");
    assert_eq!(
        update.body.unwrap(),
        json!({
            "roomNumber": "104",
            "roomType": "DOUBLE",
            "pricePerMonth": 15000.0,
            "capacity": 2,
            "facilities": "WiFi,Fan",
            "imageUrl": "img/104.jpg",
            "status": "MAINTENANCE",
        })
    );
    assert_eq!(h.transport.count("GET rooms"), 1);
    assert_eq!(h.notices.messages(), vec!["Room saved!"]);
    assert_eq!(h.dashboard.context().editing(EditorKind::Room), None);
}

#[tokio::test]
async fn test_closed_room_editor_saves_as_new_room() {
    let h = harness(SectionId::Rooms);
    h.transport.data(Method::Get, "rooms/4", room_fixture());
    h.transport.data(Method::Post, "rooms", json!({"id": 5}));

    h.dashboard.open_room_editor(4).await.unwrap().unwrap();
    h.dashboard.close_editor(EditorKind::Room);
    assert_eq!(h.dashboard.context().editing(EditorKind::Room), None);

    let form = RoomForm::new_room("105", "SINGLE");
    let outcome = h.dashboard.save_room(&form).await;
    assert_eq!(outcome, ActionOutcome::Completed);

    let calls = h.transport.calls();
    assert!(calls.contains(&"POST rooms".to_string()));
    assert!(!calls.iter().any(|c| c.starts_with("PUT ")));
    let create = h
        .transport
        .requests()
        .into_iter()
        .find(|r| r.method == Method::Post)
        .unwrap();
    assert_eq!(create.body.unwrap()["roomNumber"], json!("105"));
}

#[tokio::test]
async fn test_payment_edit_reloads_payments_and_overview() {
    let h = harness(SectionId::Payments);
    h.transport
        .data(Method::Get, "payments", payments_fixture());
    h.transport.data(Method::Put, "payments/1", json!({"id": 1}));
    h.dashboard
        .activate_section(SectionId::Payments)
        .await
        .unwrap();

    let mut form = h.dashboard.open_payment_editor(1).unwrap();
    assert_eq!(form.resident_id, Some(3));
    form.late_fee = 50.0;
    h.transport.clear();

    let outcome = h.dashboard.save_payment(&form).await;
    assert_eq!(outcome, ActionOutcome::Completed);

    let requests = h.transport.requests();
    assert_eq!(requests[0].method, Method::Put);
    assert_eq!(requests[0].path, "payments/1");
    let body = requests[0].body.clone().unwrap();
    assert_eq!(body["month"], json!("2024-06"));
    assert_eq!(body["total"], json!(1250.0));

    let calls = h.transport.calls();
    assert_eq!(h.transport.count("GET payments"), 2);
    assert!(calls.contains(&"GET rooms".to_string()));
    assert_eq!(h.notices.messages(), vec!["Payment saved!"]);
    assert_eq!(h.dashboard.context().editing(EditorKind::Payment), None);
    assert_eq!(
        h.dashboard.view(SectionId::Dashboard).unwrap().state,
        LoadState::Rendered
    );
}

#[tokio::test]
async fn test_add_cleaning_task_reloads_schedule() {
    let h = harness(SectionId::Cleaning);
    h.transport.data(Method::Post, "cleaning", json!({"id": 7}));
    h.transport.data(
        Method::Get,
        "cleaning",
        json!([{"id": 7, "area": "Kitchen", "dayOfWeek": "MONDAY", "timeSlot": "08:00",
                "assignedStaff": "Kamal", "completionStatus": "PENDING"}]),
    );

    let form = CleaningForm::new_task("Kitchen", "MONDAY", "08:00", "Kamal");
    let outcome = h.dashboard.add_cleaning_task(&form).await;
    assert_eq!(outcome, ActionOutcome::Completed);

    assert_eq!(h.transport.calls(), vec!["POST cleaning", "GET cleaning"]);
    assert_eq!(h.notices.messages(), vec!["Task added!"]);
    assert_eq!(h.dashboard.context().cache.cleaning().len(), 1);
}

#[tokio::test]
async fn test_mark_attendance_reloads_attendance() {
    let h = harness(SectionId::Attendance);
    h.transport.data(Method::Post, "attendance", json!({"id": 11}));
    h.transport.data(
        Method::Get,
        "attendance/stats",
        json!({"present": 1, "absent": 0, "leave": 0, "total": 1}),
    );

    let form = AttendanceForm::new_record(3, june_first(), AttendanceStatus::Present);
    let outcome = h.dashboard.mark_attendance(&form).await;
    assert_eq!(outcome, ActionOutcome::Completed);

    let requests = h.transport.requests();
    assert_eq!(requests[0].path, "attendance");
    assert_eq!(
        requests[0].body.clone().unwrap(),
        json!({
            "residentId": 3,
            "date": "2024-06-01",
            "status": "PRESENT",
            "checkInTime": null,
            "checkOutTime": null,
            "remarks": null,
        })
    );
    assert_eq!(h.transport.count("GET attendance"), 1);
    assert_eq!(h.notices.messages(), vec!["Attendance marked!"]);
    assert_eq!(
        h.dashboard.view(SectionId::Attendance).unwrap().state,
        LoadState::Rendered
    );
}
