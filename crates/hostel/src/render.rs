//! Terminal rendering of section views.

use chrono::NaiveDate;
use hostel_core::dashboard::{
    AttendanceView, DashboardSummary, FoodView, LoadState, PaymentsView, SectionContent,
    SectionView, format_rupees,
};
use hostel_core::models::{CleaningTask, Complaint, Resident, Room, Visit};

use crate::table::Table;

fn text(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

fn day(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn label(value: Option<&'static str>) -> String {
    value.unwrap_or("-").to_string()
}

fn tick(value: Option<bool>) -> String {
    if value.unwrap_or(false) { "yes" } else { "no" }.to_string()
}

/// Title line, inline error marker, then the content (if any).
pub fn print_view(view: &SectionView) {
    println!("{}", view.title);
    if let Some(loaded_at) = view.loaded_at {
        println!("Last updated: {}", loaded_at.format("%H:%M:%S"));
    }
    if view.state == LoadState::Failed
        && let Some(error) = &view.error
    {
        eprintln!("❌ {}", error);
    }
    println!();

    match &view.content {
        Some(content) => print_content(content),
        None if view.state == LoadState::Failed => {}
        None => println!("Nothing loaded yet."),
    }
}

pub fn print_content(content: &SectionContent) {
    match content {
        SectionContent::Dashboard(summary) => print_summary(summary),
        SectionContent::Rooms(rooms) => print_rooms(rooms),
        SectionContent::Residents(residents) => print_residents(residents),
        SectionContent::Payments(view) => print_payments(view),
        SectionContent::Complaints(complaints) => print_complaints(complaints),
        SectionContent::Visits(visits) => print_visits(visits),
        SectionContent::Attendance(view) => print_attendance(view),
        SectionContent::Food(view) => print_food(view),
        SectionContent::Cleaning(tasks) => print_cleaning(tasks),
    }
}

fn print_or_empty(table: &Table, empty: &str) {
    if table.is_empty() {
        println!("{}", empty);
    } else {
        table.print();
    }
}

fn print_summary(summary: &DashboardSummary) {
    println!(
        "Rooms:      {} total, {} available",
        summary.total_rooms, summary.available_rooms
    );
    println!(
        "Residents:  {} total, {} active",
        summary.total_residents, summary.active_residents
    );
    println!(
        "Payments:   {} pending ({})",
        summary.pending_payments,
        format_rupees(summary.pending_amount)
    );
    println!("Complaints: {} open", summary.open_complaints);
    println!("Visits:     {} new", summary.new_visits);

    println!();
    println!("Recent activity");
    if summary.recent_activities.is_empty() {
        println!("  No recent activity");
    }
    for activity in &summary.recent_activities {
        println!("  {}  {}", day(activity.date), activity.text);
    }

    println!();
    println!("Pending payments");
    let mut table = Table::new(&["ID", "Resident", "Room", "Month", "Total"]);
    for row in &summary.pending_overview {
        table.add_row(vec![
            row.payment.id.to_string(),
            text(&row.payment.resident_name),
            text(&row.payment.room_number),
            text(&row.payment.month),
            format_rupees(row.row_total),
        ]);
    }
    print_or_empty(&table, "  No pending payments");
    if summary.more_pending > 0 {
        println!("  +{} more pending", summary.more_pending);
    }
}

fn print_rooms(rooms: &[Room]) {
    let mut table = Table::new(&[
        "ID", "Room", "Type", "Price", "Occupancy", "Free", "Facilities", "Status",
    ]);
    for room in rooms {
        table.add_row(vec![
            room.id.to_string(),
            text(&room.room_number),
            text(&room.room_type),
            room.price_per_month
                .map(format_rupees)
                .unwrap_or_else(|| "-".to_string()),
            format!(
                "{}/{}",
                room.current_occupancy.unwrap_or(0),
                room.capacity.unwrap_or(0)
            ),
            room.available_spots
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            room.facilities.join(", "),
            label(room.status.map(|s| s.as_str())),
        ]);
    }
    print_or_empty(&table, "No rooms found");
}

fn print_residents(residents: &[Resident]) {
    let mut table = Table::new(&[
        "ID", "Name", "Contact", "Course", "Room", "Rating", "Joined", "Status",
    ]);
    for resident in residents {
        table.add_row(vec![
            resident.id.to_string(),
            resident.display_name().to_string(),
            text(&resident.contact),
            text(&resident.course),
            text(&resident.room_number),
            resident
                .rating
                .map(|r| format!("{}/5", r))
                .unwrap_or_else(|| "-".to_string()),
            day(resident.join_date),
            label(resident.status.map(|s| s.as_str())),
        ]);
    }
    print_or_empty(&table, "No residents found");
}

fn print_payments(view: &PaymentsView) {
    let mut table = Table::new(&[
        "ID", "Resident", "Room", "Month", "Total", "Method", "Status", "Paid",
    ]);
    for row in &view.rows {
        let payment = &row.payment;
        table.add_row(vec![
            payment.id.to_string(),
            text(&payment.resident_name),
            text(&payment.room_number),
            text(&payment.month),
            format_rupees(row.row_total),
            label(payment.method.map(|m| m.as_str())),
            label(payment.status.map(|s| s.as_str())),
            day(payment.paid_date),
        ]);
    }
    print_or_empty(&table, "No payments found");
    println!(
        "Pending: {}   Collected: {}   Records: {}",
        format_rupees(view.total_pending),
        format_rupees(view.total_collected),
        view.record_count
    );
}

fn print_complaints(complaints: &[Complaint]) {
    let mut table = Table::new(&[
        "ID", "Title", "Resident", "Room", "Category", "Priority", "Status", "Date",
    ]);
    for complaint in complaints {
        table.add_row(vec![
            complaint.id.to_string(),
            text(&complaint.title),
            text(&complaint.resident_name),
            text(&complaint.room_number),
            text(&complaint.category),
            label(complaint.priority.map(|p| p.as_str())),
            label(complaint.status.map(|s| s.as_str())),
            day(complaint.complaint_date),
        ]);
    }
    print_or_empty(&table, "No complaints found");
}

fn print_visits(visits: &[Visit]) {
    let mut table = Table::new(&[
        "ID", "Visitor", "Contact", "Room Type", "Date", "Time", "Status",
    ]);
    for visit in visits {
        table.add_row(vec![
            visit.id.to_string(),
            text(&visit.visitor_name),
            text(&visit.visitor_contact),
            text(&visit.preferred_room_type),
            day(visit.visit_date),
            text(&visit.visit_time),
            label(visit.status.map(|s| s.as_str())),
        ]);
    }
    print_or_empty(&table, "No visit requests found");
}

fn print_attendance(view: &AttendanceView) {
    println!(
        "Date: {}   Present: {}   Absent: {}   Leave: {}   Active residents: {}",
        view.date.format("%Y-%m-%d"),
        view.stats.present,
        view.stats.absent,
        view.stats.leave,
        view.active_residents
    );
    println!();

    let mut table = Table::new(&["ID", "Resident", "Room", "Status", "In", "Out", "Remarks"]);
    for record in &view.marked {
        table.add_row(vec![
            record.id.to_string(),
            text(&record.resident_name),
            text(&record.room_number),
            label(record.status.map(|s| s.as_str())),
            text(&record.check_in_time),
            text(&record.check_out_time),
            text(&record.remarks),
        ]);
    }
    print_or_empty(&table, "No attendance marked today");

    if !view.unmarked.is_empty() {
        println!();
        println!("Not marked yet");
        let mut table = Table::new(&["Resident ID", "Name", "Room"]);
        for resident in &view.unmarked {
            table.add_row(vec![
                resident.id.to_string(),
                resident.display_name().to_string(),
                text(&resident.room_number),
            ]);
        }
        table.print();
    }
}

fn print_food(view: &FoodView) {
    if let Some(date) = view.date {
        println!("Preferences for {}", date.format("%Y-%m-%d"));
    }
    if let Some(stats) = &view.stats {
        println!(
            "Breakfast: {}   Lunch: {}   Dinner: {}   Veg: {}   Non-veg: {}",
            stats.breakfast, stats.lunch, stats.dinner, stats.veg, stats.non_veg
        );
        println!();
    }

    let mut table = Table::new(&[
        "Resident", "Room", "Date", "Breakfast", "Lunch", "Dinner", "Meal", "Notes",
    ]);
    for pref in &view.preferences {
        table.add_row(vec![
            text(&pref.resident_name),
            text(&pref.room_number),
            day(pref.date),
            tick(pref.breakfast),
            tick(pref.lunch),
            tick(pref.dinner),
            text(&pref.meal_type),
            text(&pref.special_requirements),
        ]);
    }
    print_or_empty(&table, "No food preferences found");
}

fn print_cleaning(tasks: &[CleaningTask]) {
    let mut table = Table::new(&["ID", "Area", "Day", "Time", "Staff", "Status", "Notes"]);
    for task in tasks {
        table.add_row(vec![
            task.id.to_string(),
            text(&task.area),
            text(&task.day_of_week),
            text(&task.time_slot),
            text(&task.assigned_staff),
            label(task.completion_status.map(|s| s.as_str())),
            text(&task.notes),
        ]);
    }
    print_or_empty(&table, "No cleaning tasks found");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_renders_dash() {
        assert_eq!(text(&None), "-");
        assert_eq!(text(&Some("  ".to_string())), "-");
        assert_eq!(text(&Some("CS".to_string())), "CS");
    }

    #[test]
    fn test_day_formats_iso() {
        assert_eq!(day(NaiveDate::from_ymd_opt(2024, 6, 1)), "2024-06-01");
        assert_eq!(day(None), "-");
    }

    #[test]
    fn test_tick_treats_missing_as_no() {
        assert_eq!(tick(Some(true)), "yes");
        assert_eq!(tick(None), "no");
    }
}
