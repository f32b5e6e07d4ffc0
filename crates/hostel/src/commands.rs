use std::io::{self, IsTerminal, Write};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use clap::ArgMatches;
use clap_complete::Shell;
use dialoguer::Password;
use dialoguer::theme::ColorfulTheme;
use tokio::runtime::Runtime;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

use hostel_core::api::{ApiClient, HttpTransport, Resource};
use hostel_core::config::{Config, HostelConfig};
use hostel_core::dashboard::{
    ActionOutcome, Confirm, Dashboard, DashboardContext, DashboardEvent, LoadOutcome, SectionId,
};
use hostel_core::events;
use hostel_core::models::{AttendanceStatus, ComplaintStatus, PaymentMethod, VisitStatus};
use hostel_core::notify::{NoticeLevel, NoticeLog};
use hostel_core::session::{self, FileStorage, Identity, Navigator, SessionGuard};

use crate::app::build_cli;
use crate::render;
use crate::table::Table;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Tells the operator to sign in again; a terminal has nowhere to navigate to.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect_to_login(&self, login_url: &str) {
        eprintln!(
            "Session ended. Sign in again with 'hostel login <user>' (web login: {}).",
            login_url
        );
    }
}

/// `[y/N]` prompt on stdin, skipped by `--yes`.
struct StdinConfirm {
    assume_yes: bool,
}

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(_) => is_confirmation_accepted(&input),
            Err(e) => {
                warn!(event = "cli.confirm.read_failed", error = %e);
                false
            }
        }
    }
}

/// Hidden prompt on a terminal; piped stdin supplies one line instead.
fn read_password() -> Result<String, Box<dyn std::error::Error>> {
    if io::stdin().is_terminal() && io::stderr().is_terminal() {
        let password = Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?;
        return Ok(password);
    }
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(password_from_line(&input))
}

fn password_from_line(line: &str) -> String {
    line.trim_end_matches(['\r', '\n']).to_string()
}

/// Check if user confirmation input indicates acceptance.
/// Accepts "y" or "yes" (case-insensitive).
fn is_confirmation_accepted(input: &str) -> bool {
    let normalized = input.trim().to_lowercase();
    normalized == "y" || normalized == "yes"
}

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
fn load_config_with_warning() -> HostelConfig {
    match HostelConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.hostel/config.toml and ./.hostel/config.toml for errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            HostelConfig::default()
        }
    }
}

/// Everything a command needs to talk to the backend.
struct Connection {
    config: HostelConfig,
    guard: Arc<SessionGuard>,
    client: ApiClient,
    notices: Arc<NoticeLog>,
}

impl Connection {
    fn open(matches: &ArgMatches) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = load_config_with_warning();
        if let Some(base_url) = matches.get_one::<String>("base-url") {
            config.api.base_url = Some(base_url.clone());
            config.validate()?;
        }

        let runtime_config = Config::new();
        let storage = Arc::new(FileStorage::new(config.storage_path(&runtime_config)));
        let guard = Arc::new(SessionGuard::new(
            storage,
            Arc::new(TerminalNavigator),
            config.login_url(),
        ));
        let transport = Arc::new(HttpTransport::new(config.base_url(), config.timeout())?);
        let client = ApiClient::new(transport, guard.clone());

        Ok(Self {
            config,
            guard,
            client,
            notices: Arc::new(NoticeLog::new()),
        })
    }

    /// Start-up gate: stored session with the configured role.
    fn require_session(&self) -> Result<Identity, Box<dyn std::error::Error>> {
        let role = self.config.required_role()?;
        match self.guard.require_session(role) {
            Ok(identity) => Ok(identity),
            Err(e) => {
                eprintln!("❌ {}", e);
                events::log_app_error(&e);
                Err(e.into())
            }
        }
    }

    fn dashboard(&self) -> Result<Arc<Dashboard>, Box<dyn std::error::Error>> {
        let context = DashboardContext::new(self.client.clone(), self.notices.clone());
        let dashboard =
            Dashboard::with_default_sections(Arc::new(context), self.config.initial_section()?)?;
        Ok(dashboard)
    }
}

fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Print and clear pending notices. With `json` everything goes to stderr so
/// stdout stays parseable.
fn print_notices(notices: &NoticeLog, json: bool) {
    for notice in notices.drain() {
        match notice.level {
            NoticeLevel::Error => eprintln!("❌ {}", notice.message),
            NoticeLevel::Warning if json => eprintln!("⚠️  {}", notice.message),
            NoticeLevel::Warning => println!("⚠️  {}", notice.message),
            NoticeLevel::Success if json => eprintln!("✅ {}", notice.message),
            NoticeLevel::Success => println!("✅ {}", notice.message),
        }
    }
}

fn finish(action: &str, outcome: ActionOutcome, notices: &NoticeLog) -> CommandResult {
    print_notices(notices, false);
    match outcome {
        ActionOutcome::Completed => {
            info!(event = "cli.action_completed", action = action);
            Ok(())
        }
        ActionOutcome::Cancelled => {
            println!("Aborted.");
            info!(event = "cli.action_cancelled", action = action);
            Ok(())
        }
        ActionOutcome::NotFound => {
            error!(event = "cli.action_failed", action = action, reason = "not_found");
            Err("Record not found. Check the id with 'hostel show'.".into())
        }
        ActionOutcome::Unauthorized => {
            error!(event = "cli.action_failed", action = action, reason = "unauthorized");
            Err("Session expired".into())
        }
        ActionOutcome::Rejected(message) | ActionOutcome::Failed(message) => {
            error!(event = "cli.action_failed", action = action, error = %message);
            Err(message.into())
        }
    }
}

fn section_arg(matches: &ArgMatches, fallback: SectionId) -> Result<SectionId, Box<dyn std::error::Error>> {
    match matches.get_one::<String>("section") {
        Some(name) => Ok(name.parse::<SectionId>()?),
        None => Ok(fallback),
    }
}

pub fn run_command(matches: &ArgMatches) -> CommandResult {
    let command = matches.subcommand_name().unwrap_or("none");
    events::log_app_startup(command);

    let result = match matches.subcommand() {
        Some(("login", sub_matches)) => handle_login_command(matches, sub_matches),
        Some(("logout", _)) => handle_logout_command(matches),
        Some(("whoami", _)) => handle_whoami_command(matches),
        Some(("show", sub_matches)) => handle_show_command(matches, sub_matches),
        Some(("watch", sub_matches)) => handle_watch_command(matches, sub_matches),
        Some(("pay", sub_matches)) => handle_pay_command(matches, sub_matches),
        Some(("delete", sub_matches)) => handle_delete_command(matches, sub_matches),
        Some(("complaint", sub_matches)) => handle_complaint_command(matches, sub_matches),
        Some(("visit", sub_matches)) => handle_visit_command(matches, sub_matches),
        Some(("attend", sub_matches)) => handle_attend_command(matches, sub_matches),
        Some(("assign-room", sub_matches)) => handle_assign_room_command(matches, sub_matches),
        Some(("cleaning-done", sub_matches)) => handle_cleaning_done_command(matches, sub_matches),
        Some(("food", sub_matches)) => handle_food_command(matches, sub_matches),
        Some(("completions", sub_matches)) => handle_completions_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    events::log_app_shutdown(if result.is_ok() { "completed" } else { "failed" });
    result
}

fn handle_login_command(matches: &ArgMatches, sub_matches: &ArgMatches) -> CommandResult {
    let user = sub_matches
        .get_one::<String>("user")
        .ok_or("User argument is required")?;
    let password = match sub_matches.get_one::<String>("password") {
        Some(password) => password.clone(),
        None => read_password()?,
    };

    info!(event = "cli.login_started", user = user.as_str());
    let conn = Connection::open(matches)?;
    match runtime()?.block_on(session::login(&conn.client, user, &password)) {
        Ok(identity) => {
            println!(
                "✅ Signed in as {} ({})",
                identity.display_name(),
                identity.role
            );
            info!(event = "cli.login_completed", role = %identity.role);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Login failed: {}", e);
            error!(event = "cli.login_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn handle_logout_command(matches: &ArgMatches) -> CommandResult {
    let conn = Connection::open(matches)?;
    session::logout(&conn.guard)?;
    println!("✅ Signed out");
    info!(event = "cli.logout_completed");
    Ok(())
}

fn handle_whoami_command(matches: &ArgMatches) -> CommandResult {
    let conn = Connection::open(matches)?;
    match session::whoami(&conn.guard) {
        Ok(identity) => {
            println!("User:  {}", identity.display_name());
            println!("Role:  {}", identity.role);
            if let Some(email) = &identity.email {
                println!("Email: {}", email);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("   Use 'hostel login <user>' to sign in.");
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn handle_show_command(matches: &ArgMatches, sub_matches: &ArgMatches) -> CommandResult {
    let json = sub_matches.get_flag("json");
    let conn = Connection::open(matches)?;
    let section = section_arg(sub_matches, conn.config.initial_section()?)?;
    conn.require_session()?;
    let dashboard = conn.dashboard()?;

    info!(event = "cli.show_started", section = %section);
    let outcome = runtime()?.block_on(dashboard.activate_section(section))?;

    if let Some(view) = dashboard.view(section) {
        if json {
            println!("{}", serde_json::to_string_pretty(&view)?);
        } else {
            render::print_view(&view);
        }
    }
    print_notices(&conn.notices, json);

    match outcome {
        LoadOutcome::Rendered => Ok(()),
        LoadOutcome::Failed(message) => Err(message.into()),
        LoadOutcome::Unauthorized => Err("Session expired".into()),
    }
}

fn handle_watch_command(matches: &ArgMatches, sub_matches: &ArgMatches) -> CommandResult {
    let conn = Connection::open(matches)?;
    let section = section_arg(sub_matches, conn.config.initial_section()?)?;
    let interval = sub_matches
        .get_one::<u64>("interval")
        .map(|secs| Duration::from_secs(*secs))
        .unwrap_or_else(|| conn.config.refresh_interval());
    let limit = sub_matches.get_one::<u64>("count").copied();
    conn.require_session()?;
    let dashboard = conn.dashboard()?;

    info!(
        event = "cli.watch_started",
        section = %section,
        interval_secs = interval.as_secs()
    );
    runtime()?.block_on(watch(&dashboard, &conn.notices, section, interval, limit))
}

async fn watch(
    dashboard: &Arc<Dashboard>,
    notices: &NoticeLog,
    section: SectionId,
    interval: Duration,
    limit: Option<u64>,
) -> CommandResult {
    let outcome = dashboard.activate_section(section).await?;
    if let Some(view) = dashboard.view(section) {
        render::print_view(&view);
    }
    print_notices(notices, false);
    if outcome == LoadOutcome::Unauthorized {
        return Err("Session expired".into());
    }

    let mut events = dashboard.subscribe();
    dashboard.start_auto_refresh(interval)?;
    println!(
        "\nRefreshing every {}s. Press Ctrl-C to stop.",
        interval.as_secs()
    );

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut refreshes = 0u64;

    let result: CommandResult = loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!(event = "cli.watch_interrupted");
                break Ok(());
            }
            event = events.recv() => match event {
                Ok(DashboardEvent::SectionLoaded { section: loaded, .. }) if loaded == section => {
                    println!();
                    if let Some(view) = dashboard.view(section) {
                        render::print_view(&view);
                    }
                    print_notices(notices, false);
                    refreshes += 1;
                    if limit.is_some_and(|limit| refreshes >= limit) {
                        break Ok(());
                    }
                }
                Ok(DashboardEvent::SessionExpired) => {
                    print_notices(notices, false);
                    break Err("Session expired".into());
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(event = "cli.watch_lagged", skipped = skipped);
                }
                Err(RecvError::Closed) => break Ok(()),
            }
        }
    };

    dashboard.stop_auto_refresh();
    info!(event = "cli.watch_completed", refreshes = refreshes);
    result
}

fn handle_pay_command(matches: &ArgMatches, sub_matches: &ArgMatches) -> CommandResult {
    let id = *sub_matches.get_one::<u64>("id").ok_or("Payment id is required")?;
    let method: PaymentMethod = sub_matches
        .get_one::<String>("method")
        .map(String::as_str)
        .unwrap_or("CASH")
        .parse()?;

    let conn = Connection::open(matches)?;
    conn.require_session()?;
    let dashboard = conn.dashboard()?;
    let outcome = runtime()?.block_on(dashboard.collect_payment(id, method));
    finish("pay", outcome, &conn.notices)
}

fn handle_delete_command(matches: &ArgMatches, sub_matches: &ArgMatches) -> CommandResult {
    let resource: Resource = sub_matches
        .get_one::<String>("resource")
        .ok_or("Resource is required")?
        .parse()?;
    let id = *sub_matches.get_one::<u64>("id").ok_or("Record id is required")?;
    let confirm = StdinConfirm {
        assume_yes: sub_matches.get_flag("yes"),
    };

    let conn = Connection::open(matches)?;
    conn.require_session()?;
    let dashboard = conn.dashboard()?;
    let outcome = runtime()?.block_on(dashboard.delete(resource, id, &confirm));
    finish("delete", outcome, &conn.notices)
}

fn handle_complaint_command(matches: &ArgMatches, sub_matches: &ArgMatches) -> CommandResult {
    let id = *sub_matches.get_one::<u64>("id").ok_or("Complaint id is required")?;
    let resolution = sub_matches.get_one::<String>("resolve").cloned();
    let status: Option<ComplaintStatus> = match sub_matches.get_one::<String>("status") {
        Some(status) => Some(status.parse()?),
        None => None,
    };

    let conn = Connection::open(matches)?;
    conn.require_session()?;
    let dashboard = conn.dashboard()?;
    let rt = runtime()?;
    let outcome = match (status, resolution) {
        (Some(status), _) => rt.block_on(dashboard.update_complaint_status(id, status)),
        (None, resolution) => rt.block_on(dashboard.resolve_complaint(id, resolution.as_deref())),
    };
    finish("complaint", outcome, &conn.notices)
}

fn handle_visit_command(matches: &ArgMatches, sub_matches: &ArgMatches) -> CommandResult {
    let id = *sub_matches.get_one::<u64>("id").ok_or("Visit id is required")?;
    let status: VisitStatus = sub_matches
        .get_one::<String>("status")
        .ok_or("Status is required")?
        .parse()?;

    let conn = Connection::open(matches)?;
    conn.require_session()?;
    let dashboard = conn.dashboard()?;
    let outcome = runtime()?.block_on(dashboard.update_visit_status(id, status));
    finish("visit", outcome, &conn.notices)
}

fn handle_attend_command(matches: &ArgMatches, sub_matches: &ArgMatches) -> CommandResult {
    let status: AttendanceStatus = sub_matches
        .get_one::<String>("status")
        .map(String::as_str)
        .unwrap_or("PRESENT")
        .parse()?;
    let resident = sub_matches.get_one::<u64>("resident").copied();
    let confirm = StdinConfirm {
        assume_yes: sub_matches.get_flag("yes"),
    };

    let conn = Connection::open(matches)?;
    conn.require_session()?;
    let dashboard = conn.dashboard()?;
    let rt = runtime()?;
    let outcome = match resident {
        Some(resident) => rt.block_on(dashboard.quick_mark_attendance(resident, status)),
        None => rt.block_on(dashboard.mark_all_present(&confirm)),
    };
    finish("attend", outcome, &conn.notices)
}

fn handle_assign_room_command(matches: &ArgMatches, sub_matches: &ArgMatches) -> CommandResult {
    let resident = *sub_matches
        .get_one::<u64>("resident")
        .ok_or("Resident id is required")?;
    let room = sub_matches.get_one::<u64>("room").copied();

    let conn = Connection::open(matches)?;
    conn.require_session()?;
    let dashboard = conn.dashboard()?;
    let rt = runtime()?;

    let Some(room) = room else {
        let rooms = rt.block_on(dashboard.available_rooms());
        print_notices(&conn.notices, false);
        let rooms = rooms?;
        if !rooms.is_empty() {
            let mut table = Table::new(&["ID", "Room", "Free"]);
            for room in &rooms {
                table.add_row(vec![
                    room.id.to_string(),
                    room.label(),
                    room.available_spots
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ]);
            }
            table.print();
            println!("Assign with 'hostel assign-room {} <room-id>'.", resident);
        }
        return Ok(());
    };

    let outcome = rt.block_on(dashboard.assign_room(resident, room));
    finish("assign-room", outcome, &conn.notices)
}

fn handle_cleaning_done_command(matches: &ArgMatches, sub_matches: &ArgMatches) -> CommandResult {
    let id = *sub_matches.get_one::<u64>("id").ok_or("Task id is required")?;

    let conn = Connection::open(matches)?;
    conn.require_session()?;
    let dashboard = conn.dashboard()?;
    let rt = runtime()?;

    // the completed task is written back from the cached schedule
    let loaded = rt.block_on(dashboard.activate_section(SectionId::Cleaning))?;
    if loaded != LoadOutcome::Rendered {
        print_notices(&conn.notices, false);
        return Err("Could not load the cleaning schedule".into());
    }
    let outcome = rt.block_on(dashboard.mark_cleaning_complete(id));
    finish("cleaning-done", outcome, &conn.notices)
}

fn handle_food_command(matches: &ArgMatches, sub_matches: &ArgMatches) -> CommandResult {
    let json = sub_matches.get_flag("json");
    let date = match sub_matches.get_one::<String>("date") {
        Some(raw) => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| format!("Invalid date '{}': {} (expected YYYY-MM-DD)", raw, e))?,
        ),
        None => None,
    };

    let conn = Connection::open(matches)?;
    conn.require_session()?;
    let dashboard = conn.dashboard()?;
    let rt = runtime()?;

    let loaded = rt.block_on(dashboard.activate_section(SectionId::Food))?;
    let mut failure = match loaded {
        LoadOutcome::Rendered => None,
        LoadOutcome::Failed(message) => Some(message),
        LoadOutcome::Unauthorized => Some("Session expired".to_string()),
    };
    if let Some(date) = date
        && failure.is_none()
    {
        match rt.block_on(dashboard.load_food_by_date(date)) {
            ActionOutcome::Completed => {}
            ActionOutcome::Rejected(message) | ActionOutcome::Failed(message) => {
                failure = Some(message)
            }
            _ => failure = Some("Session expired".to_string()),
        }
    }

    if let Some(view) = dashboard.view(SectionId::Food) {
        if json {
            println!("{}", serde_json::to_string_pretty(&view)?);
        } else {
            render::print_view(&view);
        }
    }
    print_notices(&conn.notices, json);

    match failure {
        None => Ok(()),
        Some(message) => Err(message.into()),
    }
}

fn handle_completions_command(sub_matches: &ArgMatches) -> CommandResult {
    let shell = sub_matches
        .get_one::<Shell>("shell")
        .ok_or("Shell argument is required")?;

    let mut cmd = build_cli();
    clap_complete::generate(*shell, &mut cmd, "hostel", &mut io::stdout());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piped_password_keeps_inner_whitespace() {
        assert_eq!(password_from_line("s3cret pass \r\n"), "s3cret pass ");
        assert_eq!(password_from_line("s3cret"), "s3cret");
        assert_eq!(password_from_line("\n"), "");
    }

    #[test]
    fn test_is_confirmation_accepted_yes() {
        assert!(is_confirmation_accepted("y"));
        assert!(is_confirmation_accepted("YES\n"));
        assert!(is_confirmation_accepted(" Yes "));
    }

    #[test]
    fn test_is_confirmation_accepted_no() {
        assert!(!is_confirmation_accepted(""));
        assert!(!is_confirmation_accepted("n"));
        assert!(!is_confirmation_accepted("yeah"));
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        let confirm = StdinConfirm { assume_yes: true };
        assert!(confirm.confirm("Delete this room?"));
    }

    #[test]
    fn test_section_arg_falls_back() {
        let matches = build_cli()
            .try_get_matches_from(["hostel", "show"])
            .unwrap();
        let show = matches.subcommand_matches("show").unwrap();
        assert_eq!(
            section_arg(show, SectionId::Cleaning).unwrap(),
            SectionId::Cleaning
        );

        let matches = build_cli()
            .try_get_matches_from(["hostel", "show", "payments"])
            .unwrap();
        let show = matches.subcommand_matches("show").unwrap();
        assert_eq!(
            section_arg(show, SectionId::Dashboard).unwrap(),
            SectionId::Payments
        );
    }
}
