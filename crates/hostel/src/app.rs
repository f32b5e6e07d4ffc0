use clap::{Arg, ArgAction, Command};

pub const SECTION_NAMES: [&str; 9] = [
    "dashboard",
    "rooms",
    "residents",
    "payments",
    "complaints",
    "visits",
    "attendance",
    "food",
    "cleaning",
];

pub const RESOURCE_NAMES: [&str; 8] = [
    "rooms",
    "residents",
    "payments",
    "complaints",
    "visits",
    "attendance",
    "food",
    "cleaning",
];

fn yes_arg() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .help("Skip the confirmation prompt")
        .action(ArgAction::SetTrue)
}

fn id_arg(name: &'static str, help: &'static str, index: usize) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .index(index)
        .value_parser(clap::value_parser!(u64))
}

pub fn build_cli() -> Command {
    Command::new("hostel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage a hostel from the terminal")
        .long_about("hostel signs in to the hostel management backend as an administrator and shows rooms, residents, payments, complaints, visits, attendance, food preferences and cleaning tasks. 'watch' keeps a section on screen and re-fetches it on a timer.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .help("Backend API base URL (overrides config)")
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("login")
                .about("Sign in and store the session")
                .arg(
                    Arg::new("user")
                        .help("Email or username")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .short('p')
                        .help("Password; prompted without echo when omitted, or read from piped stdin"),
                ),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
        .subcommand(
            Command::new("show")
                .about("Load a section once and print it")
                .arg(
                    Arg::new("section")
                        .help("Section to show")
                        .index(1)
                        .value_parser(SECTION_NAMES),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Keep a section on screen, refreshing it on a timer")
                .arg(
                    Arg::new("section")
                        .help("Section to watch (default: configured initial section)")
                        .index(1)
                        .value_parser(SECTION_NAMES),
                )
                .arg(
                    Arg::new("interval")
                        .long("interval")
                        .short('i')
                        .help("Seconds between refreshes (overrides config)")
                        .value_parser(clap::value_parser!(u64).range(1..)),
                )
                .arg(
                    Arg::new("count")
                        .long("count")
                        .short('n')
                        .help("Stop after this many timed refreshes")
                        .value_parser(clap::value_parser!(u64).range(1..)),
                ),
        )
        .subcommand(
            Command::new("pay")
                .about("Collect a pending payment")
                .arg(id_arg("id", "Payment id", 1))
                .arg(
                    Arg::new("method")
                        .long("method")
                        .short('m')
                        .help("CASH, CARD, BANK_TRANSFER or ONLINE")
                        .default_value("CASH"),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a record")
                .arg(
                    Arg::new("resource")
                        .help("Kind of record")
                        .required(true)
                        .index(1)
                        .value_parser(RESOURCE_NAMES),
                )
                .arg(id_arg("id", "Record id", 2))
                .arg(yes_arg()),
        )
        .subcommand(
            Command::new("complaint")
                .about("Update or resolve a complaint")
                .arg(id_arg("id", "Complaint id", 1))
                .arg(
                    Arg::new("status")
                        .long("status")
                        .short('s')
                        .help("New status: PENDING, IN_PROGRESS or RESOLVED")
                        .required_unless_present("resolve"),
                )
                .arg(
                    Arg::new("resolve")
                        .long("resolve")
                        .help("Resolve with optional notes")
                        .num_args(0..=1)
                        .default_missing_value("")
                        .conflicts_with("status"),
                ),
        )
        .subcommand(
            Command::new("visit")
                .about("Update a visit request's status")
                .arg(id_arg("id", "Visit id", 1))
                .arg(
                    Arg::new("status")
                        .long("status")
                        .short('s')
                        .help("NEW, CONTACTED or CLOSED")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("attend")
                .about("Mark today's attendance")
                .arg(
                    Arg::new("resident")
                        .help("Resident id")
                        .index(1)
                        .value_parser(clap::value_parser!(u64))
                        .required_unless_present("all"),
                )
                .arg(
                    Arg::new("status")
                        .long("status")
                        .short('s')
                        .help("PRESENT, ABSENT or LEAVE")
                        .default_value("PRESENT"),
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .help("Mark every active resident present")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("resident"),
                )
                .arg(yes_arg()),
        )
        .subcommand(
            Command::new("assign-room")
                .about("Assign a room to a resident (lists available rooms when no room is given)")
                .arg(id_arg("resident", "Resident id", 1))
                .arg(
                    Arg::new("room")
                        .help("Room id")
                        .index(2)
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("cleaning-done")
                .about("Mark a cleaning task completed")
                .arg(id_arg("id", "Task id", 1)),
        )
        .subcommand(
            Command::new("food")
                .about("Show food preferences, optionally for one day")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .short('d')
                        .help("Day to show (YYYY-MM-DD)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .help("Target shell")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(clap_complete::Shell)),
                ),
        )
}
