//! # tasktracker
//!
//! Record how long you spend on things. Each task is an activity name, a
//! date, a start time and an end time; the duration is computed for you.
//!
//! ## Usage
//!
//! Run without arguments to open the interactive UI:
//!
//! ```bash
//! tasktracker
//! ```
//!
//! **List view**: `a` add, `Enter`/`e` edit, `r` toggle reminder, `q` quit.
//!
//! **Detail view**: `Tab` moves between fields, `Enter` opens the date or
//! time picker, `Ctrl+S` saves, `Esc` cancels, `Ctrl+D` deletes (existing
//! tasks only). Cancel and delete ask for confirmation.
//!
//! From the command line:
//!
//! ```bash
//! tasktracker add "Run" --date 2024-01-23 --start 06:00 --end 06:30
//! tasktracker list --date 2024-01-23
//! tasktracker edit 1 --end 06:45
//! tasktracker remove 1
//! tasktracker settings --toggle-reminder
//! ```
//!
//! An end time before the start time means the task ran past midnight.
//!
//! ## Files
//!
//! * Tasks: `TASKS_DB`, else `data_file` from the config, else
//!   `~/.local/share/tasktracker/tasks.json` on Linux.
//! * Config: `TASKTRACKER_CONFIG`, else `~/.config/tasktracker/config.toml`.
//! * Log: `tasktracker.log` in the data directory; `RUST_LOG` sets the filter.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::process::ExitCode;
use std::rc::Rc;
use tracing::error;

use tasktracker::commands::*;
use tasktracker::config::AppConfig;
use tasktracker::logging;
use tasktracker::storage::{data_dir, db_path, JsonFileStore};
use tasktracker::tui::run_tui;

#[derive(Parser)]
#[command(name = "tasktracker")]
#[command(about = "Track time spent on activities", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a task
    Add {
        /// Activity name (quoted if it has spaces)
        activity: String,
        /// Date in YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Start time in HH:MM (default: now)
        #[arg(short, long)]
        start: Option<String>,
        /// End time in HH:MM (default: now)
        #[arg(short, long)]
        end: Option<String>,
    },
    /// List tasks, most recent first
    List {
        /// Only show tasks on this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Edit a task
    Edit {
        id: u64,
        /// New activity name
        #[arg(short, long)]
        activity: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New start time
        #[arg(short, long)]
        start: Option<String>,
        /// New end time
        #[arg(short, long)]
        end: Option<String>,
    },
    /// Remove a task
    Remove {
        id: u64,
    },
    /// Show or change settings
    Settings {
        /// Turn the task reminder on or off
        #[arg(long)]
        toggle_reminder: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Open interactive TUI
    Ui,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = match AppConfig::config_path() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut config = match AppConfig::load_from(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}; using defaults", e);
            AppConfig::default()
        }
    };
    if let Err(e) = logging::init(&config, &data_dir()) {
        eprintln!("Logging disabled: {}", e);
    }

    let store = JsonFileStore::new(db_path(&config));

    let result = match cli.command {
        Some(Commands::Add { activity, date, start, end }) => {
            cmd_add(&store, activity, date, start, end, false).map(|_| ())
        }
        Some(Commands::List { date }) => cmd_list(&store, date),
        Some(Commands::Edit { id, activity, date, start, end }) => {
            cmd_edit(&store, id, activity, date, start, end, false)
        }
        Some(Commands::Remove { id }) => cmd_remove(&store, id, false),
        Some(Commands::Settings { toggle_reminder }) => {
            cmd_settings(&mut config, &config_path, toggle_reminder, false).map(|_| ())
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "tasktracker", &mut io::stdout());
            Ok(())
        }
        Some(Commands::Ui) | None => {
            return match run_tui(Rc::new(store), config, config_path) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error running TUI: {}", e);
                    ExitCode::FAILURE
                }
            };
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
