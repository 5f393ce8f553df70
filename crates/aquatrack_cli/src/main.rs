//! Command-line front end for the AquaTrack core.
//!
//! # Responsibility
//! - Drive `IntakeStore` operations against a local SQLite file.
//! - Print the same status lines the app screen shows.

use anyhow::{Context, Result};
use aquatrack_core::db::open_db;
use aquatrack_core::{
    default_log_level, init_logging, IntakeStore, KeyValueTrackerRepository, SqliteKeyValueStore,
    TrackerSnapshot, QUICK_ADD_AMOUNTS_ML,
};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "aquatrack")]
#[command(about = "Log water intake against a daily goal")]
#[command(version)]
struct Cli {
    /// SQLite file holding tracker state
    #[arg(long, env = "AQUATRACK_DB_PATH", default_value = "aquatrack.sqlite3")]
    db: PathBuf,

    /// Log verbosity (trace|debug|info|warn|error)
    #[arg(long, default_value_t = default_log_level().to_string())]
    log_level: String,

    /// Directory for rolling log files; logging is off when omitted
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show today's progress
    Status,
    /// Log a drink of AMOUNT ml
    Add { amount: u32 },
    /// Log one of the quick-add amounts by position (0-based)
    Quick { index: usize },
    /// Remove the most recent drink
    Undo,
    /// Move the daily goal by one 250ml step
    Goal {
        #[arg(value_enum)]
        direction: GoalDirection,
    },
    /// Check core linkage
    Ping,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GoalDirection {
    Up,
    Down,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let log_dir = absolute_dir(log_dir)?;
        init_logging(&cli.log_level, &log_dir.to_string_lossy()).map_err(anyhow::Error::msg)?;
    }

    if matches!(cli.command, Command::Ping) {
        println!("aquatrack_core ping={}", aquatrack_core::ping());
        println!("aquatrack_core version={}", aquatrack_core::core_version());
        return Ok(());
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open tracker database `{}`", cli.db.display()))?;
    let mut store = IntakeStore::load(KeyValueTrackerRepository::new(SqliteKeyValueStore::new(
        &conn,
    )));
    info!("event=cli_command module=cli status=start");

    match cli.command {
        Command::Status | Command::Ping => {}
        Command::Add { amount } => {
            let event = store.add_entry(amount).context("failed to add entry")?;
            println!("{}", event.message());
        }
        Command::Quick { index } => {
            let event = store.add_quick_amount(index).with_context(|| {
                format!("quick-add options are {QUICK_ADD_AMOUNTS_ML:?} (index 0-3)")
            })?;
            println!("{}", event.message());
        }
        Command::Undo => match store.remove_last_entry().context("failed to remove entry")? {
            Some(event) => println!("{}", event.message()),
            None => println!("Nothing to remove."),
        },
        Command::Goal { direction } => {
            let goal = match direction {
                GoalDirection::Up => store.increase_goal(),
                GoalDirection::Down => store.decrease_goal(),
            }
            .context("failed to change goal")?;
            println!("Daily goal: {goal}ml per day");
        }
    }

    print!("{}", render_status(&store.snapshot()));
    Ok(())
}

fn absolute_dir(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    Ok(cwd.join(path))
}

fn render_status(snapshot: &TrackerSnapshot) -> String {
    let mut lines = vec![format!(
        "{}ml of {}ml ({}% complete)",
        snapshot.today_intake, snapshot.daily_goal, snapshot.progress_percent_rounded
    )];
    lines.push(if snapshot.goal_achieved {
        "Goal achieved! Great job!".to_string()
    } else {
        format!(
            "{}ml remaining to reach your goal",
            snapshot.remaining_amount
        )
    });
    lines.push(format!("{} drinks today", snapshot.entry_count));
    if !snapshot.recent_entries.is_empty() {
        lines.push("Recent entries:".to_string());
        lines.extend(snapshot.recent_entries.iter().map(|entry| {
            let local = entry.timestamp().with_timezone(&Local);
            format!("  {:>5}ml  {}", entry.amount(), local.format("%-I:%M %p"))
        }));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
