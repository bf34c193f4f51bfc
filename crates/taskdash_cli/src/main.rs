//! Terminal front-end for the task/notes dashboard.
//!
//! # Responsibility
//! - Map one command line to one dashboard action.
//! - Re-render from fresh reads after every mutating command.

use chrono::Utc;
use clap::{Parser, Subcommand};
use log::warn;
use std::error::Error;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use taskdash_core::config::resolve_path;
use taskdash_core::db::open_db;
use taskdash_core::{
    init_logging, ActionOutcome, Dashboard, DashboardAction, DashboardConfig, KeyValueStore,
    SqliteKvStore, TaskId,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "taskdash: tasks and notes in your terminal", long_about = None)]
struct Cli {
    /// Data directory (defaults to $TASKDASH_HOME or ./.taskdash).
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a task.
    Add { text: String },
    /// Toggle a task between pending and completed.
    Toggle { id: TaskId },
    /// Replace a task's description.
    Edit { id: TaskId, text: String },
    /// Delete a task.
    Delete {
        id: TaskId,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove every completed task.
    ClearCompleted,
    /// List tasks.
    List {
        /// all|completed|pending; anything else lists all tasks.
        #[arg(short, long, default_value = "all")]
        filter: String,
    },
    /// Show task counts.
    Stats,
    /// Read or write the notes.
    #[command(subcommand)]
    Notes(NotesCommand),
    /// Show the whole dashboard.
    Show {
        #[arg(short, long, default_value = "all")]
        filter: String,
    },
}

#[derive(Subcommand, Debug)]
enum NotesCommand {
    /// Print the notes and when they were saved.
    Show,
    /// Replace the notes.
    Save { text: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(&cli)?;
    std::fs::create_dir_all(&config.home_dir)?;

    // Logging is best-effort; the dashboard still works without it.
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = open_db(&config.db_path)?;
    let store = match config.quota_bytes {
        Some(quota_bytes) => SqliteKvStore::with_quota(&conn, quota_bytes),
        None => SqliteKvStore::new(&conn),
    };
    let mut dashboard = Dashboard::open(store, &config.tasks_key, &config.notes_key)?;

    match cli.command {
        Commands::Add { text } => {
            if let ActionOutcome::TaskAdded(id) = dashboard.apply(DashboardAction::AddTask(text))? {
                println!("Added task {id}");
            }
            print_tasks(&dashboard)?;
        }
        Commands::Toggle { id } => {
            let outcome = dashboard.apply(DashboardAction::ToggleTask(id.clone()))?;
            if outcome == (ActionOutcome::TaskToggled { found: false }) {
                warn!("event=cli_toggle module=cli status=noop task_id={id}");
            }
            print_tasks(&dashboard)?;
        }
        Commands::Edit { id, text } => {
            dashboard.apply(DashboardAction::EditTask(id, text))?;
            print_tasks(&dashboard)?;
        }
        Commands::Delete { id, yes } => {
            if yes || confirm("Delete this task?")? {
                dashboard.apply(DashboardAction::DeleteTask(id))?;
            }
            print_tasks(&dashboard)?;
        }
        Commands::ClearCompleted => {
            if let ActionOutcome::CompletedCleared(removed) =
                dashboard.apply(DashboardAction::ClearCompleted)?
            {
                println!("Removed {removed} completed task(s)");
            }
            print_tasks(&dashboard)?;
        }
        Commands::List { filter } => {
            dashboard.apply(DashboardAction::SetFilter(filter))?;
            print_tasks(&dashboard)?;
        }
        Commands::Stats => {
            let stats = dashboard.tasks().stats();
            println!(
                "Total: {}  Completed: {}  Pending: {}",
                stats.total, stats.completed, stats.pending
            );
        }
        Commands::Notes(NotesCommand::Show) => {
            println!("{}", dashboard.render(Utc::now())?.notes_section());
        }
        Commands::Notes(NotesCommand::Save { text }) => {
            dashboard.apply(DashboardAction::SaveNotes(text))?;
            println!("{}", dashboard.render(Utc::now())?.notes_section());
        }
        Commands::Show { filter } => {
            dashboard.apply(DashboardAction::SetFilter(filter))?;
            println!("{}", dashboard.render(Utc::now())?);
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<DashboardConfig, Box<dyn Error>> {
    let mut config = DashboardConfig::from_env()?;
    if let Some(home) = cli.home.as_deref() {
        let cwd = std::env::current_dir()?;
        config = config.with_home(resolve_path(home, &cwd))?;
    }
    if let Some(level) = cli.log_level.as_deref() {
        config.log_level = level.to_string();
    }
    Ok(config)
}

fn print_tasks<S: KeyValueStore + Clone>(dashboard: &Dashboard<S>) -> Result<(), Box<dyn Error>> {
    println!("{}", dashboard.render(Utc::now())?.tasks_section());
    Ok(())
}

fn confirm(question: &str) -> std::io::Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
