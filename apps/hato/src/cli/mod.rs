//! # hato CLI Module
//!
//! The command-line surface over the herd store.
//!
//! ## Available Commands
//!
//! - `list` - List animals with filter/search/sort
//! - `show` - Show one animal with its medical and vaccination records
//! - `add` / `update` / `remove` - Animal writes from JSON files
//! - `events` / `add-event` / `update-event` / `remove-event` - Medical events
//! - `vaccinations` / `add-vaccination` / `update-vaccination` - Vaccinations
//! - `export` - Export the herd as JSON or CSV
//! - `snapshot` / `restore` - Binary state snapshots

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

use crate::api::{ApiError, HttpGateway};
use crate::config::{ConfigError, Settings};
use crate::store::HerdStore;

// =============================================================================
// ERRORS
// =============================================================================

/// Top-level CLI failure.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Core(#[from] hato_core::HatoError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// A load failed; the store recorded the message, the CLI surfaces it.
    #[error("{0}")]
    Load(String),

    #[error("{0}")]
    InvalidArgument(String),
}

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// hato - livestock herd client
///
/// A command-line client for the livestock management API: animals, medical
/// events, and vaccinations, with local filtering, search, and snapshots.
#[derive(Parser, Debug)]
#[command(name = "hato")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML config file (default: ./hato.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long = "json", global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List animals, with optional filters and sorting
    List {
        /// Filter by status (healthy, sick, quarantine, pregnant, sold, deceased)
        #[arg(short, long)]
        status: Option<String>,

        /// Filter by kind (cow, bull, calf)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Filter by breed (case-insensitive substring)
        #[arg(short, long)]
        breed: Option<String>,

        /// Free-text search over tag number, name, and breed
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Sort key (tagNumber, name, birthDate, status, breed)
        #[arg(long, default_value = "tagNumber")]
        sort_by: String,

        /// Sort direction (asc, desc)
        #[arg(long, default_value = "asc")]
        sort_order: String,
    },

    /// Show one animal with its medical history and vaccinations
    Show {
        /// Animal id
        id: String,
    },

    /// Create an animal from a JSON file
    Add {
        /// Path to the JSON creation payload
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Update an animal from a JSON patch file
    Update {
        /// Animal id
        id: String,

        /// Path to the JSON patch (only present fields change)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Delete an animal
    Remove {
        /// Animal id
        id: String,
    },

    /// List medical events
    Events {
        /// Limit to one animal's events
        #[arg(short, long)]
        animal: Option<String>,

        /// Only events from the last N days
        #[arg(short, long)]
        recent: Option<i64>,
    },

    /// Create a medical event from a JSON file
    AddEvent {
        /// Path to the JSON creation payload
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Update a medical event from a JSON patch file
    UpdateEvent {
        /// Event id
        id: String,

        /// Path to the JSON patch
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Delete a medical event
    RemoveEvent {
        /// Event id
        id: String,
    },

    /// List vaccinations
    Vaccinations {
        /// Limit to one animal's vaccinations
        #[arg(short, long)]
        animal: Option<String>,

        /// Only vaccinations due within N days (overdue included)
        #[arg(short, long)]
        upcoming: Option<i64>,
    },

    /// Create a vaccination from a JSON file
    AddVaccination {
        /// Path to the JSON creation payload
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Update a vaccination from a JSON patch file
    UpdateVaccination {
        /// Vaccination id
        id: String,

        /// Path to the JSON patch
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Export the herd to a file
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export format (json, csv)
        #[arg(short = 't', long, default_value = "json")]
        format: String,
    },

    /// Write a binary snapshot of the full herd state
    Snapshot {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Inspect a binary snapshot offline
    Restore {
        /// Snapshot file path
        #[arg(short, long)]
        input: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), AppError> {
    let settings = Settings::resolve(cli.config.as_deref())?;
    let gateway = HttpGateway::new(settings.api_url, settings.api_token);
    let mut store = HerdStore::new(gateway);
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::List {
            status,
            kind,
            breed,
            search,
            sort_by,
            sort_order,
        }) => {
            cmd_list(
                &mut store, json_mode, status, kind, breed, search, &sort_by, &sort_order,
            )
            .await
        }
        Some(Commands::Show { id }) => cmd_show(&mut store, json_mode, &id).await,
        Some(Commands::Add { file }) => cmd_add(&mut store, json_mode, &file).await,
        Some(Commands::Update { id, file }) => {
            cmd_update(&mut store, json_mode, &id, &file).await
        }
        Some(Commands::Remove { id }) => cmd_remove(&mut store, &id).await,
        Some(Commands::Events { animal, recent }) => {
            cmd_events(&mut store, json_mode, animal.as_deref(), recent).await
        }
        Some(Commands::AddEvent { file }) => cmd_add_event(&mut store, json_mode, &file).await,
        Some(Commands::UpdateEvent { id, file }) => {
            cmd_update_event(&mut store, json_mode, &id, &file).await
        }
        Some(Commands::RemoveEvent { id }) => cmd_remove_event(&mut store, &id).await,
        Some(Commands::Vaccinations { animal, upcoming }) => {
            cmd_vaccinations(&mut store, json_mode, animal.as_deref(), upcoming).await
        }
        Some(Commands::AddVaccination { file }) => {
            cmd_add_vaccination(&mut store, json_mode, &file).await
        }
        Some(Commands::UpdateVaccination { id, file }) => {
            cmd_update_vaccination(&mut store, json_mode, &id, &file).await
        }
        Some(Commands::Export { output, format }) => {
            cmd_export(&mut store, &output, &format).await
        }
        Some(Commands::Snapshot { output }) => cmd_snapshot(&mut store, &output).await,
        Some(Commands::Restore { input }) => cmd_restore(json_mode, &input),
        None => {
            // No subcommand - list the whole herd by default
            cmd_list(
                &mut store, json_mode, None, None, None, None, "tagNumber", "asc",
            )
            .await
        }
    }
}
