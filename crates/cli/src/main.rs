//! Passly CLI - inspect and edit the pass builder's stored state.
//!
//! Works on the same file-backed storage as the studio, so a draft edited
//! here shows up in the wizard and vice versa.
//!
//! # Usage
//!
//! ```bash
//! # Print the current draft
//! passly-cli draft show
//!
//! # Set a single field (value is taken as a string unless --json is given)
//! passly-cli draft set campaignName "Summer Coffee Lovers"
//! passly-cli draft set stampsNeeded 8
//! passly-cli draft set logoUrl            # clears the logo
//!
//! # Merge a saved snapshot into the draft
//! passly-cli draft hydrate snapshot.json
//!
//! # Where does /en/create-new-pass/business sit in the wizard?
//! passly-cli steps /en/create-new-pass/business
//!
//! # Saved passes
//! passly-cli passes save-draft
//! passly-cli passes list
//! passly-cli passes toggle 1718000000000
//! ```
//!
//! # Commands
//!
//! - `draft` - Show, edit, reset or change the lifecycle of the draft
//! - `steps` - Wizard navigation for a step slug or route path
//! - `passes` - Manage the saved-pass list
//! - `auth` - Write, remove or inspect the auth marker
//!
//! # Environment Variables
//!
//! - `STUDIO_DATA_DIR` - Storage directory shared with the studio (default: ./data)
//! - `STUDIO_SAVED_PASSES_POLICY` - `last-writer-wins` (default) or `reject-stale`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use passly_builder::{FileStore, SharedStorage, WritePolicy};

mod commands;

#[derive(Parser)]
#[command(name = "passly-cli")]
#[command(author, version, about = "Passly pass builder tools")]
struct Cli {
    /// Storage directory
    #[arg(long, global = true, env = "STUDIO_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with the in-progress draft
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
    /// Show wizard navigation for a step slug or route path
    Steps {
        /// Step slug (`branding`) or path (`/de/create-new-pass/branding`)
        target: String,
    },
    /// Manage saved passes
    Passes {
        /// Write policy for the saved-pass list
        #[arg(long, env = "STUDIO_SAVED_PASSES_POLICY", default_value = "last-writer-wins")]
        policy: WritePolicy,

        #[command(subcommand)]
        action: PassesAction,
    },
    /// Manage the auth marker
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum DraftAction {
    /// Print the draft as JSON
    Show,
    /// Set one field by its wire key
    Set {
        /// Field key, e.g. `campaignName` or `stampsNeeded`
        field: String,

        /// New value; omit to send null
        value: Option<String>,

        /// Parse the value as JSON instead of taking it as a string
        #[arg(long)]
        json: bool,
    },
    /// Merge a JSON snapshot file into the draft
    Hydrate {
        /// Path to the snapshot
        file: PathBuf,
    },
    /// Restore the default draft
    Reset,
    /// Mark the draft published
    Publish,
    /// Mark the draft archived
    Archive,
}

#[derive(Subcommand)]
enum PassesAction {
    /// Print the saved list, oldest first
    List,
    /// Save the current draft as a draft record
    SaveDraft,
    /// Save the current draft as a published record
    Publish,
    /// Flip a record between draft and published
    Toggle {
        /// Record id
        id: String,
    },
    /// Remove a record
    Delete {
        /// Record id
        id: String,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Write the auth marker
    Login {
        /// Email to remember
        email: String,
    },
    /// Remove the auth marker
    Logout,
    /// Show whether the marker is present
    Status,
}

fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let storage: SharedStorage = Arc::new(FileStore::new(cli.data_dir));

    match cli.command {
        Commands::Draft { action } => match action {
            DraftAction::Show => commands::draft::show(&storage)?,
            DraftAction::Set { field, value, json } => {
                commands::draft::set(storage, &field, value.as_deref(), json)?;
            }
            DraftAction::Hydrate { file } => commands::draft::hydrate(storage, &file)?,
            DraftAction::Reset => commands::draft::reset(storage)?,
            DraftAction::Publish => commands::draft::publish(storage)?,
            DraftAction::Archive => commands::draft::archive(storage)?,
        },
        Commands::Steps { target } => commands::steps::show(&target)?,
        Commands::Passes { policy, action } => {
            let passes = commands::passes::Passes::new(storage, policy);
            match action {
                PassesAction::List => passes.list()?,
                PassesAction::SaveDraft => passes.save_draft()?,
                PassesAction::Publish => passes.publish()?,
                PassesAction::Toggle { id } => passes.toggle(&id)?,
                PassesAction::Delete { id } => passes.delete(&id)?,
            }
        }
        Commands::Auth { action } => match action {
            AuthAction::Login { email } => commands::auth::login(storage, &email)?,
            AuthAction::Logout => commands::auth::logout(storage)?,
            AuthAction::Status => commands::auth::status(storage)?,
        },
    }
    Ok(())
}
