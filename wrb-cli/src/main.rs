//! wrb — hand Wwise sounds to REAPER and bring the renders back.
//!
//! # Usage
//!
//! ```text
//! wrb open [--yes | --no]
//! wrb sync
//! wrb check-format
//! wrb config show|path|set-exe <PATH>|set-format <TOKEN>|reset-format
//! wrb manifest show [--json]
//! wrb manifest edit
//! ```

mod commands;
mod context;
mod guard;
mod interrupt;
mod log_rotation;
mod logging;
mod prompt;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{config::ConfigCommand, manifest::ManifestCommand, open::OpenArgs};
use context::AppContext;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "wrb",
    version,
    about = "Round-trip Wwise sounds through REAPER",
    long_about = None,
)]
struct Cli {
    /// Log at debug level regardless of RUST_LOG.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the current Wwise selection (or the last one) in REAPER.
    Open(OpenArgs),

    /// Render the last selection in REAPER and import the results into Wwise.
    Sync,

    /// Print REAPER's render configuration to its console.
    CheckFormat,

    /// Show or change bridge settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Inspect the persisted selection.
    Manifest {
        #[command(subcommand)]
        command: ManifestCommand,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let paths = context::resolve_paths()?;
    logging::init(&paths, cli.verbose);

    let mut ctx = AppContext::load(paths)?;
    match cli.command {
        Commands::Open(args) => args.run(&ctx),
        Commands::Sync => commands::sync::run(&ctx),
        Commands::CheckFormat => commands::check_format::run(&ctx),
        Commands::Config { command } => commands::config::run(command, &mut ctx),
        Commands::Manifest { command } => commands::manifest::run(command, &ctx),
    }
}
