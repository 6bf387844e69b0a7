//! typeload: resolve and inspect lazily loaded types from the command line
//!
//! Reads a loader config (JSON), builds an autoloader from it and runs it
//! against unit files on disk.
//!
//! ## Example Usage
//!
//! ```bash
//! # Load a type and report what happened
//! typeload --config app/typeload.json resolve 'Auth\Login'
//!
//! # Show which strategy would handle a name, without loading anything
//! typeload --config app/typeload.json explain Controller_Welcome
//!
//! # Print the registries
//! typeload --config app/typeload.json show --json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use typeload::LoaderConfig;

mod typeload_cli;

use typeload_cli::{explain::ExplainCmd, resolve::ResolveCmd, show::ShowCmd};

#[derive(Parser)]
#[command(
    name = "typeload",
    author,
    version,
    about = "Resolve and load types from namespace registries",
    long_about = "Resolve type names to files through explicit overrides, core namespaces,\n\
                  the conventional application layout and registered namespaces."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Loader config file
    #[arg(long, short, global = true, default_value = "typeload.json")]
    config: PathBuf,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (log resolution decisions to stderr)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a type and report the outcome
    Resolve(ResolveCmd),

    /// Show how a type would be resolved without loading it
    Explain(ExplainCmd),

    /// Print the configured layout and registries
    Show(ShowCmd),
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(std::io::stderr)
            .init();
    }

    let mut config = LoaderConfig::from_path(&cli.config)?;
    config.apply_env()?;
    let loader = Arc::new(config.build());

    let success = match &cli.command {
        Commands::Resolve(cmd) => cmd.execute(&loader, cli.json)?,
        Commands::Explain(cmd) => cmd.execute(&loader, cli.json)?,
        Commands::Show(cmd) => cmd.execute(&loader, cli.json)?,
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
