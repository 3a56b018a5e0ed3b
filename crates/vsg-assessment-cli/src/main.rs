use clap::{Parser, Subcommand};
use std::path::PathBuf;

use vsg_assessment_core::Config;

mod commands;
mod logging;
mod tui;

#[derive(Parser)]
#[command(name = "vsg-assessment", version, about = "VSG Week 1 Assessment")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the assessment interactively (default)
    Run,
    /// Print the question catalog
    Catalog {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fill and submit from arguments, then print the digest
    Digest {
        #[command(flatten)]
        fill: commands::fill::FillArgs,
    },
    /// Fill and submit from arguments, then write the PDF
    Export {
        #[command(flatten)]
        fill: commands::fill::FillArgs,
        /// Output directory (defaults to export.directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run);

    let loaded = Config::load();
    let filter = loaded
        .as_ref()
        .map(|c| c.logging.filter.clone())
        .unwrap_or_else(|_| "info".to_string());
    match command {
        Commands::Run => {
            if let Some(path) = logging::init_file(&filter) {
                tracing::debug!(path = %path.display(), "logging to file");
            }
        }
        _ => logging::init_stderr(&filter),
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default config");
        Config::default()
    });

    let result = match command {
        Commands::Run => commands::run::run(&config),
        Commands::Catalog { json } => commands::catalog::run(json),
        Commands::Digest { fill } => commands::fill::digest(fill),
        Commands::Export { fill, out } => commands::fill::export(fill, out, &config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
