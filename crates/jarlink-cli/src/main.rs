//! Jarlink CLI - Command-line interface for Jarlink
//!
//! This is the main entry point for users interacting with Jarlink.
//! It provides commands for clustering jars into libraries and for
//! resolving a project's extracted relations.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod input;

#[derive(Parser)]
#[command(name = "jarlink")]
#[command(author = "Jarlink Contributors")]
#[command(version)]
#[command(about = "Library clustering and entity resolution for mined code", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to .jarlink/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize Jarlink in a directory
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Cluster jars into libraries
    Cluster {
        /// JSON array of artifacts: [{"id": ..., "fqns": [...]}]
        jars: PathBuf,

        /// JSON object of precomputed scores by artifact id
        #[arg(short, long)]
        scores: Option<PathBuf>,

        /// Output file for the library JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve a project's relations against its entities and the library index
    Resolve {
        /// JSON object with "project", "library" and "relations"
        input: PathBuf,

        /// Output file for resolved relations and unknown entities
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(".jarlink").join("config.json"));

    let result = match cli.command {
        Commands::Init { path } => commands::init(&path),
        Commands::Cluster {
            jars,
            scores,
            output,
        } => commands::cluster(&config_path, &jars, scores.as_deref(), output.as_deref()),
        Commands::Resolve { input, output } => {
            commands::resolve(&config_path, &input, output.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
