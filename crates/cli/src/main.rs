//! Modelbench CLI
//!
//! Command-line interface for running benchmark suites and inspecting the
//! reports they produce.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use modelbench_cli::commands::{demo, summary};

#[derive(Parser, Debug)]
#[command(name = "modelbench")]
#[command(author, version, about = "Modelbench harness CLI")]
#[command(long_about = "Command-line interface for the Modelbench harness.\n\n\
    Run the demo benchmark suite and inspect the report documents it writes.")]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the demo benchmark suite
    #[command(alias = "d")]
    Demo {
        /// Trials per model/task pair
        #[arg(short, long, default_value_t = 5)]
        repetitions: u32,

        /// Output directory (defaults to current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the full report JSON after the run
        #[arg(long)]
        json: bool,
    },

    /// Show the most recent report
    #[command(alias = "s")]
    Summary {
        /// Output directory (defaults to current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup colored output
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .init();

    // Execute command
    match cli.command {
        Commands::Demo {
            repetitions,
            output,
            json,
        } => demo::run(repetitions, output, json),
        Commands::Summary { output } => summary::show(output),
    }
}
