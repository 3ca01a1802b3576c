//! regrade CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "regrade",
    version,
    about = "Quiz answer evaluation and score reconciliation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile an attempt's score against its amendment log
    Reconcile {
        /// Attempt document JSON
        #[arg(long)]
        attempt: PathBuf,

        /// Question bank JSON file or directory; replaces any question
        /// set embedded in the attempt
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the full reconciliation report JSON to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show every modification's heuristic score and the authoritative pick
    Resolve {
        /// Attempt document JSON
        #[arg(long)]
        attempt: PathBuf,
    },

    /// Validate question bank files
    Validate {
        /// Question bank JSON file or directory
        #[arg(long)]
        questions: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("regrade=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Reconcile {
            attempt,
            questions,
            format,
            output,
        } => commands::reconcile::execute(attempt, questions, format, output),
        Commands::Resolve { attempt } => commands::resolve::execute(attempt),
        Commands::Validate { questions } => commands::validate::execute(questions),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
