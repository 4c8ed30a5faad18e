mod cli;
mod commands;
mod comparison;
mod config;
mod judgments;
mod model;
mod numeric;
mod preview;
mod query_set;
mod util;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ParseJudgments(args) => commands::parse_judgments::run(args),
        Commands::ExportJudgments(args) => commands::export_judgments::run(args),
        Commands::ParseQuerySet(args) => commands::parse_query_set::run(args),
        Commands::Preview(args) => commands::preview::run(args),
        Commands::Compare(args) => commands::compare::run(args),
        Commands::Highlight(args) => commands::highlight::run(args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
