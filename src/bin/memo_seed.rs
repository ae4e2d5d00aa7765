// ABOUTME: memo-seed - command-line runner for the Memo database seeders
// ABOUTME: Runs the full catalogue or named steps, lists steps and resolves coefficients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Memo database seeder.
//!
//! Usage:
//! ```bash
//! # Reference data only
//! memo-seed all
//!
//! # Reference data followed by every fixture generator
//! memo-seed all --with-fixtures
//!
//! # Named steps, ordered by their table dependencies
//! memo-seed run fake-quizzes academic-structure
//!
//! # Show every step with the tables it needs
//! memo-seed list
//!
//! # Coefficient of a subject within a stream
//! memo-seed resolve --subject mathematics-mathematics --stream mathematics
//!
//! # Reproducible run against a scratch database
//! memo-seed --database-url sqlite:./data/scratch.db --seed 42 all --with-fixtures
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use memo_seeder::{
    config::SeedConfig,
    database::Database,
    errors::AppError,
    logging::LoggingConfig,
    seeding::{
        catalogue, coefficients::CoefficientResolver, RunSummary, SeedOutcome, SeedPlan, SeedStep,
    },
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "memo-seed",
    about = "Memo Database Seeder",
    long_about = "Populate the Memo BAC exam-prep database with reference data and sample fixtures"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Seed for the random source, for reproducible fixtures
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Run the reference data steps
    All {
        /// Also run every fixture generator
        #[arg(long)]
        with_fixtures: bool,
    },

    /// Run the named steps
    Run {
        /// Step names, see `memo-seed list`
        #[arg(required = true)]
        steps: Vec<SeedStep>,
    },

    /// List every step with its requirements
    List,

    /// Print the coefficient of a subject within a stream
    Resolve {
        /// Subject slug
        #[arg(long)]
        subject: String,

        /// Stream slug
        #[arg(long)]
        stream: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    if matches!(cli.command, Command::List) {
        print_catalogue();
        return Ok(());
    }

    let config = SeedConfig::from_env()?
        .with_overrides(cli.database_url.as_deref(), cli.seed)?
        .with_resolved_seed();
    info!(database = %config.database_url, seed = config.effective_seed(), "Seeder configured");
    let database = Database::new(&config.database_url).await?;

    match cli.command {
        Command::All { with_fixtures } => {
            let plan = SeedPlan::new(catalogue::all(with_fixtures || config.with_fixtures))?;
            let summary = plan.run(&database, &config).await?;
            print_summary(&summary);
        }
        Command::Run { steps } => {
            let plan = SeedPlan::new(catalogue::by_steps(&steps))?;
            let summary = plan.run(&database, &config).await?;
            print_summary(&summary);
        }
        Command::Resolve { subject, stream } => {
            resolve(&database, &subject, &stream).await?;
        }
        Command::List => {}
    }

    Ok(())
}

fn print_catalogue() {
    for step in SeedStep::ALL {
        let seeder = catalogue::seeder_for(step);
        let requires = seeder
            .requires()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        let kind = if step.is_fixture() { "fixture" } else { "core" };
        let requires = if requires.is_empty() {
            "-".to_owned()
        } else {
            requires.join(", ")
        };
        println!("{:<22} {kind:<8} requires: {requires}", step.as_str());
    }
}

fn print_summary(summary: &RunSummary) {
    for report in summary.reports() {
        match &report.outcome {
            SeedOutcome::Completed { rows } => println!(
                "{:<22} completed  {rows:>6} rows  {:>6} ms",
                report.step.as_str(),
                report.duration_ms
            ),
            SeedOutcome::Skipped { reason } => {
                println!("{:<22} skipped    {reason}", report.step.as_str());
            }
        }
    }
    println!(
        "{} completed, {} skipped, {} rows",
        summary.completed().count(),
        summary.skipped().count(),
        summary.total_rows()
    );
}

async fn resolve(database: &Database, subject_slug: &str, stream_slug: &str) -> Result<()> {
    let subject = database
        .get_subject_by_slug(subject_slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("subject '{subject_slug}'")))?;
    let stream = database
        .get_stream_by_slug(stream_slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("stream '{stream_slug}'")))?;

    let resolved = CoefficientResolver::new(database)
        .resolve(subject.id, stream.id)
        .await?;
    println!(
        "{subject_slug} in {stream_slug}: coefficient {} ({})",
        resolved.value, resolved.source
    );
    Ok(())
}
