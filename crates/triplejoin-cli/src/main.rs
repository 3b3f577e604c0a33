//! triplejoin command-line runner
//!
//! Loads a triple file and times the friendOf/follows/likes/hasReview
//! pipeline with hash join, sort-merge join, or both.

mod config;
mod executor;
mod formatter;

use std::time::Instant;

use clap::Parser;
use config::Args;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "triplejoin_cli=info,triplejoin_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.into_config()?;
    let formatter = formatter::create_formatter(config.format);

    tracing::info!(
        dataset = %config.dataset.display(),
        predicates = ?config.predicates,
        "loading dataset"
    );

    let start = Instant::now();
    let dataset = triplejoin_core::load_path(&config.dataset)?;
    let load_secs = start.elapsed().as_secs_f64();
    println!("{}", formatter.format_dataset(&dataset, load_secs));

    let reports = executor::run_pipeline(&dataset, &config)?;
    println!("{}", formatter.format_reports(&reports));

    Ok(())
}
