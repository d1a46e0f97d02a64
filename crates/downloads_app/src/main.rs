mod cli;
mod config;

use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use clap::Parser;
use downloads_engine::{load_snapshot, ExtractionEngine, Observation};
use engine_logging::{engine_info, LogDestination};
use log::LevelFilter;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let destination = match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    engine_logging::initialize(destination, level);

    let mut config = config::load_config(cli.config.as_deref())?;
    cli.apply_to(&mut config);

    let mut engine =
        ExtractionEngine::new(config.source.clone()).context("invalid source settings")?;
    let snapshot = load_snapshot(&cli.snapshot)
        .with_context(|| format!("failed to load snapshot {:?}", cli.snapshot))?;
    engine_info!(
        "Loaded snapshot {:?} ({}, {} bytes)",
        cli.snapshot,
        snapshot.encoding,
        snapshot.html.len()
    );

    // A missing slot still exports an empty record set.
    let observation = engine.observe_snapshot(&snapshot);

    let extracted_utc = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let summary = engine
        .export(&config.output_dir, &config.export, &extracted_utc)
        .with_context(|| format!("failed to write export to {:?}", config.output_dir))?;

    let visible = engine.visible_records().len();
    let dropped = engine.assembled_records().len() - visible;
    if observation == Observation::SourceMissing {
        println!(
            "no collection found; empty export written to {}",
            summary.records_path.display()
        );
    } else {
        println!(
            "{} records exported to {} ({} dropped)",
            summary.record_count,
            summary.records_path.display(),
            dropped
        );
    }
    Ok(())
}
