//! Compute command implementation.
//!
//! The compute command:
//! 1. Loads the fixation table
//! 2. Groups fixations by (movie, frame, subject)
//! 3. Scores every frame group
//! 4. Writes output files

use super::models::ComputeArgs;
use crate::aggregator::IscEngine;
use crate::output::{build_report, write_report, write_results};
use crate::parser::load_fixations;
use crate::parser::schema::FrameIscResult;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Maximum number of rows printed by `--summary`
const SUMMARY_ROWS: usize = 10;

/// Execute the compute command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable or malformed fixation table
/// * Invalid engine settings
/// * File write errors
pub fn execute_compute(args: ComputeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting ISC computation for: {}", args.input.display());

    // Step 1: Load fixations
    info!("Step 1/4: Loading fixation table...");
    let loaded = load_fixations(&args.input)
        .with_context(|| format!("Failed to load fixations from {}", args.input.display()))?;

    // Step 2: Build engine (grouping happens inside the run)
    info!("Step 2/4: Preparing engine...");
    let engine = IscEngine::new(args.config.clone()).context("Invalid ISC settings")?;
    debug!("Settings: {:?}", engine.config());

    // Step 3: Score frames
    info!("Step 3/4: Scoring frame groups...");
    let run = engine
        .run(&loaded.records)
        .context("Failed to compute frame-level ISC")?;

    // Step 4: Write outputs
    info!("Step 4/4: Writing output files...");
    write_results(&run.frames, &args.output_csv).context("Failed to write ISC table")?;
    info!("✓ ISC table written to: {}", args.output_csv.display());

    if args.print_summary {
        print_summary(&run.frames, &run.summary.summary());
    }

    if let Some(json_path) = &args.output_json {
        let report = build_report(run, engine.config());
        write_report(&report, json_path).context("Failed to write ISC report")?;
        info!("✓ Report written to: {}", json_path.display());
    }

    let elapsed = start_time.elapsed();
    info!("Computation completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate compute arguments
///
/// **Public** - can be called before execute_compute for early validation
pub fn validate_args(args: &ComputeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.output_csv.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.output_json.as_ref() == Some(&args.output_csv) {
        anyhow::bail!("CSV and JSON outputs must be different files");
    }

    args.config.validate()?;

    if args.config.min_subjects < 2 {
        anyhow::bail!("min_subjects must be at least 2");
    }

    Ok(())
}

/// Print a short text table of the first scored frames
fn print_summary(frames: &[FrameIscResult], headline: &str) {
    println!("\n{}", "=".repeat(64));
    println!("FRAME-LEVEL ISC SUMMARY");
    println!("{}", "=".repeat(64));
    println!("{}", headline);
    println!();
    println!("{:<24} {:>7} {:>6} {:>10} {:>10}", "movie", "frame", "n", "isc_mean", "isc_sd");
    for frame in frames.iter().take(SUMMARY_ROWS) {
        println!(
            "{:<24} {:>7} {:>6} {:>10.4} {:>10.4}",
            frame.movie, frame.frame, frame.n_subjects, frame.isc_mean, frame.isc_sd
        );
    }
    if frames.len() > SUMMARY_ROWS {
        println!("... {} more", frames.len() - SUMMARY_ROWS);
    }
    println!("{}", "=".repeat(64));
}
