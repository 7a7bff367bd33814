//! Gaze ISC CLI
//!
//! Computes frame-level inter-subject correlation of gaze heatmaps
//! from a cleaned fixation table.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use gaze_isc::commands::{
    display_schema, display_version, execute_compute, validate_args, validate_report_file,
    ComputeArgs,
};
use gaze_isc::utils::config::{
    IscConfig, DEFAULT_HEIGHT, DEFAULT_KERNEL_RADIUS, DEFAULT_MIN_SUBJECTS, DEFAULT_SIGMA,
    DEFAULT_WIDTH,
};

/// Gaze ISC - frame-level inter-subject correlation of eye movements
#[derive(Parser, Debug)]
#[command(name = "gaze-isc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute frame-level ISC from a fixation table
    Compute {
        /// Fixation CSV (subject, movie, calc_frame, x_px, y_px)
        #[arg(short, long, env = "GAZE_ISC_INPUT")]
        input: PathBuf,

        /// Output path for the ISC table
        #[arg(short, long, default_value = "frame_level_eye_ISC.csv")]
        output: PathBuf,

        /// Output path for a JSON report (optional)
        #[arg(long)]
        json: Option<PathBuf>,

        /// Raster width in pixels
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: usize,

        /// Raster height in pixels
        #[arg(long, default_value_t = DEFAULT_HEIGHT)]
        height: usize,

        /// Gaussian bandwidth in pixels
        #[arg(long, default_value_t = DEFAULT_SIGMA)]
        sigma: f64,

        /// Minimum subjects with a usable heatmap per frame
        #[arg(long, default_value_t = DEFAULT_MIN_SUBJECTS)]
        min_subjects: usize,

        /// Kernel window radius, in sigmas
        #[arg(long, default_value_t = DEFAULT_KERNEL_RADIUS, conflicts_with = "full_kernel")]
        kernel_radius: f64,

        /// Evaluate every Gaussian over the whole raster
        #[arg(long)]
        full_kernel: bool,

        /// Worker threads (0 = one per core)
        #[arg(long, default_value_t = 0)]
        threads: usize,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate an ISC report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Compute {
            input,
            output,
            json,
            width,
            height,
            sigma,
            min_subjects,
            kernel_radius,
            full_kernel,
            threads,
            summary,
        } => {
            let config = IscConfig::new()
                .with_raster(width, height)
                .with_sigma(sigma)
                .with_min_subjects(min_subjects)
                .with_kernel_radius(if full_kernel { None } else { Some(kernel_radius) })
                .with_threads(threads);

            let args = ComputeArgs {
                input,
                output_csv: output,
                output_json: json,
                config,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_compute(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
