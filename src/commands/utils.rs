use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a JSON report file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    println!("✓ Valid ISC report JSON");
    println!("  Version: {}", report.version);
    println!("  Generated: {}", report.generated_at);
    println!(
        "  Raster: {}x{} (sigma {})",
        report.settings.width, report.settings.height, report.settings.sigma
    );
    println!("  Frames Scored: {}", report.frames.len());
    println!("  {}", report.summary.summary());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Gaze ISC Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  generated_at: string     - RFC 3339 timestamp");
        println!("  settings: object         - Engine settings used");
        println!("    width, height: number  - Raster size in pixels");
        println!("    sigma: number          - Gaussian bandwidth in pixels");
        println!("    min_subjects: number   - Minimum usable subjects per frame");
        println!("    kernel_radius: number? - Kernel window in sigmas (null = full raster)");
        println!("    threads: number        - Worker threads (0 = default)");
        println!("  summary: object          - Run-level counts");
        println!("  frames: array            - One entry per scored frame");
        println!("    movie: string          - Movie identifier");
        println!("    frame: number          - Frame index (1-based)");
        println!("    n_subjects: number     - Subjects with a usable heatmap");
        println!("    n_correlated: number   - Subjects with a defined correlation");
        println!("    isc_mean: number       - Mean leave-one-out correlation");
        println!("    isc_sd: number         - Sample SD of the correlations");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Gaze ISC v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Frame-level inter-subject correlation of eye-tracking gaze heatmaps.");
}
