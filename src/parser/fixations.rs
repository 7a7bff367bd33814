//! Fixation table loader.
//!
//! Reads the upstream `ALL_fixations`-style CSV into `FixationRecord`s.
//! Only the columns the engine needs are read; any others are ignored.
//! Rows that cannot be attributed to a (subject, movie, frame) are skipped,
//! while rows with missing coordinates are kept for the heatmap builder to drop.

use super::schema::FixationRecord;
use crate::utils::error::ParseError;
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Raw CSV row as written by the upstream fixation extractor
///
/// Frame indices arrive as floats when the upstream column held missing
/// values, so they are read as `f64` and converted afterwards.
#[derive(Debug, Clone, Deserialize)]
struct RawFixationRow {
    #[serde(default)]
    subject: Option<String>,

    #[serde(default)]
    movie: Option<String>,

    #[serde(default, alias = "frame")]
    calc_frame: Option<f64>,

    #[serde(default, alias = "x")]
    x_px: Option<f64>,

    #[serde(default, alias = "y")]
    y_px: Option<f64>,
}

/// Why a row was not turned into a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    MissingSubject,
    MissingMovie,
    MissingFrame,
}

/// Result of loading a fixation table
#[derive(Debug, Clone, Default)]
pub struct LoadedFixations {
    pub records: Vec<FixationRecord>,

    /// Rows dropped because subject, movie or frame was unusable
    pub skipped_rows: usize,
}

/// Load fixation records from a CSV file
///
/// **Public** - main entry point for input loading
///
/// # Errors
/// * `ParseError::IoError` - file cannot be opened
/// * `ParseError::CsvError` - malformed CSV or non-numeric cells
pub fn load_fixations(input_path: impl AsRef<Path>) -> Result<LoadedFixations, ParseError> {
    let input_path = input_path.as_ref();

    info!("Loading fixations from: {}", input_path.display());

    let file = File::open(input_path)?;
    let loaded = read_fixations(file)?;

    info!(
        "Loaded {} fixation rows ({} skipped)",
        loaded.records.len(),
        loaded.skipped_rows
    );

    Ok(loaded)
}

/// Read fixation records from any CSV source with a header row
///
/// **Public** - useful for tests and in-memory tables
pub fn read_fixations<R: Read>(reader: R) -> Result<LoadedFixations, ParseError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut loaded = LoadedFixations::default();

    for (idx, row) in csv_reader.deserialize::<RawFixationRow>().enumerate() {
        let row = row?;
        match to_record(row) {
            Ok(record) => loaded.records.push(record),
            Err(reason) => {
                debug!("Skipping row {}: {:?}", idx + 1, reason);
                loaded.skipped_rows += 1;
            }
        }
    }

    if loaded.skipped_rows > 0 {
        warn!(
            "Skipped {} rows without a usable subject, movie or frame",
            loaded.skipped_rows
        );
    }

    Ok(loaded)
}

/// Convert a raw row, keeping missing coordinates as `None`
///
/// **Private** - internal conversion
fn to_record(row: RawFixationRow) -> Result<FixationRecord, SkipReason> {
    let subject = non_empty(row.subject).ok_or(SkipReason::MissingSubject)?;
    let movie = non_empty(row.movie).ok_or(SkipReason::MissingMovie)?;
    let frame = row
        .calc_frame
        .and_then(frame_index)
        .ok_or(SkipReason::MissingFrame)?;

    Ok(FixationRecord {
        subject,
        movie,
        frame,
        x: row.x_px.filter(|v| v.is_finite()),
        y: row.y_px.filter(|v| v.is_finite()),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Frames are 1-based; fractional values truncate toward zero
fn frame_index(value: f64) -> Option<u32> {
    if !value.is_finite() || value < 1.0 || value > u32::MAX as f64 {
        return None;
    }
    Some(value.trunc() as u32)
}
