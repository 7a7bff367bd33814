//! CSV result table writer.
//!
//! Columns: `movie,frame,n_subjects,isc_mean,isc_sd`, one row per scored
//! frame, in the order given (the engine already sorts by movie, frame).

use super::{ensure_parent_dir, file_size, validate_path};
use crate::parser::schema::FrameIscResult;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// One row of the result table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IscRow {
    pub movie: String,
    pub frame: u32,
    pub n_subjects: usize,
    pub isc_mean: f64,
    pub isc_sd: f64,
}

impl From<&FrameIscResult> for IscRow {
    fn from(result: &FrameIscResult) -> Self {
        Self {
            movie: result.movie.clone(),
            frame: result.frame,
            n_subjects: result.n_subjects,
            isc_mean: result.isc_mean,
            isc_sd: result.isc_sd,
        }
    }
}

/// Write the result table to a CSV file
///
/// **Public** - main entry point for CSV output
///
/// # Errors
/// * `OutputError::InvalidPath` - empty path, directory, or parent cannot be created
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::CsvFailed` - CSV serialization error
pub fn write_results(
    results: &[FrameIscResult],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing {} ISC rows to: {}", results.len(), output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    write_results_to(results, BufWriter::new(file))?;

    info!("Results written successfully ({} bytes)", file_size(output_path));

    Ok(())
}

/// Write the result table to any writer
///
/// The header row is written even when there are no results.
pub fn write_results_to<W: Write>(results: &[FrameIscResult], writer: W) -> Result<(), OutputError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(["movie", "frame", "n_subjects", "isc_mean", "isc_sd"])?;
    for result in results {
        csv_writer.serialize(IscRow::from(result))?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Read a result table back
///
/// **Public** - useful for validation and testing
pub fn read_results<R: Read>(reader: R) -> Result<Vec<IscRow>, OutputError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let rows = csv_reader
        .deserialize::<IscRow>()
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Read {} ISC rows", rows.len());

    Ok(rows)
}
