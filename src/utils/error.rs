//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading a fixation table
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read fixation table: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed fixation table: {0}")]
    CsvError(#[from] csv::Error),
}

/// Invalid engine settings
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Raster must be non-empty (got {width}x{height})")]
    EmptyRaster { width: usize, height: usize },

    #[error("Gaussian sigma must be a positive finite number (got {0})")]
    InvalidSigma(f64),

    #[error("Kernel radius must be a positive finite number (got {0})")]
    InvalidKernelRadius(f64),
}

/// Errors that can occur while scoring frames
#[derive(Error, Debug)]
pub enum IscError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Run cancelled after {completed} of {total} frame groups")]
    Cancelled { completed: usize, total: usize },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
