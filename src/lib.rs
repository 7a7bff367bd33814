//! Gaze ISC
//!
//! Frame-level inter-subject correlation (ISC) of eye-tracking data.
//! For every (movie, frame), each subject's fixations are turned into a
//! normalized Gaussian gaze-density heatmap, and each heatmap is correlated
//! against the mean heatmap of the rest of the cohort.
//!
//! This crate provides the core implementation for the
//! `gaze-isc` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! gaze-isc compute --input ALL_fixations.csv --output frame_level_eye_ISC.csv
//! gaze-isc --help
//! ```
//!
//! Library use:
//!
//! ```ignore
//! use gaze_isc::{compute_frame_isc, FixationRecord, IscConfig};
//!
//! let records = vec![
//!     FixationRecord::at("A", "clip1.mp4", 10, 640.0, 360.0),
//!     FixationRecord::at("B", "clip1.mp4", 10, 650.0, 355.0),
//! ];
//! let rows = compute_frame_isc(&records, &IscConfig::default())?;
//! ```

pub mod aggregator;
pub mod commands;
pub mod heatmap;
pub mod output;
pub mod parser;
pub mod utils;

pub use aggregator::{compute_frame_isc, IscEngine, IscRun};
pub use heatmap::{GazePoint, Heatmap, HeatmapBuilder};
pub use parser::schema::{FixationRecord, FrameIscResult, IscReport, RunSummary};
pub use utils::config::IscConfig;
