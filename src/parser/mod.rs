//! Input loading and schema definitions.
//!
//! This module handles:
//! - Loading the cleaned fixation table
//! - Defining the record and report schema

pub mod fixations;
pub mod schema;

// Re-export main types
pub use fixations::{load_fixations, read_fixations, LoadedFixations};
pub use schema::{FixationRecord, FrameIscResult, IscReport, RunSummary};
