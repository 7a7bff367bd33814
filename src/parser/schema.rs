//! Record and report schema definitions.
//!
//! `FixationRecord` is the cleaned input row the engine consumes.
//! `FrameIscResult` and `IscReport` define what we write to disk.
//! The report schema is versioned to allow future evolution.

use crate::utils::config::IscConfig;
use serde::{Deserialize, Serialize};

/// One fixation centroid attributed to a subject, movie and frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixationRecord {
    pub subject: String,
    pub movie: String,

    /// 1-based frame index into the movie
    pub frame: u32,

    /// Pixel x, absent when the tracker lost the eye
    pub x: Option<f64>,

    /// Pixel y, absent when the tracker lost the eye
    pub y: Option<f64>,
}

impl FixationRecord {
    pub fn new(
        subject: impl Into<String>,
        movie: impl Into<String>,
        frame: u32,
        x: Option<f64>,
        y: Option<f64>,
    ) -> Self {
        Self {
            subject: subject.into(),
            movie: movie.into(),
            frame,
            x,
            y,
        }
    }

    /// Convenience constructor for a fixation with both coordinates present
    pub fn at(subject: impl Into<String>, movie: impl Into<String>, frame: u32, x: f64, y: f64) -> Self {
        Self::new(subject, movie, frame, Some(x), Some(y))
    }
}

/// ISC statistics for one (movie, frame) group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameIscResult {
    pub movie: String,
    pub frame: u32,

    /// Subjects with a usable heatmap in this frame
    pub n_subjects: usize,

    /// Subjects whose leave-one-out correlation was defined
    pub n_correlated: usize,

    /// Mean of the defined per-subject correlations
    pub isc_mean: f64,

    /// Sample standard deviation of the defined correlations (0.0 if only one)
    pub isc_sd: f64,
}

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IscReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Settings used for the run
    pub settings: IscConfig,

    /// Run-level counts
    pub summary: RunSummary,

    /// Per-frame results, sorted by movie then frame
    pub frames: Vec<FrameIscResult>,
}

/// Counts describing one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Fixation rows fed to the engine
    pub fixations: usize,

    /// Distinct movies seen
    pub movies: usize,

    /// (movie, frame) groups seen
    pub frame_groups: usize,

    /// Groups that produced a result row
    pub frames_scored: usize,

    /// Groups omitted (too few subjects or no defined correlation)
    pub frames_skipped: usize,
}

impl RunSummary {
    /// Get human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Fixations: {} | Movies: {} | Frames: {} | Scored: {} | Skipped: {}",
            self.fixations, self.movies, self.frame_groups, self.frames_scored, self.frames_skipped
        )
    }
}
