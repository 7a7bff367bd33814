//! Gaze-density heatmaps.
//!
//! One heatmap per subject per (movie, frame), built from fixation
//! centroids with a Gaussian kernel and normalized to unit mass.

pub mod builder;

// Re-export main types
pub use builder::{GazePoint, Heatmap, HeatmapBuilder};
