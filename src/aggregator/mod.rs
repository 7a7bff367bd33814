//! Aggregation of fixation records into frame-level ISC rows.
//!
//! This module transforms the cleaned fixation table into:
//! - (movie, frame) groups of per-subject gaze points
//! - Leave-one-out correlation statistics per group
//! - The sorted result table

pub mod correlation;
pub mod grouping;
pub mod pipeline;

// Re-export main types and functions
pub use correlation::{correlate_frame, leave_one_out_correlations, pearson, FrameStats};
pub use grouping::{group_fixations, FrameGroup, FrameKey};
pub use pipeline::{compute_frame_isc, IscEngine, IscRun};
