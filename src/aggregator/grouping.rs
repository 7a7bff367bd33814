//! Partition fixation records into (movie, frame) groups.
//!
//! Every record lands in exactly one group and, within it, in exactly one
//! subject's point list. Groups come out ordered by movie (byte-wise) and
//! then by frame number, so downstream output is reproducible.

use crate::heatmap::GazePoint;
use crate::parser::schema::FixationRecord;
use log::debug;
use std::collections::BTreeMap;
use std::fmt;

/// Composite key of one stimulus frame
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameKey {
    pub movie: String,
    pub frame: u32,
}

impl FrameKey {
    pub fn new(movie: impl Into<String>, frame: u32) -> Self {
        Self {
            movie: movie.into(),
            frame,
        }
    }
}

impl fmt::Display for FrameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.movie, self.frame)
    }
}

/// All subjects' gaze points for one (movie, frame)
#[derive(Debug, Clone)]
pub struct FrameGroup {
    pub key: FrameKey,

    /// Subject id -> that subject's points, in input order
    pub subjects: BTreeMap<String, Vec<GazePoint>>,
}

impl FrameGroup {
    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    pub fn fixation_count(&self) -> usize {
        self.subjects.values().map(Vec::len).sum()
    }
}

/// Group records by (movie, frame), then by subject
///
/// **Public** - main entry point for grouping
///
/// # Returns
/// Groups sorted by movie ascending, then frame ascending
pub fn group_fixations(records: &[FixationRecord]) -> Vec<FrameGroup> {
    let mut groups: BTreeMap<FrameKey, BTreeMap<String, Vec<GazePoint>>> = BTreeMap::new();

    for record in records {
        groups
            .entry(FrameKey::new(record.movie.as_str(), record.frame))
            .or_default()
            .entry(record.subject.clone())
            .or_default()
            .push(GazePoint::new(record.x, record.y));
    }

    debug!("Grouped {} fixations into {} frame groups", records.len(), groups.len());

    groups
        .into_iter()
        .map(|(key, subjects)| FrameGroup { key, subjects })
        .collect()
}
