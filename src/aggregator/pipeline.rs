//! Frame-level ISC engine.
//!
//! Ties grouping, heatmap construction and correlation together:
//! 1. Partition records into (movie, frame) groups
//! 2. Build one heatmap per subject in each group
//! 3. Score each group with leave-one-out correlation
//! 4. Collect the per-group rows and sort them by (movie, frame)
//!
//! Groups share nothing while they are scored, so they run on a rayon pool.
//! Each worker returns its own row; rows are merged once at the end.

use super::correlation::correlate_frame;
use super::grouping::{group_fixations, FrameGroup};
use crate::heatmap::{Heatmap, HeatmapBuilder};
use crate::parser::schema::{FixationRecord, FrameIscResult, RunSummary};
use crate::utils::config::IscConfig;
use crate::utils::error::IscError;
use log::{debug, info};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Output of one engine run
#[derive(Debug, Clone, Default)]
pub struct IscRun {
    /// Rows sorted by movie, then frame
    pub frames: Vec<FrameIscResult>,

    pub summary: RunSummary,
}

/// Scores fixation tables with a fixed configuration
#[derive(Debug, Clone)]
pub struct IscEngine {
    config: IscConfig,
    builder: HeatmapBuilder,
}

impl IscEngine {
    /// Create an engine, rejecting unusable settings
    pub fn new(config: IscConfig) -> Result<Self, IscError> {
        config.validate()?;
        let builder = HeatmapBuilder::new(&config);
        Ok(Self { config, builder })
    }

    pub fn config(&self) -> &IscConfig {
        &self.config
    }

    /// Score every (movie, frame) group in `records`
    ///
    /// **Public** - main entry point for a batch run
    pub fn run(&self, records: &[FixationRecord]) -> Result<IscRun, IscError> {
        let never = AtomicBool::new(false);
        self.run_with_cancel(records, &never)
    }

    /// Like `run`, but stops between groups once `cancel` is set
    ///
    /// # Errors
    /// * `IscError::Cancelled` - `cancel` was raised before every group was scored
    /// * `IscError::ThreadPool` - a dedicated pool could not be created
    pub fn run_with_cancel(
        &self,
        records: &[FixationRecord],
        cancel: &AtomicBool,
    ) -> Result<IscRun, IscError> {
        self.run_reporting(records, cancel, |_| {})
    }

    /// Shared run loop; `on_scored` receives the running count of finished groups
    fn run_reporting<F>(
        &self,
        records: &[FixationRecord],
        cancel: &AtomicBool,
        on_scored: F,
    ) -> Result<IscRun, IscError>
    where
        F: Fn(usize) + Sync,
    {
        let groups = group_fixations(records);
        let total = groups.len();

        info!(
            "Scoring {} frame groups ({}x{} raster, sigma {})",
            total, self.config.width, self.config.height, self.config.sigma
        );

        let completed = AtomicUsize::new(0);
        let score_all = || -> Vec<Option<FrameIscResult>> {
            groups
                .par_iter()
                .map(|group| {
                    if cancel.load(Ordering::Relaxed) {
                        return None;
                    }
                    let row = self.score_group(group);
                    on_scored(completed.fetch_add(1, Ordering::Relaxed) + 1);
                    row
                })
                .collect()
        };

        let scored = if self.config.threads > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.threads)
                .build()?
                .install(score_all)
        } else {
            score_all()
        };

        let completed = completed.into_inner();
        if completed < total {
            return Err(IscError::Cancelled { completed, total });
        }

        let mut frames: Vec<FrameIscResult> = scored.into_iter().flatten().collect();
        frames.sort_by(|a, b| (a.movie.as_str(), a.frame).cmp(&(b.movie.as_str(), b.frame)));

        let movies: BTreeSet<&str> = records.iter().map(|r| r.movie.as_str()).collect();
        let summary = RunSummary {
            fixations: records.len(),
            movies: movies.len(),
            frame_groups: total,
            frames_scored: frames.len(),
            frames_skipped: total - frames.len(),
        };

        info!("{}", summary.summary());

        Ok(IscRun { frames, summary })
    }

    /// Score one group, or `None` if it yields no row
    ///
    /// Subjects without a usable fixation are left out before correlation.
    pub fn score_group(&self, group: &FrameGroup) -> Option<FrameIscResult> {
        let maps: Vec<Heatmap> = group
            .subjects
            .values()
            .filter_map(|points| self.builder.build(points))
            .collect();

        if maps.len() < group.subject_count() {
            debug!(
                "{}: {} of {} subjects without coverage",
                group.key,
                group.subject_count() - maps.len(),
                group.subject_count()
            );
        }

        let Some(stats) = correlate_frame(&maps, self.config.effective_min_subjects()) else {
            debug!("{}: skipped ({} usable subjects)", group.key, maps.len());
            return None;
        };

        debug!(
            "{}: n={} isc={:.4} sd={:.4}",
            group.key, stats.n_subjects, stats.isc_mean, stats.isc_sd
        );

        Some(FrameIscResult {
            movie: group.key.movie.clone(),
            frame: group.key.frame,
            n_subjects: stats.n_subjects,
            n_correlated: stats.n_correlated,
            isc_mean: stats.isc_mean,
            isc_sd: stats.isc_sd,
        })
    }
}

/// Score records with `config` in one call
///
/// **Public** - convenience wrapper around `IscEngine`
pub fn compute_frame_isc(
    records: &[FixationRecord],
    config: &IscConfig,
) -> Result<Vec<FrameIscResult>, IscError> {
    Ok(IscEngine::new(config.clone())?.run(records)?.frames)
}
