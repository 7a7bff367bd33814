//! Build normalized gaze-density heatmaps from fixation centroids.
//!
//! Each valid fixation adds an isotropic Gaussian bump
//! `exp(-((col - cx)^2 + (row - cy)^2) / sigma^2)` to the raster.
//! The accumulated map is L1-normalized so subjects with many fixations
//! weigh the same as subjects with one.
//!
//! Example: two fixations at the same pixel produce the same map as one.

use crate::utils::config::IscConfig;
use log::debug;
use ndarray::{s, Array2};
use std::ops::Range;

/// A single gaze centroid, possibly missing an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazePoint {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl GazePoint {
    pub fn new(x: Option<f64>, y: Option<f64>) -> Self {
        Self { x, y }
    }

    pub fn at(x: f64, y: f64) -> Self {
        Self::new(Some(x), Some(y))
    }
}

/// Normalized density over a `height x width` raster
///
/// Cells are non-negative and sum to 1.0. An all-zero map is never
/// constructed; see `Heatmap::from_density`.
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    cells: Array2<f64>,
}

impl Heatmap {
    /// Normalize raw non-negative density into a heatmap
    ///
    /// Returns `None` when the density has no positive mass, or when it
    /// holds negative or non-finite cells.
    pub fn from_density(mut cells: Array2<f64>) -> Option<Self> {
        if cells.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return None;
        }

        let total = cells.sum();
        if total <= 0.0 || !total.is_finite() {
            return None;
        }

        cells /= total;
        Some(Self { cells })
    }

    pub fn cells(&self) -> &Array2<f64> {
        &self.cells
    }

    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Sum of all cells (1.0 up to rounding)
    pub fn total(&self) -> f64 {
        self.cells.sum()
    }

    pub fn into_inner(self) -> Array2<f64> {
        self.cells
    }
}

/// Turns one subject's fixations for one frame into a `Heatmap`
#[derive(Debug, Clone)]
pub struct HeatmapBuilder {
    width: usize,
    height: usize,
    sigma: f64,

    /// Window half-width in pixels, `None` for the full raster
    reach: Option<f64>,
}

impl HeatmapBuilder {
    /// Create a builder for the raster and kernel described by `config`
    ///
    /// `config` is expected to have passed `IscConfig::validate`.
    pub fn new(config: &IscConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            sigma: config.sigma,
            reach: config.kernel_radius.map(|r| r * config.sigma),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Build a normalized heatmap from gaze points
    ///
    /// **Public** - main entry point for heatmap construction
    ///
    /// Points with a missing axis or lying outside `[0, width) x [0, height)`
    /// are dropped. Returns `None` ("no coverage") when nothing was
    /// accumulated, so the subject is left out of the frame's comparison.
    pub fn build<'a, I>(&self, points: I) -> Option<Heatmap>
    where
        I: IntoIterator<Item = &'a GazePoint>,
    {
        let mut density = Array2::<f64>::zeros((self.height, self.width));
        let mut used = 0usize;
        let mut dropped = 0usize;

        for point in points {
            match self.locate(point) {
                Some((cx, cy)) => {
                    self.accumulate(&mut density, cx, cy);
                    used += 1;
                }
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!("Dropped {} fixations with missing or out-of-raster coordinates", dropped);
        }

        if used == 0 {
            return None;
        }

        Heatmap::from_density(density)
    }

    /// Centroid in raster coordinates, if the point is usable
    ///
    /// **Private** - exclusion rule applied before accumulation
    fn locate(&self, point: &GazePoint) -> Option<(f64, f64)> {
        let (cx, cy) = (point.x?, point.y?);

        if !cx.is_finite() || !cy.is_finite() {
            return None;
        }
        if cx < 0.0 || cx >= self.width as f64 || cy < 0.0 || cy >= self.height as f64 {
            return None;
        }

        Some((cx, cy))
    }

    /// Add one Gaussian bump centred on (cx, cy)
    fn accumulate(&self, density: &mut Array2<f64>, cx: f64, cy: f64) {
        let inv_var = 1.0 / (self.sigma * self.sigma);
        let rows = self.window(cy, self.height);
        let cols = self.window(cx, self.width);

        let mut patch = density.slice_mut(s![rows.clone(), cols.clone()]);
        for ((r, c), cell) in patch.indexed_iter_mut() {
            let dy = (rows.start + r) as f64 - cy;
            let dx = (cols.start + c) as f64 - cx;
            *cell += (-(dx * dx + dy * dy) * inv_var).exp();
        }
    }

    /// Index range covered by the kernel along one axis
    fn window(&self, centre: f64, len: usize) -> Range<usize> {
        match self.reach {
            None => 0..len,
            Some(reach) => {
                let lo = (centre - reach).floor().max(0.0) as usize;
                let hi = ((centre + reach).ceil() as usize).saturating_add(1).min(len);
                lo..hi
            }
        }
    }
}
