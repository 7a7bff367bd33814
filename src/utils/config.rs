//! Configuration and constants for the ISC engine and CLI.

use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Stimulus raster (EyeLink DISPLAY_COORDS 0 0 1279 719)
pub const DEFAULT_WIDTH: usize = 1280;
pub const DEFAULT_HEIGHT: usize = 720;

/// Gaussian bandwidth in pixels
pub const DEFAULT_SIGMA: f64 = 50.0;

/// Leave-one-out needs at least two maps
pub const DEFAULT_MIN_SUBJECTS: usize = 2;

/// Kernel window half-width, in units of sigma
pub const DEFAULT_KERNEL_RADIUS: f64 = 4.0;

/// Settings for one ISC run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IscConfig {
    /// Raster width in pixels
    pub width: usize,

    /// Raster height in pixels
    pub height: usize,

    /// Isotropic Gaussian bandwidth in pixels
    pub sigma: f64,

    /// Minimum subjects with a usable heatmap per frame
    pub min_subjects: usize,

    /// Kernel window radius in sigmas; `None` evaluates the full raster
    pub kernel_radius: Option<f64>,

    /// Worker threads (0 = rayon default)
    pub threads: usize,
}

impl Default for IscConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            sigma: DEFAULT_SIGMA,
            min_subjects: DEFAULT_MIN_SUBJECTS,
            kernel_radius: Some(DEFAULT_KERNEL_RADIUS),
            threads: 0,
        }
    }
}

impl IscConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raster(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    pub fn with_min_subjects(mut self, min_subjects: usize) -> Self {
        self.min_subjects = min_subjects;
        self
    }

    pub fn with_kernel_radius(mut self, kernel_radius: Option<f64>) -> Self {
        self.kernel_radius = kernel_radius;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Check that the settings describe a usable raster and kernel
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyRaster {
                width: self.width,
                height: self.height,
            });
        }

        // sigma^2 must stay a normal float or the kernel degenerates to NaN
        if !self.sigma.is_finite()
            || self.sigma <= 0.0
            || !(self.sigma * self.sigma).is_normal()
        {
            return Err(ConfigError::InvalidSigma(self.sigma));
        }

        if let Some(radius) = self.kernel_radius {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(ConfigError::InvalidKernelRadius(radius));
            }
        }

        Ok(())
    }

    /// Minimum subject count actually applied (never below two)
    pub fn effective_min_subjects(&self) -> usize {
        self.min_subjects.max(DEFAULT_MIN_SUBJECTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_setup() {
        let config = IscConfig::default();
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 720);
        assert_eq!(config.sigma, 50.0);
        assert_eq!(config.min_subjects, 2);
        assert_eq!(config.kernel_radius, Some(4.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        assert!(IscConfig::new().with_raster(0, 720).validate().is_err());
        assert!(IscConfig::new().with_sigma(0.0).validate().is_err());
        assert!(IscConfig::new().with_sigma(f64::NAN).validate().is_err());
        assert_eq!(
            IscConfig::new().with_sigma(1e-170).validate(),
            Err(ConfigError::InvalidSigma(1e-170))
        );
        assert_eq!(
            IscConfig::new().with_sigma(1e200).validate(),
            Err(ConfigError::InvalidSigma(1e200))
        );
        assert!(IscConfig::new()
            .with_kernel_radius(Some(-1.0))
            .validate()
            .is_err());
        assert!(IscConfig::new().with_kernel_radius(None).validate().is_ok());
    }

    #[test]
    fn test_min_subjects_clamped() {
        let config = IscConfig::new().with_min_subjects(1);
        assert_eq!(config.effective_min_subjects(), 2);
        let config = IscConfig::new().with_min_subjects(5);
        assert_eq!(config.effective_min_subjects(), 5);
    }
}
