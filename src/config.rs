//! Analysis configuration
//!
//! An immutable configuration value is passed into each pipeline invocation.
//! Threshold relationships are validated at construction and never at
//! analysis time.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Default dive-detection depth threshold (meters)
pub const DEFAULT_DEPTH_THRESHOLD_M: f64 = 5.0;

/// Default surface-detection depth threshold (meters)
pub const DEFAULT_SURFACE_THRESHOLD_M: f64 = 2.0;

/// Default minimum dive duration (seconds)
pub const DEFAULT_MIN_DIVE_DURATION_S: f64 = 30.0;

/// Configuration for one deployment analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Depth above which a sample counts as submerged (meters, > 0)
    pub depth_threshold_m: f64,
    /// Depth below which a sample counts as surfaced (meters, < depth threshold)
    pub surface_threshold_m: f64,
    /// Minimum duration for a candidate dive to be kept (seconds, > 0)
    pub min_dive_duration_s: f64,
    /// When set, recordings with a different sampling rate are rejected
    pub expected_sampling_rate_hz: Option<f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            depth_threshold_m: DEFAULT_DEPTH_THRESHOLD_M,
            surface_threshold_m: DEFAULT_SURFACE_THRESHOLD_M,
            min_dive_duration_s: DEFAULT_MIN_DIVE_DURATION_S,
            expected_sampling_rate_hz: None,
        }
    }
}

impl AnalysisConfig {
    /// Build a validated configuration
    pub fn new(
        depth_threshold_m: f64,
        surface_threshold_m: f64,
        min_dive_duration_s: f64,
    ) -> Result<Self, AnalysisError> {
        let config = Self {
            depth_threshold_m,
            surface_threshold_m,
            min_dive_duration_s,
            expected_sampling_rate_hz: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Require recordings to carry this sampling rate
    pub fn with_expected_sampling_rate(mut self, rate_hz: f64) -> Result<Self, AnalysisError> {
        self.expected_sampling_rate_hz = Some(rate_hz);
        self.validate()?;
        Ok(self)
    }

    /// Check threshold relationships; called at construction
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.depth_threshold_m <= 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "Depth threshold must be positive, got {} m",
                self.depth_threshold_m
            )));
        }
        if self.surface_threshold_m <= 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "Surface threshold must be positive, got {} m",
                self.surface_threshold_m
            )));
        }
        if self.surface_threshold_m >= self.depth_threshold_m {
            return Err(AnalysisError::InvalidConfig(format!(
                "Surface threshold ({} m) must be below the depth threshold ({} m)",
                self.surface_threshold_m, self.depth_threshold_m
            )));
        }
        if self.min_dive_duration_s <= 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "Minimum dive duration must be positive, got {} s",
                self.min_dive_duration_s
            )));
        }
        if let Some(rate) = self.expected_sampling_rate_hz {
            if rate <= 0.0 {
                return Err(AnalysisError::InvalidConfig(format!(
                    "Expected sampling rate must be positive, got {} Hz",
                    rate
                )));
            }
        }
        Ok(())
    }
}
