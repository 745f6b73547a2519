//! Surface behavior analysis
//!
//! Detects continuous shallow-depth intervals (surfacings) on the full
//! recording and derives breathing-rate and surface-activity metrics. Runs
//! that touch the start or end of the recording count as surface periods.

use crate::config::AnalysisConfig;
use crate::types::{SensorFrame, SurfaceSummary};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Analyzer for surface intervals
pub struct SurfaceAnalyzer {
    surface_threshold_m: f64,
}

impl SurfaceAnalyzer {
    /// Create an analyzer from a validated configuration
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            surface_threshold_m: config.surface_threshold_m,
        }
    }

    /// Summarize the surface intervals of one recording
    pub fn analyze(&self, frame: &SensorFrame) -> SurfaceSummary {
        let rate = frame.sampling_rate_hz;

        let mut surface_samples = 0usize;
        let mut periods = 0u32;
        let mut activity_sum = 0.0;
        let mut in_period = false;

        for i in 0..frame.len() {
            if frame.depth[i] < self.surface_threshold_m {
                surface_samples += 1;
                activity_sum += frame.acc_x[i].powi(2)
                    + frame.acc_y[i].powi(2)
                    + frame.acc_z[i].powi(2);
                if !in_period {
                    periods += 1;
                    in_period = true;
                }
            } else {
                in_period = false;
            }
        }

        let total_surface_time_s = surface_samples as f64 / rate;
        let mean_surface_duration_s = if periods > 0 {
            total_surface_time_s / periods as f64
        } else {
            0.0
        };

        let recording_duration_s = frame.duration_s();
        let breathing_rate_per_hour = if recording_duration_s > 0.0 {
            periods as f64 / (recording_duration_s / SECONDS_PER_HOUR)
        } else {
            0.0
        };

        let surface_activity_level = if surface_samples > 0 {
            activity_sum / surface_samples as f64
        } else {
            0.0
        };

        SurfaceSummary {
            total_surface_time_s,
            surface_periods: periods,
            mean_surface_duration_s,
            breathing_rate_per_hour,
            surface_activity_level,
        }
    }
}
