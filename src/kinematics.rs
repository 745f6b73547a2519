//! Per-dive kinematic analysis
//!
//! Computes the kinematic metrics of one dive window: maximum depth, descent
//! and ascent rates, bottom time, mean dynamic body acceleration, and the
//! acoustic-activity proportion.

use crate::types::{DiveWindow, SensorFrame};

/// Guard against division by zero when the depth peak sits on the first or
/// last sample of a window (seconds)
pub const RATE_EPSILON_S: f64 = 1e-6;

/// Fraction of maximum depth above which a sample counts as bottom time
pub const BOTTOM_DEPTH_FRACTION: f64 = 0.8;

/// Kinematic metrics of one dive window
#[derive(Debug, Clone, PartialEq)]
pub struct DiveKinematics {
    /// Maximum depth reached (meters)
    pub max_depth_m: f64,
    /// Mean descent rate to the depth peak (m/s)
    pub descent_rate_m_per_s: f64,
    /// Mean ascent rate from the depth peak (m/s)
    pub ascent_rate_m_per_s: f64,
    /// Time spent below 80% of maximum depth (seconds)
    pub bottom_time_s: f64,
    /// Mean dynamic body acceleration (g)
    pub mean_dba_g: f64,
    /// Fraction of samples with acoustic activity (0-1)
    pub acoustic_proportion: f64,
}

/// Analyzer for per-dive kinematics
pub struct DiveAnalyzer;

impl DiveAnalyzer {
    /// Compute kinematic metrics for one window of a frame
    pub fn analyze(frame: &SensorFrame, window: &DiveWindow) -> DiveKinematics {
        let rate = frame.sampling_rate_hz;
        let (peak_index, max_depth_m) = find_depth_peak(frame, window);

        // Descent ends at the first occurrence of the maximum-depth sample;
        // a peak on the window edge leaves zero travel time, hence the guard.
        let descent_time_s = (peak_index - window.start) as f64 / rate;
        let ascent_time_s = (window.end - 1 - peak_index) as f64 / rate;
        let descent_rate_m_per_s = max_depth_m / descent_time_s.max(RATE_EPSILON_S);
        let ascent_rate_m_per_s = max_depth_m / ascent_time_s.max(RATE_EPSILON_S);

        let bottom_time_s = compute_bottom_time(frame, window, max_depth_m);
        let mean_dba_g = compute_mean_dba(frame, window);
        let acoustic_proportion = compute_acoustic_proportion(frame, window);

        DiveKinematics {
            max_depth_m,
            descent_rate_m_per_s,
            ascent_rate_m_per_s,
            bottom_time_s,
            mean_dba_g,
            acoustic_proportion,
        }
    }
}

/// Index and value of the window's maximum depth (first occurrence on ties)
fn find_depth_peak(frame: &SensorFrame, window: &DiveWindow) -> (usize, f64) {
    let mut peak_index = window.start;
    let mut max_depth = frame.depth[window.start];
    for i in window.start + 1..window.end {
        if frame.depth[i] > max_depth {
            max_depth = frame.depth[i];
            peak_index = i;
        }
    }
    (peak_index, max_depth)
}

/// Time spent deeper than 80% of the maximum depth
fn compute_bottom_time(frame: &SensorFrame, window: &DiveWindow, max_depth_m: f64) -> f64 {
    let threshold = BOTTOM_DEPTH_FRACTION * max_depth_m;
    let samples = frame.depth[window.start..window.end]
        .iter()
        .filter(|&&d| d > threshold)
        .count();
    samples as f64 / frame.sampling_rate_hz
}

/// Mean Euclidean norm of the tri-axial acceleration over the window
fn compute_mean_dba(frame: &SensorFrame, window: &DiveWindow) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let sum: f64 = (window.start..window.end)
        .map(|i| frame.acc_magnitude(i))
        .sum();
    sum / window.len() as f64
}

/// Fraction of window samples with the acoustic flag set
fn compute_acoustic_proportion(frame: &SensorFrame, window: &DiveWindow) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let active = frame.acoustic[window.start..window.end]
        .iter()
        .filter(|&&a| a)
        .count();
    active as f64 / window.len() as f64
}
