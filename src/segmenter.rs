//! Dive segmentation
//!
//! Scans the depth channel for threshold-crossing intervals and filters them
//! by minimum duration. Output windows are ordered by start index and
//! non-overlapping because submersion edges are monotonic in index.

use crate::config::AnalysisConfig;
use crate::types::{DiveWindow, SensorFrame};

/// Segmenter for extracting dive windows from a sensor frame
pub struct DiveSegmenter {
    depth_threshold_m: f64,
    min_dive_duration_s: f64,
}

impl DiveSegmenter {
    /// Create a segmenter from a validated configuration
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            depth_threshold_m: config.depth_threshold_m,
            min_dive_duration_s: config.min_dive_duration_s,
        }
    }

    /// Extract ordered, non-overlapping dive windows.
    ///
    /// A dive that is already in progress when the recording starts, or still
    /// in progress when it ends, is excluded: partial dives carry truncated
    /// kinematics and would bias every downstream metric.
    pub fn segment(&self, frame: &SensorFrame) -> Vec<DiveWindow> {
        let submerged: Vec<bool> = frame
            .depth
            .iter()
            .map(|&d| d > self.depth_threshold_m)
            .collect();

        let mut starts = Vec::new();
        let mut ends = Vec::new();
        for i in 1..submerged.len() {
            match (submerged[i - 1], submerged[i]) {
                (false, true) => starts.push(i),
                (true, false) => ends.push(i),
                _ => {}
            }
        }

        // Recording began mid-dive: the first falling edge has no matching
        // rising edge, so that partial dive is dropped.
        if !ends.is_empty() && (starts.is_empty() || ends[0] < starts[0]) {
            ends.remove(0);
        }

        // Recording ended mid-dive: drop the trailing unmatched start.
        starts.truncate(ends.len());

        starts
            .into_iter()
            .zip(ends)
            .map(|(start, end)| DiveWindow { start, end })
            .filter(|w| w.duration_s(frame.sampling_rate_hz) >= self.min_dive_duration_s)
            .collect()
    }
}
