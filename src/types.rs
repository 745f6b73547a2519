//! Core types for the tagdive pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: the validated sensor frame, dive windows, per-dive records, the
//! surface summary, and the deployment-level energetic model.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Behavior-type label assigned to a single dive (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorType {
    ShallowTravel,
    DeepTravel,
    ShallowForaging,
    DeepForaging,
    ShallowExploration,
    DeepExploration,
    SocialSurface,
    Resting,
}

impl BehaviorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorType::ShallowTravel => "shallow_travel",
            BehaviorType::DeepTravel => "deep_travel",
            BehaviorType::ShallowForaging => "shallow_foraging",
            BehaviorType::DeepForaging => "deep_foraging",
            BehaviorType::ShallowExploration => "shallow_exploration",
            BehaviorType::DeepExploration => "deep_exploration",
            BehaviorType::SocialSurface => "social_surface",
            BehaviorType::Resting => "resting",
        }
    }

    /// Whether this label counts toward the foraging dive totals
    pub fn is_foraging(&self) -> bool {
        matches!(
            self,
            BehaviorType::ShallowForaging | BehaviorType::DeepForaging
        )
    }
}

/// Behavioral-context label derived from a dive's behavior type and
/// foraging indicators (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehavioralContext {
    SuccessfulForaging,
    ActiveForaging,
    ForagingSearch,
    CoordinatedTravel,
    IndividualTravel,
    SocialInteraction,
    RestingBehavior,
    ExploratoryBehavior,
}

/// Quality flag recorded alongside an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityFlag {
    /// The acoustic channel was absent and substituted with all-false
    AcousticAssumedSilent,
    /// Recording shorter than the minimum dive duration
    ShortRecording,
}

/// A validated, channel-aligned sensor recording from one tag deployment.
///
/// All channels have identical length and the sampling rate is positive.
/// Constructed once per deployment and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorFrame {
    /// Sample timestamps (seconds since deployment start)
    pub timestamps: Vec<f64>,
    /// Depth channel (meters, positive down)
    pub depth: Vec<f64>,
    /// Acceleration X axis (g)
    pub acc_x: Vec<f64>,
    /// Acceleration Y axis (g)
    pub acc_y: Vec<f64>,
    /// Acceleration Z axis (g)
    pub acc_z: Vec<f64>,
    /// Acoustic-activity flag per sample
    pub acoustic: Vec<bool>,
    /// Sampling rate (Hz)
    pub sampling_rate_hz: f64,
}

impl SensorFrame {
    /// Build a frame, rejecting mismatched channel lengths and
    /// non-positive sampling rates before any analysis runs.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        timestamps: Vec<f64>,
        depth: Vec<f64>,
        acc_x: Vec<f64>,
        acc_y: Vec<f64>,
        acc_z: Vec<f64>,
        acoustic: Vec<bool>,
        sampling_rate_hz: f64,
    ) -> Result<Self, AnalysisError> {
        if sampling_rate_hz <= 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "Sampling rate must be positive, got {} Hz",
                sampling_rate_hz
            )));
        }

        let n = depth.len();
        let lengths = [
            ("timestamps", timestamps.len()),
            ("acceleration_x", acc_x.len()),
            ("acceleration_y", acc_y.len()),
            ("acceleration_z", acc_z.len()),
            ("acoustic_activity", acoustic.len()),
        ];
        for (name, len) in lengths {
            if len != n {
                return Err(AnalysisError::ShapeMismatch(format!(
                    "Channel {} has {} samples, depth has {}",
                    name, len, n
                )));
            }
        }

        Ok(Self {
            timestamps,
            depth,
            acc_x,
            acc_y,
            acc_z,
            acoustic,
            sampling_rate_hz,
        })
    }

    /// Number of samples per channel
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// Total recording duration in seconds
    pub fn duration_s(&self) -> f64 {
        self.len() as f64 / self.sampling_rate_hz
    }

    /// Acceleration vector magnitude at one sample (g)
    pub fn acc_magnitude(&self, i: usize) -> f64 {
        (self.acc_x[i].powi(2) + self.acc_y[i].powi(2) + self.acc_z[i].powi(2)).sqrt()
    }
}

/// A half-open sample index range `[start, end)` covering one dive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiveWindow {
    /// First submerged sample index
    pub start: usize,
    /// First surfaced sample index after the dive (exclusive)
    pub end: usize,
}

impl DiveWindow {
    /// Dive duration in seconds at the given sampling rate
    pub fn duration_s(&self, sampling_rate_hz: f64) -> f64 {
        (self.end - self.start) as f64 / sampling_rate_hz
    }

    /// Number of samples in the window
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Foraging-success indicators derived from one dive window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForagingIndicators {
    /// Echolocation click-rate proxy (clicks/second)
    pub click_rate: f64,
    /// Count of feeding-buzz events (contiguous high-intensity acoustic runs)
    pub buzz_events: u32,
    /// Count of rapid maneuvers (large jerk in acceleration magnitude)
    pub rapid_maneuvers: u32,
    /// Standard deviation of per-sample depth change (meters)
    pub depth_variation_m: f64,
    /// Combined success-probability estimate (0-1)
    pub success_probability: f64,
    /// Mean of the acoustic/maneuver indicators (0-1)
    pub foraging_intensity: f64,
}

/// One segmented, analyzed, and classified dive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiveRecord {
    /// Dive sequence number within the deployment (1-based)
    pub dive_id: u32,
    /// Start time (seconds, from the timestamp channel)
    pub start_time_s: f64,
    /// End time (seconds, from the timestamp channel)
    pub end_time_s: f64,
    /// Dive duration (seconds)
    pub duration_s: f64,
    /// Maximum depth reached (meters)
    pub max_depth_m: f64,
    /// Mean descent rate to maximum depth (m/s)
    pub descent_rate_m_per_s: f64,
    /// Mean ascent rate from maximum depth (m/s)
    pub ascent_rate_m_per_s: f64,
    /// Time spent below 80% of maximum depth (seconds)
    pub bottom_time_s: f64,
    /// Behavior-type label from the decision table
    pub behavior: BehaviorType,
    /// Mean dynamic body acceleration over the dive (g)
    pub mean_dba_g: f64,
    /// Fraction of samples with acoustic activity (0-1)
    pub acoustic_proportion: f64,
    /// Foraging-success indicators
    pub foraging: ForagingIndicators,
    /// Estimated energetic cost (model units)
    pub energy_cost: f64,
    /// Success probability per unit energy cost (0 when cost is 0)
    pub dive_efficiency: f64,
    /// Behavioral-context label
    pub context: BehavioralContext,
}

/// Surface-interval metrics for one deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSummary {
    /// Total time spent shallower than the surface threshold (seconds)
    pub total_surface_time_s: f64,
    /// Count of contiguous surface periods
    pub surface_periods: u32,
    /// Mean surface-period duration (seconds)
    pub mean_surface_duration_s: f64,
    /// Surface periods per hour of recording (breathing-bout proxy)
    pub breathing_rate_per_hour: f64,
    /// Mean squared acceleration magnitude while at the surface (g^2)
    pub surface_activity_level: f64,
}

/// Deployment-level energetic and behavioral-budget model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergeticModel {
    /// Sum of per-dive energy costs
    pub total_energy_cost: f64,
    /// Mean energy cost per dive (0 when no dives)
    pub mean_energy_cost: f64,
    /// Successful foraging dives / foraging dives (0 when none)
    pub foraging_success_rate: f64,
    /// Total foraging success / total energy cost (0 when cost is 0)
    pub energy_efficiency: f64,
    /// Fraction of dives per behavior label (sums to 1 when dives exist)
    pub behavioral_budget: HashMap<BehaviorType, f64>,
    /// Fraction of tracked time spent diving
    pub dive_time_fraction: f64,
    /// Fraction of tracked time spent at the surface
    pub surface_time_fraction: f64,
    /// Mean max depth of dives with success probability > 0.5 (0 when none)
    pub optimal_foraging_depth_m: f64,
    /// Mean duration of dives with success probability > 0.5 (0 when none)
    pub optimal_foraging_duration_s: f64,
    /// Count of foraging-labeled dives
    pub foraging_dives: u32,
    /// Count of foraging dives with success probability > 0.5
    pub successful_foraging_dives: u32,
}

/// Complete result of analyzing one deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentAnalysis {
    /// Dive records in chronological order
    pub dives: Vec<DiveRecord>,
    /// Surface-interval summary
    pub surface: SurfaceSummary,
    /// Deployment-level energetic model
    pub energetics: EnergeticModel,
    /// Human-readable summary strings
    pub insights: Vec<String>,
    /// Quality flags raised during normalization and analysis
    pub quality_flags: Vec<QualityFlag>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_behavior_type_serialization() {
        let json = serde_json::to_string(&BehaviorType::DeepForaging).unwrap();
        assert_eq!(json, "\"deep_foraging\"");

        let parsed: BehaviorType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, BehaviorType::DeepForaging);
    }

    #[test]
    fn test_behavioral_context_serialization() {
        let json = serde_json::to_string(&BehavioralContext::SuccessfulForaging).unwrap();
        assert_eq!(json, "\"successful_foraging\"");
    }

    #[test]
    fn test_is_foraging() {
        assert!(BehaviorType::DeepForaging.is_foraging());
        assert!(BehaviorType::ShallowForaging.is_foraging());
        assert!(!BehaviorType::DeepTravel.is_foraging());
        assert!(!BehaviorType::Resting.is_foraging());
    }

    #[test]
    fn test_sensor_frame_rejects_length_mismatch() {
        let result = SensorFrame::new(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![0.0], // short channel
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            vec![false, false],
            1.0,
        );
        assert!(matches!(result, Err(AnalysisError::ShapeMismatch(_))));
    }

    #[test]
    fn test_sensor_frame_rejects_non_positive_rate() {
        let result = SensorFrame::new(vec![], vec![], vec![], vec![], vec![], vec![], 0.0);
        assert!(matches!(result, Err(AnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn test_sensor_frame_duration() {
        let frame = SensorFrame::new(
            vec![0.0, 0.5, 1.0, 1.5],
            vec![0.0; 4],
            vec![0.0; 4],
            vec![0.0; 4],
            vec![0.0; 4],
            vec![false; 4],
            2.0,
        )
        .unwrap();
        assert_eq!(frame.len(), 4);
        assert!((frame.duration_s() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_dive_window_duration() {
        let window = DiveWindow { start: 10, end: 70 };
        assert_eq!(window.len(), 60);
        assert!((window.duration_s(2.0) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_behavioral_budget_map_keys_serialize_as_strings() {
        let mut budget = HashMap::new();
        budget.insert(BehaviorType::Resting, 1.0);
        let json = serde_json::to_string(&budget).unwrap();
        assert_eq!(json, "{\"resting\":1.0}");
    }
}
