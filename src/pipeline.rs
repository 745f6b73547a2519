//! Pipeline orchestration
//!
//! This module provides the public API for tagdive. It orchestrates the full
//! pipeline from a raw tag recording to the deployment analysis and the
//! encoded report: normalization → dive segmentation → per-dive analysis
//! (kinematics → classification → foraging indicators → energetics) →
//! surface analysis → budget aggregation → insights.

use crate::budget::BudgetAggregator;
use crate::classifier::BehaviorClassifier;
use crate::config::AnalysisConfig;
use crate::energetics::EnergyEstimator;
use crate::error::AnalysisError;
use crate::foraging::ForagingDetector;
use crate::insights::generate_insights;
use crate::kinematics::DiveAnalyzer;
use crate::normalizer::{parse_recording, AcousticPolicy, StreamNormalizer, TagRecording};
use crate::report::ReportEncoder;
use crate::segmenter::DiveSegmenter;
use crate::surface::SurfaceAnalyzer;
use crate::types::{DeploymentAnalysis, DiveRecord};

/// Analyze one deployment recording.
///
/// Pure function: the same recording and configuration always produce the
/// same analysis. Zero detected dives is a valid result with empty
/// collections, not an error.
pub fn analyze_deployment(
    recording: &TagRecording,
    config: &AnalysisConfig,
    policy: AcousticPolicy,
) -> Result<DeploymentAnalysis, AnalysisError> {
    config.validate()?;

    let (frame, quality_flags) = StreamNormalizer::normalize(recording, policy, config)?;

    let segmenter = DiveSegmenter::new(config);
    let windows = segmenter.segment(&frame);

    // Windows arrive ordered by start index, so the record list is already
    // chronological. Per-dive analysis has no cross-dive state.
    let mut dives = Vec::with_capacity(windows.len());
    for (index, window) in windows.iter().enumerate() {
        let kinematics = DiveAnalyzer::analyze(&frame, window);
        let behavior = BehaviorClassifier::classify(&kinematics);
        let foraging = ForagingDetector::detect(&frame, window);
        let context =
            BehaviorClassifier::classify_context(behavior, &foraging, kinematics.acoustic_proportion);

        let duration_s = window.duration_s(frame.sampling_rate_hz);
        let energy_cost = EnergyEstimator::estimate(
            duration_s,
            kinematics.max_depth_m,
            kinematics.mean_dba_g,
            behavior,
        );
        let dive_efficiency =
            EnergyEstimator::dive_efficiency(foraging.success_probability, energy_cost);

        dives.push(DiveRecord {
            dive_id: index as u32 + 1,
            start_time_s: frame.timestamps[window.start],
            end_time_s: frame.timestamps[window.end - 1],
            duration_s,
            max_depth_m: kinematics.max_depth_m,
            descent_rate_m_per_s: kinematics.descent_rate_m_per_s,
            ascent_rate_m_per_s: kinematics.ascent_rate_m_per_s,
            bottom_time_s: kinematics.bottom_time_s,
            behavior,
            mean_dba_g: kinematics.mean_dba_g,
            acoustic_proportion: kinematics.acoustic_proportion,
            foraging,
            energy_cost,
            dive_efficiency,
            context,
        });
    }

    let surface = SurfaceAnalyzer::new(config).analyze(&frame);
    let energetics = BudgetAggregator::aggregate(&dives, &surface);
    let insights = generate_insights(&dives, &surface, &energetics);

    Ok(DeploymentAnalysis {
        dives,
        surface,
        energetics,
        insights,
        quality_flags,
    })
}

/// Convert a raw recording JSON string to a report JSON string using the
/// default configuration (stateless, one-shot).
pub fn recording_to_report(raw_json: &str) -> Result<String, AnalysisError> {
    DiveTagProcessor::new().process_json(raw_json)
}

/// Processor bundling a configuration, a missing-channel policy, and a
/// report encoder for repeated deployments.
pub struct DiveTagProcessor {
    config: AnalysisConfig,
    policy: AcousticPolicy,
    encoder: ReportEncoder,
}

impl Default for DiveTagProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DiveTagProcessor {
    /// Create a processor with the default configuration and the
    /// reject-missing-channel policy
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
            policy: AcousticPolicy::Reject,
            encoder: ReportEncoder::new(),
        }
    }

    /// Create a processor with a specific configuration and policy
    pub fn with_config(config: AnalysisConfig, policy: AcousticPolicy) -> Self {
        Self {
            config,
            policy,
            encoder: ReportEncoder::new(),
        }
    }

    /// Analyze one parsed recording
    pub fn process(&self, recording: &TagRecording) -> Result<DeploymentAnalysis, AnalysisError> {
        analyze_deployment(recording, &self.config, self.policy)
    }

    /// Analyze a recording JSON string and return the report JSON
    pub fn process_json(&self, raw_json: &str) -> Result<String, AnalysisError> {
        let recording = parse_recording(raw_json)?;
        let analysis = self.process(&recording)?;

        // Re-normalize for the provenance block; the frame is cheap relative
        // to the analysis itself.
        let (frame, _) = StreamNormalizer::normalize(&recording, self.policy, &self.config)?;
        self.encoder
            .encode_to_json(analysis, recording.deployment_id.as_deref(), &frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BehaviorType, BehavioralContext};
    use pretty_assertions::{assert_eq, assert_ne};

    /// One synthetic deep-foraging dive at 1 Hz: 30 s at the surface, a
    /// 20 s descent to 40 m, 70 s at the bottom, a 20 s ascent, 30 s at the
    /// surface. Acoustic activity alternates every sample.
    fn make_dive_recording() -> TagRecording {
        let mut depth = vec![0.0; 30];
        depth.extend((1..=20).map(|i| i as f64 * 2.0));
        depth.extend(vec![40.0; 70]);
        depth.extend((0..20).map(|i| 38.0 - i as f64 * 2.0));
        depth.extend(vec![0.0; 30]);

        let n = depth.len();
        TagRecording {
            deployment_id: Some("dep-001".to_string()),
            timestamps: (0..n).map(|i| i as f64).collect(),
            depth,
            acceleration_x: vec![0.5; n],
            acceleration_y: vec![0.0; n],
            acceleration_z: vec![0.0; n],
            acoustic_activity: Some((0..n).map(|i| i % 2 == 0).collect()),
            sampling_rate_hz: 1.0,
        }
    }

    fn flat_recording(n: usize) -> TagRecording {
        TagRecording {
            deployment_id: None,
            timestamps: (0..n).map(|i| i as f64).collect(),
            depth: vec![0.0; n],
            acceleration_x: vec![0.3; n],
            acceleration_y: vec![0.0; n],
            acceleration_z: vec![0.0; n],
            acoustic_activity: Some(vec![true; n]),
            sampling_rate_hz: 1.0,
        }
    }

    #[test]
    fn test_single_deep_foraging_dive() {
        let analysis = analyze_deployment(
            &make_dive_recording(),
            &AnalysisConfig::default(),
            AcousticPolicy::Reject,
        )
        .unwrap();

        assert_eq!(analysis.dives.len(), 1);
        let dive = &analysis.dives[0];

        assert_eq!(dive.dive_id, 1);
        assert!((dive.max_depth_m - 40.0).abs() < 1e-9);
        assert!(dive.bottom_time_s > 60.0);
        assert!((dive.acoustic_proportion - 0.5).abs() < 0.05);
        assert_eq!(dive.behavior, BehaviorType::DeepForaging);

        // Saturated click and buzz indicators push success past 0.5
        assert!(dive.foraging.success_probability > 0.5);
        assert_eq!(dive.context, BehavioralContext::SuccessfulForaging);

        assert!(dive.energy_cost > 0.0);
        assert!(
            (dive.dive_efficiency - dive.foraging.success_probability / dive.energy_cost).abs()
                < 1e-9
        );
    }

    #[test]
    fn test_flat_recording_yields_empty_result_not_error() {
        let n = 600;
        let analysis = analyze_deployment(
            &flat_recording(n),
            &AnalysisConfig::default(),
            AcousticPolicy::Reject,
        )
        .unwrap();

        assert!(analysis.dives.is_empty());
        assert!(analysis.energetics.behavioral_budget.is_empty());
        assert!((analysis.surface.total_surface_time_s - n as f64).abs() < 1e-9);
        assert!(analysis
            .insights
            .iter()
            .any(|s| s.contains("No dives detected")));
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let recording = make_dive_recording();
        let config = AnalysisConfig::default();

        let first = analyze_deployment(&recording, &config, AcousticPolicy::Reject).unwrap();
        let second = analyze_deployment(&recording, &config, AcousticPolicy::Reject).unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_records_are_chronological() {
        let mut depth = Vec::new();
        for _ in 0..3 {
            depth.extend(vec![0.0; 20]);
            depth.extend(vec![25.0; 50]);
        }
        depth.extend(vec![0.0; 20]);
        let n = depth.len();

        let recording = TagRecording {
            deployment_id: None,
            timestamps: (0..n).map(|i| i as f64).collect(),
            depth,
            acceleration_x: vec![0.5; n],
            acceleration_y: vec![0.0; n],
            acceleration_z: vec![0.0; n],
            acoustic_activity: Some(vec![false; n]),
            sampling_rate_hz: 1.0,
        };

        let analysis = analyze_deployment(
            &recording,
            &AnalysisConfig::default(),
            AcousticPolicy::Reject,
        )
        .unwrap();

        assert_eq!(analysis.dives.len(), 3);
        for (i, dive) in analysis.dives.iter().enumerate() {
            assert_eq!(dive.dive_id, i as u32 + 1);
        }
        for pair in analysis.dives.windows(2) {
            assert!(pair[0].start_time_s < pair[1].start_time_s);
        }
    }

    #[test]
    fn test_time_fractions_sum_to_one() {
        let analysis = analyze_deployment(
            &make_dive_recording(),
            &AnalysisConfig::default(),
            AcousticPolicy::Reject,
        )
        .unwrap();

        let model = &analysis.energetics;
        assert!((model.dive_time_fraction + model.surface_time_fraction - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig {
            depth_threshold_m: 5.0,
            surface_threshold_m: 6.0, // above the depth threshold
            min_dive_duration_s: 30.0,
            expected_sampling_rate_hz: None,
        };
        let result = analyze_deployment(&flat_recording(100), &config, AcousticPolicy::Reject);
        assert!(matches!(result, Err(AnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let mut recording = flat_recording(100);
        recording.acceleration_y.truncate(50);

        let result = analyze_deployment(
            &recording,
            &AnalysisConfig::default(),
            AcousticPolicy::Reject,
        );
        assert!(matches!(result, Err(AnalysisError::ShapeMismatch(_))));
    }

    #[test]
    fn test_missing_acoustic_policy_flows_through() {
        let mut recording = make_dive_recording();
        recording.acoustic_activity = None;

        let rejected = analyze_deployment(
            &recording,
            &AnalysisConfig::default(),
            AcousticPolicy::Reject,
        );
        assert!(matches!(rejected, Err(AnalysisError::MissingChannel(_))));

        let analysis = analyze_deployment(
            &recording,
            &AnalysisConfig::default(),
            AcousticPolicy::AssumeSilent,
        )
        .unwrap();

        // Silent deployment: still one dive, but no acoustic evidence
        assert_eq!(analysis.dives.len(), 1);
        assert_eq!(analysis.dives[0].acoustic_proportion, 0.0);
        assert_ne!(analysis.dives[0].behavior, BehaviorType::DeepForaging);
    }

    #[test]
    fn test_process_json_produces_report() {
        let recording = make_dive_recording();
        let raw_json = serde_json::to_string(&recording).unwrap();

        let processor = DiveTagProcessor::new();
        let report_json = processor.process_json(&raw_json).unwrap();

        let payload: serde_json::Value = serde_json::from_str(&report_json).unwrap();
        assert_eq!(payload["producer"]["name"], "tagdive");
        assert_eq!(payload["provenance"]["deployment_id"], "dep-001");
        assert_eq!(payload["analysis"]["dives"].as_array().unwrap().len(), 1);
        assert_eq!(
            payload["analysis"]["dives"][0]["behavior"],
            "deep_foraging"
        );
    }

    #[test]
    fn test_recording_to_report_one_shot() {
        let raw_json = serde_json::to_string(&make_dive_recording()).unwrap();
        let report_json = recording_to_report(&raw_json).unwrap();

        let payload: serde_json::Value = serde_json::from_str(&report_json).unwrap();
        assert_eq!(payload["report_version"], "1.0.0");
    }

    #[test]
    fn test_invalid_json_rejected() {
        let result = recording_to_report("not valid json");
        assert!(result.is_err());
    }
}
