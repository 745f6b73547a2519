//! Stream normalization
//!
//! Parses the raw recording contract delivered by acquisition collaborators
//! and converts it into a validated [`SensorFrame`]. Channel presence is
//! modeled explicitly: a missing acoustic channel is never backfilled with
//! fabricated data; callers state their intent through [`AcousticPolicy`].

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::types::{QualityFlag, SensorFrame};
use serde::{Deserialize, Serialize};

/// Raw multi-channel recording as delivered by a tag or simulator.
///
/// All channels must have equal length; `acoustic_activity` is optional at
/// this boundary and handled per [`AcousticPolicy`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRecording {
    /// Deployment identifier for provenance tracking
    #[serde(default)]
    pub deployment_id: Option<String>,
    /// Sample timestamps (seconds since deployment start)
    pub timestamps: Vec<f64>,
    /// Depth channel (meters, positive down)
    pub depth: Vec<f64>,
    /// Acceleration X axis (g)
    pub acceleration_x: Vec<f64>,
    /// Acceleration Y axis (g)
    pub acceleration_y: Vec<f64>,
    /// Acceleration Z axis (g)
    pub acceleration_z: Vec<f64>,
    /// Acoustic-activity flag per sample, when the tag carried a hydrophone
    #[serde(default)]
    pub acoustic_activity: Option<Vec<bool>>,
    /// Sampling rate (Hz)
    pub sampling_rate_hz: f64,
}

/// Caller-stated intent for a recording without an acoustic channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcousticPolicy {
    /// Reject the recording with [`AnalysisError::MissingChannel`]
    #[default]
    Reject,
    /// Treat the deployment as silent (all-false) and flag the substitution
    AssumeSilent,
}

/// Normalizer for converting raw recordings into validated sensor frames
pub struct StreamNormalizer;

impl StreamNormalizer {
    /// Validate and align a raw recording.
    ///
    /// Returns the immutable frame plus any quality flags raised while
    /// resolving missing channels.
    pub fn normalize(
        recording: &TagRecording,
        policy: AcousticPolicy,
        config: &AnalysisConfig,
    ) -> Result<(SensorFrame, Vec<QualityFlag>), AnalysisError> {
        if let Some(expected) = config.expected_sampling_rate_hz {
            if (recording.sampling_rate_hz - expected).abs() > f64::EPSILON {
                return Err(AnalysisError::SamplingRateMismatch(format!(
                    "Recording is {} Hz, configuration expects {} Hz",
                    recording.sampling_rate_hz, expected
                )));
            }
        }

        let mut flags = Vec::new();
        let n = recording.depth.len();

        let acoustic = match &recording.acoustic_activity {
            Some(channel) => channel.clone(),
            None => match policy {
                AcousticPolicy::Reject => {
                    return Err(AnalysisError::MissingChannel(
                        "acoustic_activity".to_string(),
                    ));
                }
                AcousticPolicy::AssumeSilent => {
                    flags.push(QualityFlag::AcousticAssumedSilent);
                    vec![false; n]
                }
            },
        };

        let frame = SensorFrame::new(
            recording.timestamps.clone(),
            recording.depth.clone(),
            recording.acceleration_x.clone(),
            recording.acceleration_y.clone(),
            recording.acceleration_z.clone(),
            acoustic,
            recording.sampling_rate_hz,
        )?;

        if frame.duration_s() < config.min_dive_duration_s {
            flags.push(QualityFlag::ShortRecording);
        }

        Ok((frame, flags))
    }
}

/// Parse a recording JSON string into a [`TagRecording`]
pub fn parse_recording(json: &str) -> Result<TagRecording, AnalysisError> {
    serde_json::from_str(json)
        .map_err(|e| AnalysisError::ParseError(format!("Failed to parse tag recording: {}", e)))
}
