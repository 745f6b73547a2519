//! Report encoding
//!
//! Encodes a deployment analysis into a versioned, language-neutral JSON
//! payload with producer and provenance metadata, for persistence or for
//! consumption by downstream feature pipelines.

use crate::error::AnalysisError;
use crate::types::{DeploymentAnalysis, QualityFlag, SensorFrame};
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Channels expected in a complete recording
const EXPECTED_CHANNELS: f64 = 6.0;

/// Producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Provenance of the analyzed recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProvenance {
    pub deployment_id: Option<String>,
    pub recording_duration_s: f64,
    pub sample_count: usize,
    pub sampling_rate_hz: f64,
    pub computed_at_utc: String,
}

/// Data-quality metrics for the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportQuality {
    /// Fraction of expected channels actually present (0-1)
    pub coverage: f64,
    /// Quality flags raised during analysis
    pub flags: Vec<String>,
}

/// Complete deployment report payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub provenance: ReportProvenance,
    pub quality: ReportQuality,
    pub analysis: DeploymentAnalysis,
}

/// Encoder for producing deployment report payloads
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Encode one analysis into a report payload
    pub fn encode(
        &self,
        analysis: DeploymentAnalysis,
        deployment_id: Option<&str>,
        frame: &SensorFrame,
    ) -> DeploymentReport {
        let producer = ReportProducer {
            name: PRODUCER_NAME.to_string(),
            version: ENGINE_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        };

        let provenance = ReportProvenance {
            deployment_id: deployment_id.map(str::to_string),
            recording_duration_s: frame.duration_s(),
            sample_count: frame.len(),
            sampling_rate_hz: frame.sampling_rate_hz,
            computed_at_utc: Utc::now().to_rfc3339(),
        };

        let quality = build_quality(&analysis.quality_flags);

        DeploymentReport {
            report_version: REPORT_VERSION.to_string(),
            producer,
            provenance,
            quality,
            analysis,
        }
    }

    /// Encode to a JSON string
    pub fn encode_to_json(
        &self,
        analysis: DeploymentAnalysis,
        deployment_id: Option<&str>,
        frame: &SensorFrame,
    ) -> Result<String, AnalysisError> {
        let report = self.encode(analysis, deployment_id, frame);
        serde_json::to_string_pretty(&report).map_err(AnalysisError::JsonError)
    }
}

fn build_quality(flags: &[QualityFlag]) -> ReportQuality {
    let missing_channels = if flags.contains(&QualityFlag::AcousticAssumedSilent) {
        1.0
    } else {
        0.0
    };
    let coverage = (EXPECTED_CHANNELS - missing_channels) / EXPECTED_CHANNELS;

    ReportQuality {
        coverage,
        flags: flags
            .iter()
            .map(|f| format!("{f:?}").to_lowercase())
            .collect(),
    }
}
