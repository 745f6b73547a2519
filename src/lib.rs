//! Tagdive - dive segmentation and behavioral classification for animal-borne tags
//!
//! Tagdive turns a raw multi-channel tag recording (depth, tri-axial
//! acceleration, acoustic activity) into a structured deployment analysis
//! through a deterministic pipeline: stream normalization → dive
//! segmentation → per-dive analysis (kinematics → behavior classification →
//! foraging indicators → energetic cost) → surface analysis → budget
//! aggregation → report encoding.
//!
//! The pipeline is a pure batch computation: an immutable [`SensorFrame`]
//! plus an immutable [`AnalysisConfig`] always produce the same
//! [`DeploymentAnalysis`].

pub mod budget;
pub mod classifier;
pub mod config;
pub mod energetics;
pub mod error;
pub mod foraging;
pub mod insights;
pub mod kinematics;
pub mod normalizer;
pub mod pipeline;
pub mod report;
pub mod segmenter;
pub mod surface;
pub mod types;

pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use normalizer::{AcousticPolicy, StreamNormalizer, TagRecording};
pub use pipeline::{analyze_deployment, recording_to_report, DiveTagProcessor};
pub use report::{DeploymentReport, ReportEncoder};
pub use types::{
    BehaviorType, BehavioralContext, DeploymentAnalysis, DiveRecord, DiveWindow, EnergeticModel,
    ForagingIndicators, SensorFrame, SurfaceSummary,
};

/// Engine version embedded in all report payloads
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "tagdive";
