//! Tagdive CLI - command-line interface for the dive analysis engine
//!
//! Commands:
//! - analyze: Process a tag recording into a deployment report
//! - validate: Validate a recording against the input contract
//! - schema: Print input/output schema information

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tagdive::normalizer::parse_recording;
use tagdive::{
    AcousticPolicy, AnalysisConfig, AnalysisError, DiveTagProcessor, StreamNormalizer,
    ENGINE_VERSION,
};

/// Tagdive - dive segmentation and behavioral classification for biologging tags
#[derive(Parser)]
#[command(name = "tagdive")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Analyze animal-borne tag recordings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a tag recording into a deployment report
    Analyze {
        /// Input recording JSON path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output report path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Policy for recordings without an acoustic channel
        #[arg(long, value_enum, default_value = "reject")]
        missing_acoustic: MissingAcoustic,

        /// Dive-detection depth threshold (meters)
        #[arg(long, default_value = "5.0")]
        depth_threshold: f64,

        /// Surface-detection depth threshold (meters)
        #[arg(long, default_value = "2.0")]
        surface_threshold: f64,

        /// Minimum dive duration (seconds)
        #[arg(long, default_value = "30.0")]
        min_dive_duration: f64,

        /// Reject recordings whose sampling rate differs from this value (Hz)
        #[arg(long)]
        sampling_rate: Option<f64>,
    },

    /// Validate a recording against the input contract
    Validate {
        /// Input recording JSON path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print schema information
    Schema {
        /// Schema to print
        #[arg(value_enum)]
        schema_type: SchemaType,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MissingAcoustic {
    /// Reject recordings without an acoustic channel
    Reject,
    /// Treat the deployment as silent (all-false)
    Silent,
}

impl From<MissingAcoustic> for AcousticPolicy {
    fn from(value: MissingAcoustic) -> Self {
        match value {
            MissingAcoustic::Reject => AcousticPolicy::Reject,
            MissingAcoustic::Silent => AcousticPolicy::AssumeSilent,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaType {
    /// Input schema (tag recording)
    Input,
    /// Output schema (deployment report)
    Output,
}

/// Error envelope emitted on stderr
#[derive(Serialize)]
struct CliError {
    error: String,
    kind: &'static str,
}

impl From<AnalysisError> for CliError {
    fn from(e: AnalysisError) -> Self {
        let kind = match &e {
            AnalysisError::InvalidConfig(_) => "invalid_config",
            AnalysisError::ShapeMismatch(_) => "shape_mismatch",
            AnalysisError::MissingChannel(_) => "missing_channel",
            AnalysisError::SamplingRateMismatch(_) => "sampling_rate_mismatch",
            AnalysisError::ParseError(_) => "parse_error",
            AnalysisError::JsonError(_) => "json_error",
            AnalysisError::EncodingError(_) => "encoding_error",
        };
        Self {
            error: e.to_string(),
            kind,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let envelope = CliError::from(e);
            eprintln!(
                "{}",
                serde_json::to_string(&envelope).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AnalysisError> {
    match cli.command {
        Commands::Analyze {
            input,
            output,
            missing_acoustic,
            depth_threshold,
            surface_threshold,
            min_dive_duration,
            sampling_rate,
        } => {
            let mut config =
                AnalysisConfig::new(depth_threshold, surface_threshold, min_dive_duration)?;
            if let Some(rate) = sampling_rate {
                config = config.with_expected_sampling_rate(rate)?;
            }

            let raw = read_input(&input)?;
            let processor = DiveTagProcessor::with_config(config, missing_acoustic.into());
            let report = processor.process_json(&raw)?;
            write_output(&output, &report)
        }

        Commands::Validate { input } => {
            let raw = read_input(&input)?;
            let recording = parse_recording(&raw)?;
            StreamNormalizer::normalize(
                &recording,
                AcousticPolicy::AssumeSilent,
                &AnalysisConfig::default(),
            )?;
            println!(
                "Valid recording: {} samples at {} Hz",
                recording.depth.len(),
                recording.sampling_rate_hz
            );
            Ok(())
        }

        Commands::Schema { schema_type } => {
            match schema_type {
                SchemaType::Input => println!("{}", input_schema_summary()),
                SchemaType::Output => println!("{}", output_schema_summary()),
            }
            Ok(())
        }
    }
}

fn read_input(path: &PathBuf) -> Result<String, AnalysisError> {
    if path.as_os_str() == "-" {
        if atty::is(atty::Stream::Stdin) {
            return Err(AnalysisError::ParseError(
                "Refusing to read a recording from an interactive terminal; pipe JSON to stdin"
                    .to_string(),
            ));
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| AnalysisError::ParseError(format!("Failed to read stdin: {}", e)))?;
        Ok(buffer)
    } else {
        fs::read_to_string(path)
            .map_err(|e| AnalysisError::ParseError(format!("Failed to read {:?}: {}", path, e)))
    }
}

fn write_output(path: &PathBuf, content: &str) -> Result<(), AnalysisError> {
    if path.as_os_str() == "-" {
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", content)
            .map_err(|e| AnalysisError::EncodingError(format!("Failed to write stdout: {}", e)))
    } else {
        fs::write(path, content)
            .map_err(|e| AnalysisError::EncodingError(format!("Failed to write {:?}: {}", path, e)))
    }
}

fn input_schema_summary() -> &'static str {
    r#"Tag recording (JSON object):
  deployment_id     optional string
  timestamps        [f64] seconds since deployment start
  depth             [f64] meters, positive down
  acceleration_x    [f64] g
  acceleration_y    [f64] g
  acceleration_z    [f64] g
  acoustic_activity optional [bool]
  sampling_rate_hz  f64, > 0
All channels must have equal length."#
}

fn output_schema_summary() -> &'static str {
    r#"Deployment report (JSON object):
  report_version  schema version string
  producer        { name, version, instance_id }
  provenance      { deployment_id, recording_duration_s, sample_count,
                    sampling_rate_hz, computed_at_utc }
  quality         { coverage, flags }
  analysis        { dives, surface, energetics, insights, quality_flags }"#
}
