use std::path::PathBuf;

use clap::Parser;
use hark_transcription::{ResponseFormat, TimestampGranularity};

/// Hark audio transcription client
#[derive(Debug, Parser)]
#[command(name = "hark", about = "Transcribe audio files with an OpenAI-compatible endpoint")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "hark.toml", env = "HARK_CONFIG")]
    pub config: PathBuf,

    /// Audio file to transcribe
    pub file: PathBuf,

    /// Override the configured model
    #[arg(short, long)]
    pub model: Option<String>,

    /// Language of the audio (ISO 639-1)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Text to guide the transcription style
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Response format (json or `verbose_json`)
    #[arg(short, long)]
    pub response_format: Option<ResponseFormat>,

    /// Sampling temperature between 0 and 1
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Timestamp granularity to request; may be repeated
    #[arg(long = "timestamp-granularity")]
    pub timestamp_granularities: Vec<TimestampGranularity>,

    /// Print one line per segment with its timings
    #[arg(long)]
    pub segments: bool,
}
