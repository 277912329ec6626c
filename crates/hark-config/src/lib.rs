#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod log;
pub mod transcription;

use serde::Deserialize;

pub use log::*;
pub use transcription::*;

/// Top-level Hark configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Transcription endpoint configuration
    pub transcription: TranscriptionConfig,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}
