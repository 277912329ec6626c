use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;

/// Default endpoint root for the `OpenAI` audio API
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Response formats the endpoint accepts
pub const RESPONSE_FORMATS: &[&str] = &["json", "text", "srt", "verbose_json", "vtt"];

/// Configuration for the transcription endpoint
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptionConfig {
    /// API key sent as a bearer token
    pub api_key: SecretString,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout (e.g. "30s", "2m")
    #[serde(default = "default_timeout")]
    pub timeout: String,
    /// Model used when a request does not name one
    #[serde(default = "default_model")]
    pub model: String,
    /// Default language hint (ISO 639-1)
    #[serde(default)]
    pub language: Option<String>,
    /// Default response format (json, text, srt, `verbose_json`, vtt)
    #[serde(default)]
    pub response_format: Option<String>,
}

impl TranscriptionConfig {
    /// Endpoint root, falling back to [`DEFAULT_BASE_URL`]
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Parse the configured request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the duration string cannot be parsed
    pub fn timeout(&self) -> anyhow::Result<Duration> {
        duration_str::parse(&self.timeout)
            .map_err(|e| anyhow::anyhow!("invalid transcription.timeout '{}': {e}", self.timeout))
    }
}

fn default_timeout() -> String {
    "120s".to_string()
}

fn default_model() -> String {
    "whisper-1".to_string()
}
