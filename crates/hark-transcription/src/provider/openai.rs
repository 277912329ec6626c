use std::time::Duration;

use async_trait::async_trait;
use hark_config::TranscriptionConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use super::Transcriber;
use crate::{
    decode::decode_slice,
    error::{Result, TranscriptionError},
    form::into_multipart,
    http_client::http_client,
    types::{TranscriptionRequest, TranscriptionResult},
};

/// `OpenAI`-compatible `/audio/transcriptions` client
pub struct OpenAiTranscriber {
    client: Client,
    base_url: String,
    api_key: SecretString,
    timeout: Duration,
    name: String,
}

impl OpenAiTranscriber {
    pub fn new(name: String, api_key: SecretString, base_url: &str, timeout: Duration) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
            name,
        }
    }

    /// Build a transcriber from the `[transcription]` config section
    ///
    /// # Errors
    ///
    /// Returns an error if the configured timeout cannot be parsed
    pub fn from_config(config: &TranscriptionConfig) -> Result<Self> {
        let timeout = config
            .timeout()
            .map_err(|e| TranscriptionError::ConfigError(e.to_string()))?;

        Ok(Self::new(
            "openai".to_string(),
            config.api_key.clone(),
            config.base_url(),
            timeout,
        ))
    }
}

#[async_trait]
impl Transcriber for OpenAiTranscriber {
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<TranscriptionResult> {
        if let Some(format) = request.response_format.filter(|format| !format.is_json()) {
            return Err(TranscriptionError::InvalidRequest(format!(
                "response format `{format}` does not produce a JSON transcription"
            )));
        }

        let url = format!("{}/audio/transcriptions", self.base_url);

        tracing::debug!(
            "Transcription request: {} bytes, model={}",
            request.file.len(),
            request.model,
        );

        let form = into_multipart(request.into_form_parts())?;

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Transcription request failed: {e}");
                TranscriptionError::ConnectionError(format!("Failed to send request to {}: {e}", self.name))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("Transcription API error ({status}): {error_text}");

            return Err(TranscriptionError::from_status(status.as_u16(), error_text));
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read transcription response: {e}");
            TranscriptionError::ConnectionError(format!("Failed to read response from {}: {e}", self.name))
        })?;

        let result = decode_slice(&body).inspect_err(|e| {
            tracing::error!("Failed to decode transcription response: {e}");
        })?;

        tracing::debug!(
            words = result.words.as_ref().map_or(0, Vec::len),
            segments = result.segments.as_ref().map_or(0, Vec::len),
            "Transcription complete"
        );

        Ok(result)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
