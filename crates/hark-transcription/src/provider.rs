pub(crate) mod openai;

use async_trait::async_trait;

use crate::types::{TranscriptionRequest, TranscriptionResult};

/// A backend that turns audio into a transcription
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe audio to text
    async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<TranscriptionResult>;

    /// Get the provider name
    fn name(&self) -> &str;
}
