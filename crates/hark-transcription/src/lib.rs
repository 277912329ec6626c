//! Typed models for the `OpenAI` audio transcription endpoint
//!
//! Encodes a [`TranscriptionRequest`] into multipart [`FormPart`]s and decodes
//! the JSON answer into a [`TranscriptionResult`]. [`OpenAiTranscriber`] wires
//! both halves to an HTTP client.

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod decode;
mod error;
mod form;
mod http_client;
mod provider;
mod types;
pub mod wire;

pub use decode::{DecodeError, JsonKind, decode_slice, decode_value};
pub use error::{Result, TranscriptionError};
pub use form::{FormPart, into_multipart};
pub use provider::{Transcriber, openai::OpenAiTranscriber};
pub use types::{
    COMPRESSION_FAILURE_THRESHOLD, LOGPROB_FAILURE_THRESHOLD, NO_SPEECH_THRESHOLD, ResponseFormat, Segment,
    TimestampGranularity, TranscriptionRequest, TranscriptionResult, Word,
};
