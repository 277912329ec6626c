//! Wire names used by the transcription endpoint
//!
//! Every key the encoder writes or the decoder reads comes from here, so the
//! in-memory field names and their snake_case wire spellings live in one place.

/// Multipart form field names
pub mod form {
    pub const FILE: &str = "file";
    pub const MODEL: &str = "model";
    pub const LANGUAGE: &str = "language";
    pub const PROMPT: &str = "prompt";
    pub const RESPONSE_FORMAT: &str = "response_format";
    pub const TEMPERATURE: &str = "temperature";
    /// Repeated once per requested granularity
    pub const TIMESTAMP_GRANULARITIES: &str = "timestamp_granularities[]";
}

/// JSON keys of the transcription response body
pub mod json {
    pub const TEXT: &str = "text";
    pub const LANGUAGE: &str = "language";
    pub const DURATION: &str = "duration";
    pub const WORDS: &str = "words";
    pub const SEGMENTS: &str = "segments";

    pub const WORD: &str = "word";
    pub const START: &str = "start";
    pub const END: &str = "end";

    pub const SEEK: &str = "seek";
    pub const TOKENS: &str = "tokens";
    pub const TEMPERATURE: &str = "temperature";
    pub const AVG_LOGPROB: &str = "avg_logprob";
    pub const COMPRESSION_RATIO: &str = "compression_ratio";
    pub const NO_SPEECH_PROB: &str = "no_speech_prob";
}

/// Content type sent with the audio part
///
/// The endpoint sniffs the real format from the bytes.
pub const FILE_CONTENT_TYPE: &str = "audio/mpeg";

/// Placeholder filename sent with the audio part
pub const FILE_NAME: &str = "audio.m4a";
