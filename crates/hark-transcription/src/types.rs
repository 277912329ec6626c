use strum::{AsRefStr, Display, EnumString};

/// Transcription request following the `OpenAI` `/audio/transcriptions` form
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionRequest {
    /// Raw audio data (flac, mp3, mp4, mpeg, mpga, m4a, ogg, wav or webm)
    pub file: Vec<u8>,
    /// Model identifier (e.g. "whisper-1")
    pub model: String,
    /// Optional language hint (ISO 639-1)
    pub language: Option<String>,
    /// Optional prompt to guide style or continue a previous segment
    pub prompt: Option<String>,
    /// Shape of the transcript returned by the endpoint
    pub response_format: Option<ResponseFormat>,
    /// Sampling temperature (0-1)
    pub temperature: Option<f64>,
    /// Timestamp detail to populate, only honoured with `verbose_json`
    pub timestamp_granularities: Option<Vec<TimestampGranularity>>,
}

impl TranscriptionRequest {
    pub fn new(file: Vec<u8>, model: impl Into<String>) -> Self {
        Self {
            file,
            model: model.into(),
            language: None,
            prompt: None,
            response_format: None,
            temperature: None,
            timestamp_granularities: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_response_format(mut self, response_format: ResponseFormat) -> Self {
        self.response_format = Some(response_format);
        self
    }

    /// Set the sampling temperature
    ///
    /// The value is sent as given; NaN or infinite values reach the wire
    /// unchanged and are rejected by the endpoint, not here.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_timestamp_granularities(
        mut self,
        granularities: impl IntoIterator<Item = TimestampGranularity>,
    ) -> Self {
        self.timestamp_granularities = Some(granularities.into_iter().collect());
        self
    }
}

/// Output shape requested from the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ResponseFormat {
    Json,
    Text,
    Srt,
    /// JSON with language, duration, words and segments
    VerboseJson,
    Vtt,
}

impl ResponseFormat {
    /// Whether the endpoint answers this format with a JSON body
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json | Self::VerboseJson)
    }
}

/// Timestamp detail level for a verbose transcription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum TimestampGranularity {
    Word,
    Segment,
}

/// Decoded transcription, from either the `json` or the `verbose_json` shape
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionResult {
    /// Transcribed text
    pub text: String,
    /// Language of the input audio
    pub language: Option<String>,
    /// Duration of the input audio in seconds
    pub duration: Option<f64>,
    /// Words with their timestamps
    pub words: Option<Vec<Word>>,
    /// Segments with their timing and confidence details
    pub segments: Option<Vec<Segment>>,
}

/// A single transcribed word
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub word: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl Word {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Logprob below which a segment's decoding is considered failed
pub const LOGPROB_FAILURE_THRESHOLD: f64 = -1.0;

/// Compression ratio above which a segment's decoding is considered failed
pub const COMPRESSION_FAILURE_THRESHOLD: f64 = 2.4;

/// No-speech probability above which a low-confidence segment counts as silent
pub const NO_SPEECH_THRESHOLD: f64 = 1.0;

/// A transcribed segment with the decoder's confidence metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Seek offset of the segment
    pub seek: i64,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    pub text: String,
    /// Token IDs for the text content
    pub tokens: Vec<i64>,
    /// Temperature used to generate the segment
    pub temperature: f64,
    pub avg_logprob: f64,
    pub compression_ratio: f64,
    pub no_speech_prob: f64,
}

impl Segment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn logprob_failed(&self) -> bool {
        self.avg_logprob < LOGPROB_FAILURE_THRESHOLD
    }

    pub fn compression_failed(&self) -> bool {
        self.compression_ratio > COMPRESSION_FAILURE_THRESHOLD
    }

    /// High no-speech probability combined with a failed logprob
    pub fn is_silent(&self) -> bool {
        self.no_speech_prob > NO_SPEECH_THRESHOLD && self.logprob_failed()
    }
}
