use reqwest::multipart::{Form, Part};

use crate::{
    error::TranscriptionError,
    types::TranscriptionRequest,
    wire::{self, form as field},
};

/// One named part of a `multipart/form-data` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    /// Binary part carrying a file
    File {
        name: &'static str,
        content: Vec<u8>,
        content_type: &'static str,
        filename: &'static str,
    },
    /// Plain text part
    Text { name: &'static str, value: String },
}

impl FormPart {
    pub fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self::Text {
            name,
            value: value.into(),
        }
    }

    /// Field name of the part
    pub fn name(&self) -> &'static str {
        match self {
            Self::File { name, .. } | Self::Text { name, .. } => name,
        }
    }
}

impl TranscriptionRequest {
    /// Encode the request into its ordered form parts
    ///
    /// The file and model parts come first, then one part for each present
    /// optional field in declaration order, then one
    /// `timestamp_granularities[]` part per granularity in input order.
    pub fn into_form_parts(self) -> Vec<FormPart> {
        let mut parts = vec![
            FormPart::File {
                name: field::FILE,
                content: self.file,
                content_type: wire::FILE_CONTENT_TYPE,
                filename: wire::FILE_NAME,
            },
            FormPart::text(field::MODEL, self.model),
        ];

        let optional = [
            self.language.map(|language| FormPart::text(field::LANGUAGE, language)),
            self.prompt.map(|prompt| FormPart::text(field::PROMPT, prompt)),
            self.response_format
                .map(|format| FormPart::text(field::RESPONSE_FORMAT, format.as_ref())),
            self.temperature
                .map(|temperature| FormPart::text(field::TEMPERATURE, format_decimal(temperature))),
        ];
        parts.extend(optional.into_iter().flatten());

        parts.extend(
            self.timestamp_granularities
                .into_iter()
                .flatten()
                .map(|granularity| FormPart::text(field::TIMESTAMP_GRANULARITIES, granularity.as_ref())),
        );

        parts
    }

    /// Encode a borrowed request, leaving it usable afterwards
    pub fn form_parts(&self) -> Vec<FormPart> {
        self.clone().into_form_parts()
    }
}

/// Render a real number as a locale-independent decimal that always has a
/// fractional part (`1.0` stays `"1.0"`, not `"1"`)
///
/// Non-finite values are written as `NaN`, `inf` or `-inf`; keeping the
/// temperature finite is up to the caller, since encoding never fails.
fn format_decimal(value: f64) -> String {
    let rendered = value.to_string();

    if value.is_finite() && !rendered.contains('.') {
        format!("{rendered}.0")
    } else {
        rendered
    }
}

/// Assemble form parts into a `reqwest` multipart body
///
/// # Errors
///
/// Returns an error if a file part carries an unparseable content type
pub fn into_multipart(parts: Vec<FormPart>) -> crate::error::Result<Form> {
    parts.into_iter().try_fold(Form::new(), |form, part| match part {
        FormPart::File {
            name,
            content,
            content_type,
            filename,
        } => {
            let part = Part::bytes(content)
                .file_name(filename)
                .mime_str(content_type)
                .map_err(|e| TranscriptionError::InvalidRequest(format!("Invalid content type: {e}")))?;

            Ok(form.part(name, part))
        }
        FormPart::Text { name, value } => Ok(form.text(name, value)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ResponseFormat, TimestampGranularity};

    fn count(parts: &[FormPart], name: &str) -> usize {
        parts.iter().filter(|part| part.name() == name).count()
    }

    fn text_values<'a>(parts: &'a [FormPart], name: &str) -> Vec<&'a str> {
        parts
            .iter()
            .filter_map(|part| match part {
                FormPart::Text { name: n, value } if *n == name => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    fn full_request() -> TranscriptionRequest {
        TranscriptionRequest::new(b"RIFF....WAVE".to_vec(), "whisper-1")
            .with_language("en")
            .with_prompt("Glossary: Rust, cargo")
            .with_response_format(ResponseFormat::VerboseJson)
            .with_temperature(0.2)
            .with_timestamp_granularities([TimestampGranularity::Word, TimestampGranularity::Segment])
    }

    #[test]
    fn minimal_request_emits_file_and_model_only() {
        let parts = TranscriptionRequest::new(vec![0xFF, 0xFB], "whisper-1").into_form_parts();

        assert_eq!(
            parts,
            vec![
                FormPart::File {
                    name: "file",
                    content: vec![0xFF, 0xFB],
                    content_type: "audio/mpeg",
                    filename: "audio.m4a",
                },
                FormPart::text("model", "whisper-1"),
            ]
        );
    }

    #[test]
    fn full_request_emits_every_field_in_order() {
        let parts = full_request().into_form_parts();
        let names: Vec<_> = parts.iter().map(FormPart::name).collect();

        assert_eq!(
            names,
            [
                "file",
                "model",
                "language",
                "prompt",
                "response_format",
                "temperature",
                "timestamp_granularities[]",
                "timestamp_granularities[]",
            ]
        );
        assert_eq!(text_values(&parts, "response_format"), ["verbose_json"]);
        assert_eq!(text_values(&parts, "temperature"), ["0.2"]);
    }

    #[test]
    fn granularities_repeat_in_input_order() {
        let parts = full_request().into_form_parts();

        assert_eq!(text_values(&parts, "timestamp_granularities[]"), ["word", "segment"]);

        let reversed = TranscriptionRequest::new(Vec::new(), "whisper-1")
            .with_timestamp_granularities([TimestampGranularity::Segment, TimestampGranularity::Word])
            .into_form_parts();

        assert_eq!(text_values(&reversed, "timestamp_granularities[]"), ["segment", "word"]);
    }

    #[test]
    fn absent_fields_emit_nothing() {
        let request = TranscriptionRequest::new(Vec::new(), "whisper-1").with_prompt("hi");
        let parts = request.into_form_parts();

        assert_eq!(count(&parts, "file"), 1);
        assert_eq!(count(&parts, "model"), 1);
        assert_eq!(count(&parts, "prompt"), 1);
        assert_eq!(count(&parts, "language"), 0);
        assert_eq!(count(&parts, "response_format"), 0);
        assert_eq!(count(&parts, "temperature"), 0);
        assert_eq!(count(&parts, "timestamp_granularities[]"), 0);
    }

    #[test]
    fn empty_granularity_list_emits_nothing() {
        let parts = TranscriptionRequest::new(Vec::new(), "whisper-1")
            .with_timestamp_granularities(Vec::new())
            .into_form_parts();

        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn empty_model_is_passed_through() {
        let parts = TranscriptionRequest::new(Vec::new(), "").into_form_parts();
        assert_eq!(text_values(&parts, "model"), [""]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let request = full_request();
        assert_eq!(request.form_parts(), request.form_parts());
        assert_eq!(request.form_parts(), request.into_form_parts());
    }

    #[test]
    fn decimals_keep_a_fractional_part() {
        assert_eq!(format_decimal(0.0), "0.0");
        assert_eq!(format_decimal(1.0), "1.0");
        assert_eq!(format_decimal(0.2), "0.2");
        assert_eq!(format_decimal(0.75), "0.75");
        assert_eq!(format_decimal(f64::NAN), "NaN");
    }

    #[test]
    fn non_finite_temperature_is_passed_through() {
        let parts = TranscriptionRequest::new(Vec::new(), "whisper-1")
            .with_temperature(f64::INFINITY)
            .into_form_parts();

        assert_eq!(text_values(&parts, "temperature"), ["inf"]);
    }

    #[test]
    fn multipart_accepts_encoded_parts() {
        let form = into_multipart(full_request().into_form_parts()).unwrap();
        assert!(!form.boundary().is_empty());
    }
}
