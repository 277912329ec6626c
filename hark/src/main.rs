#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod logging;

use std::str::FromStr;

use anyhow::Context;
use args::Args;
use clap::Parser;
use hark_config::{Config, TranscriptionConfig};
use hark_transcription::{
    OpenAiTranscriber, ResponseFormat, Transcriber, TranscriptionRequest, TranscriptionResult,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    logging::init(&config.log)?;

    tracing::info!(
        config_path = %args.config.display(),
        file = %args.file.display(),
        "starting transcription"
    );

    let audio = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("failed to read audio file {}", args.file.display()))?;

    let request = build_request(audio, &args, &config.transcription)?;
    let transcriber = OpenAiTranscriber::from_config(&config.transcription)?;

    let result = transcriber.transcribe(request).await?;

    print_result(&result, args.segments);

    tracing::info!("transcription finished");
    Ok(())
}

/// Merge command-line overrides with configured defaults
fn build_request(audio: Vec<u8>, args: &Args, config: &TranscriptionConfig) -> anyhow::Result<TranscriptionRequest> {
    let model = args.model.clone().unwrap_or_else(|| config.model.clone());
    let mut request = TranscriptionRequest::new(audio, model);

    if let Some(language) = args.language.clone().or_else(|| config.language.clone()) {
        request = request.with_language(language);
    }

    if let Some(prompt) = &args.prompt {
        request = request.with_prompt(prompt.clone());
    }

    let configured = config
        .response_format
        .as_deref()
        .map(|configured| {
            ResponseFormat::from_str(configured)
                .map_err(|_| anyhow::anyhow!("invalid transcription.response_format '{configured}'"))
        })
        .transpose()?;

    // Segment output and timestamps need the verbose shape
    let needs_verbose = args.segments || !args.timestamp_granularities.is_empty();

    let response_format = match args.response_format {
        Some(format) => {
            if needs_verbose && format != ResponseFormat::VerboseJson {
                tracing::warn!(%format, "segments and timestamps are only returned with verbose_json");
            }
            Some(format)
        }
        None if needs_verbose => Some(ResponseFormat::VerboseJson),
        None => configured,
    };

    if let Some(format) = response_format {
        request = request.with_response_format(format);
    }

    if let Some(temperature) = args.temperature {
        request = request.with_temperature(temperature);
    }

    if !args.timestamp_granularities.is_empty() {
        request = request.with_timestamp_granularities(args.timestamp_granularities.iter().copied());
    }

    Ok(request)
}

fn print_result(result: &TranscriptionResult, segments: bool) {
    match result.segments.as_deref() {
        Some(list) if segments => {
            for segment in list {
                println!("[{:>8.2} -> {:>8.2}] {}", segment.start, segment.end, segment.text.trim());
            }
        }
        _ => println!("{}", result.text),
    }
}
