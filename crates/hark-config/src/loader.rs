use std::path::Path;

use secrecy::ExposeSecret;

use crate::{Config, RESPONSE_FORMATS};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config file");

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty, the base URL is not an
    /// http(s) URL, the timeout is unparseable or zero, or the response
    /// format is not one the endpoint knows
    pub fn validate(&self) -> anyhow::Result<()> {
        let transcription = &self.transcription;

        if transcription.api_key.expose_secret().trim().is_empty() {
            anyhow::bail!("transcription.api_key must not be empty");
        }

        let base_url = url::Url::parse(transcription.base_url())
            .map_err(|e| anyhow::anyhow!("invalid transcription.base_url '{}': {e}", transcription.base_url()))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            anyhow::bail!("transcription.base_url must use http or https, got '{}'", base_url.scheme());
        }

        if transcription.timeout()?.is_zero() {
            anyhow::bail!("transcription.timeout must be greater than 0");
        }

        if transcription.model.is_empty() {
            anyhow::bail!("transcription.model must not be empty");
        }

        if let Some(format) = transcription.response_format.as_deref()
            && !RESPONSE_FORMATS.contains(&format)
        {
            anyhow::bail!(
                "invalid transcription.response_format '{format}', expected one of: {}",
                RESPONSE_FORMATS.join(", ")
            );
        }

        Ok(())
    }
}
