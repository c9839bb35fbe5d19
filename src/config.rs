//! Scan configuration.
//!
//! Values can come from a TOML file; command-line flags override them.
//! Every section is optional and falls back to the classic defaults:
//! 1 bit from RGB, every encoding, 16-character radix runs.

use crate::decoding::{Decoders, EncodingSelection};
use crate::extraction::{BitDepth, ChannelSelection, ExtractionError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full configuration file format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub decoding: DecodingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Bit-plane selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Low-order bits read per channel (1-4).
    pub bits: u8,
    /// Channel letters, read in order.
    pub channels: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            bits: 1,
            channels: "RGB".to_string(),
        }
    }
}

/// Decoder and matcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodingConfig {
    /// Encodings to try.
    pub encodings: EncodingSelection,
    /// Minimum Base64/Base32 run length, padding excluded.
    pub min_run_len: usize,
    /// Extra flag regex, added to the built-in patterns.
    pub flag_format: Option<String>,
}

impl Default for DecodingConfig {
    fn default() -> Self {
        Self {
            encodings: EncodingSelection::All,
            min_run_len: Decoders::DEFAULT_MIN_RUN_LEN,
            flag_format: None,
        }
    }
}

/// Report rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Show previews for encodings without flag hits.
    pub verbose: bool,
    /// Report format.
    pub format: OutputFormat,
    /// Maximum preview length in characters.
    pub preview_chars: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            format: OutputFormat::Text,
            preview_chars: 200,
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::InvalidFormat(other.to_string())),
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("minimum run length must be at least 1")]
    InvalidRunLength,
    #[error("unknown output format {0:?} (expected text or json)")]
    InvalidFormat(String),
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

impl ScanConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        BitDepth::new(self.extraction.bits)?;
        ChannelSelection::parse(&self.extraction.channels)?;
        if self.decoding.min_run_len == 0 {
            return Err(ConfigError::InvalidRunLength);
        }
        Ok(())
    }

    /// Loads configuration from a TOML file.
    ///
    /// The result is parsed but not validated: callers layer their
    /// overrides on top and then call [`validate`](Self::validate).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::parse(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config = Self::parse(content)?;
        config.validate()?;
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
