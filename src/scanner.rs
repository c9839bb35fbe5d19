//! End-to-end scan: extraction, decoding and flag matching.
//!
//! The scanner owns the per-run settings (bit planes, decoder tuning,
//! compiled flag pattern) and turns a pixel grid into a [`ScanReport`].

use crate::config::ScanConfig;
use crate::decoding::{sanitize, Decoders, Encoding, EncodingSelection};
use crate::extraction::{ByteStream, ExtractionError, Extractor};
use crate::matching::{find_flags, FlagPattern, MatchSet, PatternError};
use crate::source::{ImageSource, SourceError};
use serde::Serialize;
use thiserror::Error;

/// Errors that abort a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Outcome of one encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodingResult {
    /// Encoding that produced the candidate.
    pub encoding: Encoding,
    /// Decoded candidate text.
    pub candidate: String,
    /// Distinct flags found in the candidate.
    pub flags: MatchSet,
}

/// Results of scanning one byte stream.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Packed bytes recovered from the image.
    pub byte_count: usize,
    /// Trailing bits dropped during packing.
    pub discarded_bits: u8,
    /// One entry per encoding that produced a candidate, in try order.
    pub results: Vec<EncodingResult>,
}

impl ScanReport {
    /// Returns true if any encoding produced a flag.
    pub fn flags_found(&self) -> bool {
        self.results.iter().any(|r| !r.flags.is_empty())
    }

    /// Returns every distinct flag across encodings.
    pub fn all_flags(&self) -> MatchSet {
        self.results
            .iter()
            .flat_map(|r| r.flags.iter().cloned())
            .collect()
    }

    /// Returns the result for `encoding`, if it produced a candidate.
    pub fn result(&self, encoding: Encoding) -> Option<&EncodingResult> {
        self.results.iter().find(|r| r.encoding == encoding)
    }
}

/// Runs the extract → decode → match pipeline.
#[derive(Debug, Clone)]
pub struct Scanner {
    extractor: Extractor,
    decoders: Decoders,
    encodings: Vec<Encoding>,
    pattern: FlagPattern,
}

impl Scanner {
    pub fn new(
        extractor: Extractor,
        decoders: Decoders,
        encodings: EncodingSelection,
        pattern: FlagPattern,
    ) -> Self {
        Self {
            extractor,
            decoders,
            encodings: encodings.encodings(),
            pattern,
        }
    }

    /// Builds a scanner from validated configuration.
    pub fn from_config(config: &ScanConfig) -> Result<Self, ScanError> {
        let extractor = Extractor::from_parts(config.extraction.bits, &config.extraction.channels)?;
        config.validate()?;
        let pattern = FlagPattern::new(config.decoding.flag_format.as_deref())?;

        Ok(Self::new(
            extractor,
            Decoders::new(config.decoding.min_run_len),
            config.decoding.encodings.clone(),
            pattern,
        ))
    }

    /// Returns the extractor.
    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Loads an image and extracts its bit planes.
    pub fn extract(&self, source: &dyn ImageSource) -> Result<ByteStream, ScanError> {
        extract_from(&self.extractor, source)
    }

    /// Decodes an extracted stream and searches every candidate for flags.
    pub fn scan_bytes(&self, stream: &ByteStream) -> ScanReport {
        let text = sanitize(stream.data());
        tracing::debug!(
            bytes = stream.len(),
            printable = text.len(),
            "Sanitized stream"
        );

        let mut results = Vec::with_capacity(self.encodings.len());
        for &encoding in &self.encodings {
            let Some(candidate) = self.decoders.decode_sanitized(encoding, &text) else {
                tracing::debug!(%encoding, "No candidate text");
                continue;
            };

            let flags = find_flags(&candidate, &self.pattern);
            if !flags.is_empty() {
                tracing::info!(%encoding, count = flags.len(), "Flags found");
            }
            results.push(EncodingResult {
                encoding,
                candidate,
                flags,
            });
        }

        ScanReport {
            byte_count: stream.len(),
            discarded_bits: stream.discarded_bits(),
            results,
        }
    }

    /// Loads, extracts, decodes and matches in one call.
    pub fn scan(&self, source: &dyn ImageSource) -> Result<ScanReport, ScanError> {
        let stream = self.extract(source)?;
        Ok(self.scan_bytes(&stream))
    }
}

/// Loads an image and extracts its bit planes without building a matcher.
pub fn extract_from(
    extractor: &Extractor,
    source: &dyn ImageSource,
) -> Result<ByteStream, ScanError> {
    tracing::info!(
        "Extracting {}-bit LSB from {} channels of {}",
        extractor.depth(),
        extractor.channels(),
        source.describe()
    );
    let grid = source.load()?;
    let stream = extractor.extract(&grid);
    tracing::info!("Got {} bytes", stream.len());
    Ok(stream)
}
