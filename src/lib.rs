//! LSB Flag Finder Library
//!
//! Recovers data hidden in the least-significant bits of image pixel
//! channels and searches it for CTF flags, trying several common text
//! encodings along the way.
//!
//! # Architecture
//!
//! Data flows one way through independent stages:
//!
//! ```text
//! source → extraction → decoding → matching
//!   ↓          ↓            ↓          ↓
//!            scanner (report per encoding)
//! ```
//!
//! # Design Principles
//!
//! - **Pure core**: extraction, decoding and matching are deterministic
//!   functions of their inputs with no shared state
//! - **Lossy packing**: bits that do not fill a final byte are dropped
//! - **Noise tolerant**: undecodable input yields no candidate, never an error
//! - **No steganalysis**: the tool does not judge whether data is hidden
//!
//! # Example
//!
//! ```no_run
//! use lsb_flag_finder::{
//!     config::ScanConfig,
//!     scanner::Scanner,
//!     source::ImageFile,
//! };
//!
//! let scanner = Scanner::from_config(&ScanConfig::default()).unwrap();
//! let report = scanner.scan(&ImageFile::new("challenge.png")).unwrap();
//!
//! for result in &report.results {
//!     for flag in &result.flags {
//!         println!("[{}] {}", result.encoding, flag);
//!     }
//! }
//! ```

#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod decoding;
pub mod extraction;
pub mod matching;
pub mod report;
pub mod scanner;
pub mod source;

#[cfg(test)]
mod testing;

// Re-export commonly used types at crate root
pub use config::ScanConfig;
pub use decoding::{
    decode_ascii, decode_base32, decode_base64, decode_rot13, sanitize, Decoders, Encoding,
    EncodingSelection,
};
pub use extraction::{extract, BitDepth, ByteStream, Channel, ChannelSelection, Extractor};
pub use matching::{find_flags, FlagPattern, MatchSet};
pub use scanner::{EncodingResult, ScanError, ScanReport, Scanner};
pub use source::{ImageFile, ImageSource, PixelGrid};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
