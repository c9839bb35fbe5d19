//! Text decoding of extracted byte streams.
//!
//! Every decoder starts from the sanitized (printable ASCII) projection
//! of the stream and returns zero or one candidate text. Decoders share
//! no state and may run in any order. Malformed input never fails a
//! decoder: an undecodable run is skipped and `None` means nothing
//! decodable was found.

mod b64;
mod base32;
mod rot13;
mod runs;
mod sanitizer;

pub use sanitizer::{is_printable, sanitize};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when parsing encoding names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("unknown encoding {0:?} (expected ascii, base64, base32, rot13 or all)")]
    Unknown(String),
}

/// The text encodings tried against an extracted stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Ascii,
    Base64,
    Base32,
    Rot13,
}

impl Encoding {
    /// All encodings in reporting order.
    pub const ALL: [Encoding; 4] = [
        Encoding::Ascii,
        Encoding::Base64,
        Encoding::Base32,
        Encoding::Rot13,
    ];

    /// Returns the lower-case encoding name.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Ascii => "ascii",
            Encoding::Base64 => "base64",
            Encoding::Base32 => "base32",
            Encoding::Rot13 => "rot13",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::ALL
            .into_iter()
            .find(|encoding| encoding.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EncodingError::Unknown(s.to_string()))
    }
}

/// Which encodings a run should try.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EncodingSelection {
    /// Every supported encoding.
    #[default]
    All,
    /// An explicit, duplicate-free subset in the given order.
    Only(Vec<Encoding>),
}

impl EncodingSelection {
    /// Returns the selected encodings in the order they are tried.
    pub fn encodings(&self) -> Vec<Encoding> {
        match self {
            EncodingSelection::All => Encoding::ALL.to_vec(),
            EncodingSelection::Only(list) => list.clone(),
        }
    }
}

impl FromStr for EncodingSelection {
    type Err = EncodingError;

    /// Parses `all` or a comma-separated list of encoding names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(EncodingSelection::All);
        }

        let mut list: Vec<Encoding> = Vec::new();
        for name in s.split(',') {
            let encoding = name.parse::<Encoding>()?;
            if !list.contains(&encoding) {
                list.push(encoding);
            }
        }
        Ok(EncodingSelection::Only(list))
    }
}

impl fmt::Display for EncodingSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingSelection::All => f.write_str("all"),
            EncodingSelection::Only(list) => {
                let names: Vec<&str> = list.iter().map(|e| e.name()).collect();
                f.write_str(&names.join(","))
            }
        }
    }
}

impl TryFrom<String> for EncodingSelection {
    type Error = EncodingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EncodingSelection> for String {
    fn from(selection: EncodingSelection) -> Self {
        selection.to_string()
    }
}

/// Decoder set with shared tuning.
#[derive(Debug, Clone, Copy)]
pub struct Decoders {
    /// Minimum Base64/Base32 run length, padding excluded.
    min_run_len: usize,
}

impl Decoders {
    pub const DEFAULT_MIN_RUN_LEN: usize = 16;

    /// Creates a decoder set with a custom minimum run length.
    pub fn new(min_run_len: usize) -> Self {
        Self {
            min_run_len: min_run_len.max(1),
        }
    }

    /// Returns the minimum run length.
    pub fn min_run_len(&self) -> usize {
        self.min_run_len
    }

    /// Decodes a raw byte stream with the given encoding.
    pub fn decode(&self, encoding: Encoding, data: &[u8]) -> Option<String> {
        self.decode_sanitized(encoding, &sanitize(data))
    }

    /// Decodes text that has already been through [`sanitize`].
    pub fn decode_sanitized(&self, encoding: Encoding, text: &str) -> Option<String> {
        match encoding {
            Encoding::Ascii => non_blank(text).map(str::to_string),
            Encoding::Base64 => {
                runs::decode_runs(text, runs::BASE64, self.min_run_len, b64::decode_strict)
            }
            Encoding::Base32 => {
                runs::decode_runs(text, runs::BASE32, self.min_run_len, base32::decode_strict)
            }
            Encoding::Rot13 => non_blank(text).map(rot13::rotate),
        }
    }
}

impl Default for Decoders {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_RUN_LEN)
    }
}

fn non_blank(text: &str) -> Option<&str> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Printable text of the stream, if it holds anything but whitespace.
pub fn decode_ascii(data: &[u8]) -> Option<String> {
    Decoders::default().decode(Encoding::Ascii, data)
}

/// Joined decodings of every valid Base64 run of 16+ characters.
pub fn decode_base64(data: &[u8]) -> Option<String> {
    Decoders::default().decode(Encoding::Base64, data)
}

/// Joined decodings of every valid Base32 run of 16+ characters.
pub fn decode_base32(data: &[u8]) -> Option<String> {
    Decoders::default().decode(Encoding::Base32, data)
}

/// ROT13 of the printable text of the stream.
pub fn decode_rot13(data: &[u8]) -> Option<String> {
    Decoders::default().decode(Encoding::Rot13, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ascii_returns_sanitized_text() {
        assert_eq!(decode_ascii(b"\x00flag{test}\xff\x01").as_deref(), Some("flag{test}"));
    }

    #[test]
    fn test_ascii_blank_is_absent() {
        assert_eq!(decode_ascii(b""), None);
        assert_eq!(decode_ascii(b" \t\r\n\x00\x80"), None);
    }

    #[test]
    fn test_base64_found_inside_noise() {
        let data = b"#@! junk ZmxhZ3tsc2JfYmFzZTY0X3dvcmtzfQ== more junk \x00\x13";

        assert_eq!(decode_base64(data).as_deref(), Some("flag{lsb_base64_works}"));
    }

    #[test]
    fn test_base64_joins_multiple_runs() {
        let data = b"ZmxhZ3tsc2JfYmFzZTY0X3dvcmtzfQ== -- aGVsbG8gd29ybGQhIQ==";

        assert_eq!(
            decode_base64(data).as_deref(),
            Some("flag{lsb_base64_works}\nhello world!!")
        );
    }

    #[test]
    fn test_base64_skips_invalid_runs_and_continues() {
        // First run is missing its padding, second is fine
        let data = b"ZmxhZ3tsc2JfYmFzZTY0X3dvcmtzfQ .. aGVsbG8gd29ybGQhIQ==";

        assert_eq!(decode_base64(data).as_deref(), Some("hello world!!"));
    }

    #[test]
    fn test_base64_short_runs_need_lower_minimum() {
        // 14 data characters, below the default minimum
        let data = b"ZmxhZ3t0ZXN0fQ==";

        assert_eq!(decode_base64(data), None);
        assert_eq!(
            Decoders::new(12).decode(Encoding::Base64, data).as_deref(),
            Some("flag{test}")
        );
    }

    #[test]
    fn test_base32_found_inside_noise() {
        let data = b"noise MZWGCZ33ORSXG5D5 noise";

        assert_eq!(decode_base32(data).as_deref(), Some("flag{test}"));
    }

    #[test]
    fn test_base32_padded_run() {
        let data = b"x MZWGCZ33MIZTEX3QMF4WY33BMR6Q==== y";

        assert_eq!(decode_base32(data).as_deref(), Some("flag{b32_payload}"));
    }

    #[test]
    fn test_base32_nothing_decodable() {
        assert_eq!(decode_base32(b"ABCDEFGHIJKLMNOPQ"), None);
        assert_eq!(decode_base32(b"lowercase only here"), None);
    }

    #[test]
    fn test_rot13_whole_text() {
        assert_eq!(decode_rot13(b"synt{ebg_zr}\x00").as_deref(), Some("flag{rot_me}"));
        assert_eq!(decode_rot13(b"\x00\x01  "), None);
    }

    #[test]
    fn test_encoding_names_round_trip() {
        for encoding in Encoding::ALL {
            assert_eq!(encoding.name().parse::<Encoding>().unwrap(), encoding);
        }
        assert_eq!("BASE64".parse::<Encoding>().unwrap(), Encoding::Base64);
        assert!("utf16".parse::<Encoding>().is_err());
    }

    #[test]
    fn test_encoding_selection_parsing() {
        assert_eq!("all".parse::<EncodingSelection>().unwrap(), EncodingSelection::All);
        assert_eq!(
            "rot13,ascii,rot13".parse::<EncodingSelection>().unwrap(),
            EncodingSelection::Only(vec![Encoding::Rot13, Encoding::Ascii])
        );
        assert!("ascii,morse".parse::<EncodingSelection>().is_err());
        assert_eq!(EncodingSelection::All.encodings(), Encoding::ALL.to_vec());
    }

    proptest! {
        #[test]
        fn prop_decoders_never_panic(data in proptest::collection::vec(any::<u8>(), 0..1024)) {
            let decoders = Decoders::new(4);
            for encoding in Encoding::ALL {
                let _ = decoders.decode(encoding, &data);
            }
        }

        #[test]
        fn prop_radix_decoders_survive_alphabet_soup(text in "[A-Za-z0-9+/=]{0,200}") {
            let _ = decode_base64(text.as_bytes());
            let _ = decode_base32(text.as_bytes());
        }

        #[test]
        fn prop_embedded_base64_is_recovered(
            plain in "[a-z0-9_{}]{12,40}",
            prefix in "[ !#.-]{0,10}",
            suffix in "[ !#.-]{0,10}",
        ) {
            use base64::Engine;
            let encoded = base64::engine::general_purpose::STANDARD.encode(&plain);
            let data = format!("{prefix}{encoded}{suffix}");

            let decoded = decode_base64(data.as_bytes()).unwrap_or_default();
            prop_assert!(decoded.lines().any(|line| line == plain));
        }
    }
}
