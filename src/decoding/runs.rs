//! Candidate run scanning for the radix decoders.
//!
//! Base64 and Base32 payloads hide inside noisy text. A run is a maximal
//! stretch of alphabet characters at least `min_len` long, followed by at
//! most `max_padding` `=` characters. Each run is decoded on its own; a
//! run that fails to decode is skipped.

/// Character class and padding limit for one radix encoding.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Alphabet {
    /// Membership test for data characters.
    pub contains: fn(u8) -> bool,
    /// Maximum trailing `=` characters taken into a run.
    pub max_padding: usize,
}

pub(crate) const BASE64: Alphabet = Alphabet {
    contains: |b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/',
    max_padding: 3,
};

pub(crate) const BASE32: Alphabet = Alphabet {
    contains: |b| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b),
    max_padding: 6,
};

/// Iterator over candidate runs in a text.
pub(crate) struct Runs<'a> {
    text: &'a str,
    pos: usize,
    alphabet: Alphabet,
    min_len: usize,
}

impl<'a> Runs<'a> {
    pub fn new(text: &'a str, alphabet: Alphabet, min_len: usize) -> Self {
        Self {
            text,
            pos: 0,
            alphabet,
            min_len: min_len.max(1),
        }
    }
}

impl<'a> Iterator for Runs<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();

        while self.pos < bytes.len() {
            if !(self.alphabet.contains)(bytes[self.pos]) {
                self.pos += 1;
                continue;
            }

            let start = self.pos;
            while self.pos < bytes.len() && (self.alphabet.contains)(bytes[self.pos]) {
                self.pos += 1;
            }
            if self.pos - start < self.min_len {
                continue;
            }

            let data_end = self.pos;
            while self.pos < bytes.len()
                && self.pos - data_end < self.alphabet.max_padding
                && bytes[self.pos] == b'='
            {
                self.pos += 1;
            }

            // Run boundaries sit on ASCII bytes, so slicing is safe
            return Some(&self.text[start..self.pos]);
        }

        None
    }
}

/// Decodes bytes as UTF-8, dropping invalid sequences.
pub(crate) fn utf8_dropping_invalid(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Decodes every candidate run and joins the non-blank results.
///
/// Returns `None` when no run produced any text.
pub(crate) fn decode_runs(
    text: &str,
    alphabet: Alphabet,
    min_len: usize,
    decode: fn(&str) -> Option<Vec<u8>>,
) -> Option<String> {
    let mut hits = Vec::new();

    for run in Runs::new(text, alphabet, min_len) {
        let Some(bytes) = decode(run) else {
            tracing::trace!(len = run.len(), "Skipping undecodable run");
            continue;
        };

        let decoded = utf8_dropping_invalid(&bytes);
        if !decoded.trim().is_empty() {
            hits.push(decoded);
        }
    }

    if hits.is_empty() {
        None
    } else {
        Some(hits.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(text: &str, alphabet: Alphabet, min_len: usize) -> Vec<&str> {
        Runs::new(text, alphabet, min_len).collect()
    }

    #[test]
    fn test_runs_are_maximal() {
        let text = "!!abcdefghijklmnopq=== rest";

        assert_eq!(runs(text, BASE64, 16), vec!["abcdefghijklmnopq==="]);
    }

    #[test]
    fn test_short_runs_skipped() {
        assert!(runs("short run only", BASE64, 16).is_empty());
        assert_eq!(runs("aaaa-bbbbbb", BASE64, 5), vec!["bbbbbb"]);
    }

    #[test]
    fn test_padding_capped() {
        let text = "ABCDEFGHIJKLMNOP=======";

        assert_eq!(runs(text, BASE64, 16), vec!["ABCDEFGHIJKLMNOP==="]);
        assert_eq!(runs(text, BASE32, 16), vec!["ABCDEFGHIJKLMNOP======"]);
    }

    #[test]
    fn test_base32_alphabet_excludes_lowercase() {
        let text = "xxMZWGCZ33ORSXG5D5yy";

        assert_eq!(runs(text, BASE32, 16), vec!["MZWGCZ33ORSXG5D5"]);
    }

    #[test]
    fn test_non_ascii_text_is_safe() {
        let text = "é€ABCDEFGHIJKLMNOPé";

        assert_eq!(runs(text, BASE64, 16), vec!["ABCDEFGHIJKLMNOP"]);
    }

    #[test]
    fn test_invalid_utf8_dropped() {
        assert_eq!(utf8_dropping_invalid(b"fl\xffag\xc3"), "flag");
        assert_eq!(utf8_dropping_invalid("café".as_bytes()), "café");
    }
}
