//! Strict Base64 decoding of candidate runs.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};

/// Standard alphabet, padding stripped by the caller, unused trailing
/// bits tolerated.
const BODY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

/// Decodes standard-alphabet Base64 with mandatory padding.
///
/// At most two `=` are accepted. A final partial quantum of two or three
/// characters must be completed by exactly the right amount of padding;
/// a lone leftover character is always invalid. Stray padding after a
/// complete quantum is ignored.
pub fn decode_strict(input: &str) -> Option<Vec<u8>> {
    let body = input.trim_end_matches('=');
    let padding = input.len() - body.len();
    if padding > 2 {
        return None;
    }

    match body.len() % 4 {
        0 => {}
        1 => return None,
        partial if padding != 4 - partial => return None,
        _ => {}
    }

    BODY_ENGINE.decode(body).ok()
}
