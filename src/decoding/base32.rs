//! Strict RFC 4648 Base32 decoding.

const QUANTUM_CHARS: usize = 8;
const QUANTUM_BYTES: usize = 5;

fn symbol_value(c: u8) -> Option<u64> {
    match c {
        b'A'..=b'Z' => Some(u64::from(c - b'A')),
        b'2'..=b'7' => Some(u64::from(c - b'2' + 26)),
        _ => None,
    }
}

/// Decodes upper-case, padded Base32.
///
/// The input length must be a multiple of eight and the padding length
/// one of 0, 1, 3, 4 or 6. Unused trailing bits are not checked.
pub fn decode_strict(input: &str) -> Option<Vec<u8>> {
    let bytes = input.as_bytes();
    if bytes.len() % QUANTUM_CHARS != 0 {
        return None;
    }

    let body_len = input.trim_end_matches('=').len();
    let padding = bytes.len() - body_len;
    if !matches!(padding, 0 | 1 | 3 | 4 | 6) {
        return None;
    }

    let mut out = Vec::with_capacity(bytes.len() / QUANTUM_CHARS * QUANTUM_BYTES);
    for (quantum, chunk) in bytes.chunks(QUANTUM_CHARS).enumerate() {
        let mut acc = 0u64;
        for (offset, &c) in chunk.iter().enumerate() {
            let value = if quantum * QUANTUM_CHARS + offset < body_len {
                symbol_value(c)?
            } else {
                0
            };
            acc = (acc << 5) | value;
        }
        out.extend_from_slice(&acc.to_be_bytes()[3..]);
    }

    if padding > 0 {
        let kept = (43 - 5 * padding) / 8;
        out.truncate(out.len() - QUANTUM_BYTES + kept);
    }
    Some(out)
}
