//! Printable-ASCII projection of raw bytes.

/// Returns true for bytes kept by [`sanitize`]: printable ASCII plus
/// tab, newline and carriage return.
#[inline]
pub fn is_printable(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7E | b'\t' | b'\n' | b'\r')
}

/// Drops every byte that is not printable ASCII.
///
/// Never fails; bytes are removed rather than replaced.
pub fn sanitize(data: &[u8]) -> String {
    data.iter()
        .copied()
        .filter(|&b| is_printable(b))
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_keeps_printable_and_whitespace() {
        assert_eq!(sanitize(b"flag{a}\t\r\n~ "), "flag{a}\t\r\n~ ");
    }

    #[test]
    fn test_drops_control_and_high_bytes() {
        let data = [0x00, b'f', 0x7F, 0x80, b'l', 0xFF, 0x1B, b'a', 0x0B, b'g'];

        assert_eq!(sanitize(&data), "flag");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize(&[]), "");
    }

    proptest! {
        #[test]
        fn prop_sanitize_is_idempotent(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let once = sanitize(&data);
            let twice = sanitize(once.as_bytes());

            prop_assert_eq!(&once, &twice);
            prop_assert!(once.bytes().all(is_printable));
            prop_assert!(once.len() <= data.len());
        }
    }
}
