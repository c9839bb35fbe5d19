//! ROT13 letter substitution.

/// Rotates ASCII letters by 13 places; everything else is unchanged.
pub fn rotate(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'a'..='z' => (((c as u8 - b'a') + 13) % 26 + b'a') as char,
            'A'..='Z' => (((c as u8 - b'A') + 13) % 26 + b'A') as char,
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotates_letters_only() {
        assert_eq!(rotate("flag{rot_me} 42!"), "synt{ebg_zr} 42!");
        assert_eq!(rotate("HTB{Abc}"), "UGO{Nop}");
    }

    #[test]
    fn test_is_an_involution() {
        let text = "The Quick brown fox; 0123 ~";
        assert_eq!(rotate(&rotate(text)), text);
    }
}
