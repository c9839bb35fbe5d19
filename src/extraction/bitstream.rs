//! Packed byte stream produced by LSB extraction.

/// Bytes recovered from the selected bit planes.
///
/// This is the output of the extraction stage and the input of every
/// decoder. It is never modified after extraction.
#[derive(Clone, PartialEq, Eq)]
pub struct ByteStream {
    /// Packed byte data.
    data: Vec<u8>,
    /// Trailing bits that did not fill a byte and were dropped (0..8).
    discarded_bits: u8,
}

impl ByteStream {
    /// Creates a stream from packed bytes.
    pub fn from_bytes(data: Vec<u8>, discarded_bits: u8) -> Self {
        Self {
            data,
            discarded_bits,
        }
    }

    /// Returns the packed bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the stream, returning the packed bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Returns the number of bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of trailing bits that were dropped.
    #[inline]
    pub fn discarded_bits(&self) -> u8 {
        self.discarded_bits
    }

    /// Returns the number of bits read from the image (kept and dropped).
    pub fn extracted_bits(&self) -> usize {
        self.data.len() * 8 + self.discarded_bits as usize
    }
}

impl AsRef<[u8]> for ByteStream {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl std::fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let head: String = self
            .data
            .iter()
            .take(16)
            .map(|b| format!("{:02x}", b))
            .collect();
        f.debug_struct("ByteStream")
            .field("bytes", &self.data.len())
            .field("discarded_bits", &self.discarded_bits)
            .field("head", &head)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_bits_include_dropped() {
        let stream = ByteStream::from_bytes(vec![0xAA; 3], 6);

        assert_eq!(stream.len(), 3);
        assert_eq!(stream.extracted_bits(), 30);
    }

    #[test]
    fn test_debug_shows_hex_head() {
        let stream = ByteStream::from_bytes(b"flag".to_vec(), 0);

        let rendered = format!("{:?}", stream);
        assert!(rendered.contains("666c6167"));
    }
}
