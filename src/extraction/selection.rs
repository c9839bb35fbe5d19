//! Bit-plane and channel selection.

use super::ExtractionError;
use std::fmt;
use std::str::FromStr;

/// One of the four RGBA channels, valued by its index within a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    R = 0,
    G = 1,
    B = 2,
    A = 3,
}

impl Channel {
    /// Maps a channel letter (either case) to its channel.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'R' => Some(Channel::R),
            'G' => Some(Channel::G),
            'B' => Some(Channel::B),
            'A' => Some(Channel::A),
            _ => None,
        }
    }

    /// Returns the position of this channel inside a pixel tuple.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the upper-case channel letter.
    pub fn letter(self) -> char {
        match self {
            Channel::R => 'R',
            Channel::G => 'G',
            Channel::B => 'B',
            Channel::A => 'A',
        }
    }
}

/// Ordered, duplicate-free set of channels to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSelection {
    channels: Vec<Channel>,
}

impl ChannelSelection {
    /// Builds a selection from channel letters.
    ///
    /// Letters are case-insensitive. Unknown letters and repeats are
    /// skipped; the first occurrence fixes the order. An empty result is
    /// rejected.
    pub fn parse(letters: &str) -> Result<Self, ExtractionError> {
        let mut channels = Vec::with_capacity(4);
        for channel in letters.chars().filter_map(Channel::from_letter) {
            if !channels.contains(&channel) {
                channels.push(channel);
            }
        }

        if channels.is_empty() {
            return Err(ExtractionError::InvalidChannelSelection(letters.to_string()));
        }
        Ok(Self { channels })
    }

    /// Returns the selected channels in read order.
    #[inline]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Returns the number of selected channels.
    #[inline]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Always false; an empty selection cannot be built.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl Default for ChannelSelection {
    fn default() -> Self {
        Self {
            channels: vec![Channel::R, Channel::G, Channel::B],
        }
    }
}

impl FromStr for ChannelSelection {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ChannelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.channels
            .iter()
            .try_for_each(|channel| write!(f, "{}", channel.letter()))
    }
}

/// Number of low-order bits read from each selected channel (1 to 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BitDepth(u8);

impl BitDepth {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    /// Creates a bit depth, rejecting values outside 1..=4.
    pub fn new(bits: u8) -> Result<Self, ExtractionError> {
        if (Self::MIN..=Self::MAX).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(ExtractionError::InvalidBitDepth(bits))
        }
    }

    /// Returns the number of bits.
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Returns the mask selecting the low `bits` of a channel value.
    #[inline]
    pub fn mask(self) -> u8 {
        (1u8 << self.0) - 1
    }
}

impl Default for BitDepth {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = ExtractionError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_first_occurrence_order() {
        let selection = ChannelSelection::parse("bgRb").unwrap();

        assert_eq!(selection.channels(), &[Channel::B, Channel::G, Channel::R]);
        assert_eq!(selection.to_string(), "BGR");
    }

    #[test]
    fn test_parse_drops_unknown_letters() {
        let selection = ChannelSelection::parse("xRyA!").unwrap();

        assert_eq!(selection.channels(), &[Channel::R, Channel::A]);
    }

    #[test]
    fn test_empty_selection_rejected() {
        assert!(matches!(
            ChannelSelection::parse("xyz"),
            Err(ExtractionError::InvalidChannelSelection(_))
        ));
        assert!(matches!(
            ChannelSelection::parse(""),
            Err(ExtractionError::InvalidChannelSelection(_))
        ));
    }

    #[test]
    fn test_channel_indices() {
        assert_eq!(Channel::R.index(), 0);
        assert_eq!(Channel::G.index(), 1);
        assert_eq!(Channel::B.index(), 2);
        assert_eq!(Channel::A.index(), 3);
    }

    #[test]
    fn test_bit_depth_bounds() {
        assert!(BitDepth::new(0).is_err());
        assert!(BitDepth::new(5).is_err());
        assert_eq!(BitDepth::new(1).unwrap().mask(), 0b1);
        assert_eq!(BitDepth::new(4).unwrap().mask(), 0b1111);
    }
}
