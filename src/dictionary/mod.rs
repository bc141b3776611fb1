//! Dictionary-substitution codec
//!
//! Repeated byte sequences are discovered in the input and replaced with
//! byte values the input never uses. The pipeline runs leaves first:
//!
//! 1. [`SymbolFrequencyIndex`] maps every byte to its positions.
//! 2. [`SequenceMiner`] grows those groups into repeated sequences.
//! 3. [`score`] estimates the net savings of each sequence.
//! 4. [`overlap`] drops subsumed sequences and arbitrates contested bytes.
//! 5. [`SymbolAllocator`] picks the unused byte values.
//! 6. [`DictionaryEncoder`] substitutes and compacts the replacement table.

mod decoder;
mod encoder;
mod index;
mod miner;
pub mod overlap;
pub mod score;
mod symbols;

pub use decoder::{decode_bytes, decode_package, DictionaryHeader};
pub use encoder::{DictionaryEncoder, EncodedDictionary, ReplacementEntry};
pub use index::SymbolFrequencyIndex;
pub use miner::SequenceMiner;
pub use symbols::SymbolAllocator;

use crate::{CompressionLevel, DictionaryOptions, Result};
use log::debug;

/// Size of the fixed header: entry count (1) + payload length (2)
pub const HEADER_SIZE: usize = 3;

/// A repeated byte sequence and where it ends in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The repeated bytes (at least 2)
    pub key: Vec<u8>,
    /// Positions of the last byte of each occurrence, ascending
    pub occurrences: Vec<usize>,
    /// Estimated net bytes saved, see [`score::score`]
    pub score: i64,
}

impl Sequence {
    /// Create an unscored sequence
    pub fn new(key: Vec<u8>, occurrences: Vec<usize>) -> Self {
        Self {
            key,
            occurrences,
            score: 0,
        }
    }

    /// Length of the key
    pub fn len(&self) -> usize {
        self.key.len()
    }

    /// Check if the key is empty
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// Number of occurrences
    pub fn count(&self) -> usize {
        self.occurrences.len()
    }

    /// Bytes the occurrence ending at `end` claims during overlap resolution
    ///
    /// The range is half-open: it starts at the occurrence's first byte and
    /// stops short of `end`.
    pub fn claimed_range(&self, end: usize) -> std::ops::Range<usize> {
        (end + 1 - self.key.len())..end
    }
}

/// Find the scored, non-overlapping sequences worth substituting
pub fn find_sequences(
    data: &[u8],
    index: &SymbolFrequencyIndex,
    level: CompressionLevel,
) -> Vec<Sequence> {
    let candidates = SequenceMiner::new(data, level).mine(index);
    debug!("mined {} candidate sequences", candidates.len());

    let scored = score::retain_positive(candidates);
    let distinct = overlap::remove_contained(scored);
    let resolved = overlap::resolve_partial(distinct, data.len());
    let sequences = score::retain_positive(resolved);
    debug!("{} sequences survive overlap resolution", sequences.len());

    sequences
}

/// Compress `data` into the dictionary file format
pub fn encode_bytes(data: &[u8], options: &DictionaryOptions) -> Result<Vec<u8>> {
    DictionaryEncoder::new(options.clone()).encode(data).to_bytes()
}

/// Position of the first occurrence of `needle` in `haystack`
pub(crate) fn find_slice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Replace every non-overlapping occurrence of `needle`, scanning left to right
pub(crate) fn replace_all(haystack: &[u8], needle: &[u8], symbol: u8) -> Vec<u8> {
    let mut output = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(pos) = find_slice(rest, needle) {
        output.extend_from_slice(&rest[..pos]);
        output.push(symbol);
        rest = &rest[pos + needle.len()..];
    }
    output.extend_from_slice(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_slice() {
        assert_eq!(find_slice(b"hello world", b"o w"), Some(4));
        assert_eq!(find_slice(b"hello", b"xyz"), None);
        assert_eq!(find_slice(b"ab", b"abc"), None);
        assert_eq!(find_slice(b"ab", b""), None);
    }

    #[test]
    fn test_replace_all() {
        assert_eq!(replace_all(b"abcabcab", b"abc", 0x01), vec![0x01, 0x01, b'a', b'b']);
        assert_eq!(replace_all(b"aaaa", b"aa", 0x02), vec![0x02, 0x02]);
        assert_eq!(replace_all(b"aaa", b"aa", 0x02), vec![0x02, b'a']);
        assert_eq!(replace_all(b"xyz", b"ab", 0x02), b"xyz".to_vec());
    }

    #[test]
    fn test_sequence_claimed_range() {
        let seq = Sequence::new(b"abc".to_vec(), vec![2, 7]);
        assert_eq!(seq.claimed_range(2), 0..2);
        assert_eq!(seq.claimed_range(7), 5..7);
        assert_eq!(seq.count(), 2);
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn test_find_sequences_positive_scores() {
        let data = b"the cat and the hat and the bat and the rat";
        let index = SymbolFrequencyIndex::build(data);
        let sequences = find_sequences(data, &index, CompressionLevel::Level5);

        assert!(!sequences.is_empty());
        for seq in &sequences {
            assert!(seq.score > 0, "{:?} kept with score {}", seq.key, seq.score);
            assert!(seq.len() >= 2);
        }
    }

    #[test]
    fn test_find_sequences_empty() {
        let index = SymbolFrequencyIndex::build(b"");
        assert!(find_sequences(b"", &index, CompressionLevel::Level5).is_empty());
    }
}
