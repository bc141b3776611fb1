//! Byte position index
//!
//! Maps each byte value present in the input to the ascending list of
//! positions where it occurs. This seeds sequence mining and tells the
//! symbol allocator which byte values are taken.

use std::collections::BTreeMap;

/// Positions of every byte value in the input
#[derive(Debug, Clone, Default)]
pub struct SymbolFrequencyIndex {
    positions: BTreeMap<u8, Vec<usize>>,
}

impl SymbolFrequencyIndex {
    /// Index every byte of `data`
    pub fn build(data: &[u8]) -> Self {
        let mut positions: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
        for (i, &byte) in data.iter().enumerate() {
            positions.entry(byte).or_default().push(i);
        }
        Self { positions }
    }

    /// Check if `byte` occurs in the input
    pub fn contains(&self, byte: u8) -> bool {
        self.positions.contains_key(&byte)
    }

    /// Every (byte, positions) group in ascending byte order
    pub fn groups(&self) -> impl Iterator<Item = (u8, &[usize])> + '_ {
        self.positions
            .iter()
            .map(|(&byte, positions)| (byte, positions.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_index() {
        let index = SymbolFrequencyIndex::build(b"abracadabra");
        let groups: Vec<(u8, &[usize])> = index.groups().collect();

        assert_eq!(groups[0], (b'a', &[0, 3, 5, 7, 10][..]));
        assert_eq!(groups[1], (b'b', &[1, 8][..]));
        assert_eq!(groups[4], (b'r', &[2, 9][..]));
        assert_eq!(groups.len(), 5);
        assert!(index.contains(b'c'));
        assert!(!index.contains(b'x'));
    }

    #[test]
    fn test_groups_in_byte_order() {
        let index = SymbolFrequencyIndex::build(b"zyx");
        let bytes: Vec<u8> = index.groups().map(|(byte, _)| byte).collect();
        assert_eq!(bytes, b"xyz".to_vec());
    }

    #[test]
    fn test_empty_index() {
        let index = SymbolFrequencyIndex::build(b"");
        assert_eq!(index.groups().count(), 0);
    }
}
