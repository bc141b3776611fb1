//! Repeated sequence discovery
//!
//! Starting from single-byte groups, each group is extended one byte at a
//! time by partitioning its positions on the byte that follows. Sub-groups
//! that still repeat often enough are extended further; a group is emitted
//! as a candidate when at least one of its occurrences does not continue
//! into a longer candidate.

use super::{index::SymbolFrequencyIndex, Sequence};
use crate::{CompressionLevel, MAX_SEQUENCE_LENGTH};
use log::trace;
use std::collections::BTreeMap;

/// Grows byte groups into repeated sequences
#[derive(Debug, Clone)]
pub struct SequenceMiner<'a> {
    data: &'a [u8],
    min_repeats: usize,
}

impl<'a> SequenceMiner<'a> {
    /// Create a miner for `data` using the threshold of `level`
    pub fn new(data: &'a [u8], level: CompressionLevel) -> Self {
        Self {
            data,
            min_repeats: level.min_repeats(),
        }
    }

    /// Mine candidate sequences, sorted by key
    pub fn mine(&self, index: &SymbolFrequencyIndex) -> Vec<Sequence> {
        let mut pending: Vec<(Vec<u8>, Vec<usize>)> = index
            .groups()
            .filter(|(_, positions)| positions.len() > self.min_repeats)
            .map(|(byte, positions)| (vec![byte], positions.to_vec()))
            .collect();
        let mut found = Vec::new();

        while let Some((key, positions)) = pending.pop() {
            let mut extended = 0;

            if key.len() < MAX_SEQUENCE_LENGTH {
                for (byte, next_positions) in self.partition_next(&positions) {
                    if next_positions.len() > self.min_repeats {
                        extended += next_positions.len();
                        let mut next_key = Vec::with_capacity(key.len() + 1);
                        next_key.extend_from_slice(&key);
                        next_key.push(byte);
                        pending.push((next_key, next_positions));
                    }
                }
            }

            // A sequence that always continues into a longer candidate adds nothing
            if key.len() >= 2 && positions.len() >= 2 && positions.len() - extended >= 1 {
                trace!("candidate {:?} x{}", key, positions.len());
                found.push(Sequence::new(key, positions));
            }
        }

        found.sort_by(|a, b| a.key.cmp(&b.key));
        found
    }

    /// Group the positions following each of `positions` by their byte
    fn partition_next(&self, positions: &[usize]) -> BTreeMap<u8, Vec<usize>> {
        let mut next: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
        for &pos in positions {
            let next_pos = pos + 1;
            if let Some(&byte) = self.data.get(next_pos) {
                next.entry(byte).or_default().push(next_pos);
            }
        }
        next
    }
}
