//! Overlap resolution
//!
//! Two passes turn overlapping candidates into a consistent plan. The first
//! drops sequences that are only an artifact of a longer sequence. The
//! second walks sequences in rank order and lets each occurrence claim its
//! bytes; occurrences that touch an already claimed byte are dropped.

use super::{find_slice, Sequence};
use log::trace;
use std::cmp::Ordering;
use std::ops::Range;

/// Rank order: higher score first, then longer key, then smaller key
pub fn rank_order(a: &Sequence, b: &Sequence) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.len().cmp(&a.len()))
        .then_with(|| a.key.cmp(&b.key))
}

/// Drop sequences contained in a kept, longer sequence with the same count
pub fn remove_contained(mut sequences: Vec<Sequence>) -> Vec<Sequence> {
    sequences.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.key.cmp(&b.key)));

    let mut kept: Vec<Sequence> = Vec::with_capacity(sequences.len());
    for seq in sequences {
        let subsumed = kept.iter().any(|longer| {
            longer.count() == seq.count() && find_slice(&longer.key, &seq.key).is_some()
        });
        if subsumed {
            trace!("dropping {:?}, contained in a longer sequence", seq.key);
        } else {
            kept.push(seq);
        }
    }
    kept
}

/// Per-position record of bytes already promised to an occurrence
#[derive(Debug, Clone)]
pub struct ClaimMap {
    claimed: Vec<bool>,
}

impl ClaimMap {
    /// Create an unclaimed map for `len` input bytes
    pub fn new(len: usize) -> Self {
        Self {
            claimed: vec![false; len],
        }
    }

    /// Claim every byte of `range` unless any of them is already claimed
    ///
    /// Panics if the range reaches past the input.
    pub fn try_claim(&mut self, range: Range<usize>) -> bool {
        let slots = &mut self.claimed[range];
        if slots.iter().any(|&claimed| claimed) {
            return false;
        }
        slots.fill(true);
        true
    }
}

/// Drop occurrences that overlap bytes claimed by a higher-ranked sequence
///
/// An occurrence ending at `end` claims `[end - len + 1, end)`; its last
/// byte stays free for the next occurrence. Returned sequences keep their
/// old scores; callers rescore them.
pub fn resolve_partial(mut sequences: Vec<Sequence>, data_len: usize) -> Vec<Sequence> {
    let mut claims = ClaimMap::new(data_len);
    sequences.sort_by(rank_order);

    for seq in &mut sequences {
        let len = seq.len();
        seq.occurrences
            .retain(|&end| claims.try_claim((end + 1 - len)..end));
        if seq.occurrences.is_empty() {
            trace!("{:?} lost every occurrence to higher-ranked sequences", seq.key);
        }
    }

    sequences.retain(|seq| !seq.occurrences.is_empty());
    sequences
}
