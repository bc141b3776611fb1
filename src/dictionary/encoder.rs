//! Dictionary encoder
//!
//! Assigns symbols to the best sequences, substitutes them into the data,
//! compacts the replacement table and serializes the result.

use super::{
    find_sequences, find_slice, index::SymbolFrequencyIndex, overlap::rank_order, replace_all,
    symbols::SymbolAllocator, Sequence, HEADER_SIZE,
};
use crate::common::payload_length_field;
use crate::package::normalize_line_breaks;
use crate::{DictionaryOptions, Result};
use log::debug;

/// One row of the replacement table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementEntry {
    /// Byte that stands in for the sequence
    pub symbol: u8,
    /// Replaced bytes, possibly containing symbols of earlier entries
    pub sequence: Vec<u8>,
}

/// Replacement table and substituted payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedDictionary {
    /// Table entries in transmission order
    pub table: Vec<ReplacementEntry>,
    /// Input with every sequence replaced by its symbol
    pub payload: Vec<u8>,
}

impl EncodedDictionary {
    /// Serialized size in bytes
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE
            + self
                .table
                .iter()
                .map(|entry| 2 + entry.sequence.len())
                .sum::<usize>()
            + self.payload.len()
    }

    /// Serialize header, table and payload
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut output)?;
        Ok(output)
    }

    /// Append header, table and payload to `output`
    pub fn write_to(&self, output: &mut Vec<u8>) -> Result<()> {
        // At most 255 symbols exist, so the count always fits
        output.push(self.table.len() as u8);
        output.extend_from_slice(&payload_length_field(self.payload.len())?);
        for entry in &self.table {
            output.push(entry.symbol);
            output.push(entry.sequence.len() as u8);
            output.extend_from_slice(&entry.sequence);
        }
        output.extend_from_slice(&self.payload);
        Ok(())
    }
}

/// Runs the dictionary pipeline over one input buffer
#[derive(Debug, Clone, Default)]
pub struct DictionaryEncoder {
    options: DictionaryOptions,
}

impl DictionaryEncoder {
    /// Create an encoder with the given options
    pub fn new(options: DictionaryOptions) -> Self {
        Self { options }
    }

    /// Encode `data` into a replacement table and payload
    pub fn encode(&self, data: &[u8]) -> EncodedDictionary {
        let data = if self.options.self_extracting {
            normalize_line_breaks(data)
        } else {
            data.to_vec()
        };

        let index = SymbolFrequencyIndex::build(&data);
        let symbols = SymbolAllocator::new(&self.options).allocate(&index);
        if symbols.is_empty() {
            debug!("no free symbols, emitting the input unchanged");
            return EncodedDictionary {
                table: Vec::new(),
                payload: data,
            };
        }

        let sequences = find_sequences(&data, &index, self.options.level);
        let assigned = assign_symbols(sequences, &symbols);

        let mut payload = data;
        for (key, symbol) in &assigned {
            payload = replace_all(&payload, key, *symbol);
        }

        let table = compact_table(assigned);
        debug!(
            "{} table entries, payload {} bytes",
            table.len(),
            payload.len()
        );

        EncodedDictionary { table, payload }
    }
}

/// Pair the top-ranked sequences with symbols, longest key first
fn assign_symbols(mut sequences: Vec<Sequence>, symbols: &[u8]) -> Vec<(Vec<u8>, u8)> {
    sequences.sort_by(rank_order);
    sequences.truncate(symbols.len());

    // Longer keys are substituted first so a shorter key cannot split them
    sequences.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.key.cmp(&b.key)));

    sequences
        .into_iter()
        .zip(symbols.iter().copied())
        .map(|(seq, symbol)| (seq.key, symbol))
        .collect()
}

/// Rewrite table sequences in terms of symbols of lexicographically smaller keys
///
/// Substitution only flows from an earlier key into later entries, so the
/// "contains symbol of" relation follows the table order and cannot cycle.
fn compact_table(mut assigned: Vec<(Vec<u8>, u8)>) -> Vec<ReplacementEntry> {
    assigned.sort_by(|a, b| a.0.cmp(&b.0));

    let mut table: Vec<ReplacementEntry> = assigned
        .iter()
        .map(|(key, symbol)| ReplacementEntry {
            symbol: *symbol,
            sequence: key.clone(),
        })
        .collect();

    for (i, (key, symbol)) in assigned.iter().enumerate() {
        for later in &mut table[i + 1..] {
            if find_slice(&later.sequence, key).is_some() {
                later.sequence = replace_all(&later.sequence, key, *symbol);
            }
        }
    }

    table
}
