//! Huffman encoder and code table

use super::bits::BitWriter;
use super::tree::{Code, HuffmanTree};
use super::HEADER_SIZE;
use crate::common::payload_length_field;
use crate::Result;
use log::debug;

/// Codes for every byte present in the input, in transmission order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    entries: Vec<(u8, Code)>,
}

impl CodeTable {
    /// Derive the code table of `tree`
    ///
    /// A lone leaf has an empty path. It is given the code `0` instead so
    /// every input byte still occupies a bit and the byte count survives.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut entries = tree.codes();
        if let [(_, code)] = entries.as_mut_slice() {
            if code.is_empty() {
                code.push(false);
            }
        }
        Self { entries }
    }

    /// Build the table for `data` (empty for empty input)
    pub fn from_data(data: &[u8]) -> Self {
        HuffmanTree::from_data(data)
            .map(|tree| Self::from_tree(&tree))
            .unwrap_or_default()
    }

    /// Entries in transmission order
    pub fn entries(&self) -> &[(u8, Code)] {
        &self.entries
    }

    /// Code of `symbol`
    pub fn code(&self, symbol: u8) -> Option<&[bool]> {
        self.entries
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, code)| code.as_slice())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Codes indexed by byte value
    fn lookup(&self) -> Vec<Option<&[bool]>> {
        let mut lookup = vec![None; 256];
        for (symbol, code) in &self.entries {
            lookup[*symbol as usize] = Some(code.as_slice());
        }
        lookup
    }
}

/// Static Huffman encoder
#[derive(Debug, Clone, Default)]
pub struct HuffmanEncoder;

impl HuffmanEncoder {
    /// Create an encoder
    pub fn new() -> Self {
        Self
    }

    /// Encode `data` into the Huffman file format
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let table = CodeTable::from_data(data);
        let lookup = table.lookup();

        let mut writer = BitWriter::new();
        // Priming preamble: every code in table order
        for (_, code) in table.entries() {
            writer.push_bits(code);
        }
        for &byte in data {
            if let Some(code) = lookup[byte as usize] {
                writer.push_bits(code);
            }
        }
        let bit_len = writer.bit_len();
        let (packed, pad) = writer.finish();
        debug!(
            "{} codes, {} bits packed into {} bytes",
            table.len(),
            bit_len,
            packed.len()
        );

        let mut output = Vec::with_capacity(HEADER_SIZE + table.len() * 2 + packed.len());
        // 256 entries wrap to 0; a non-empty payload tells them apart
        output.push(table.len() as u8);
        output.extend_from_slice(&payload_length_field(packed.len())?);
        output.push(pad);
        for (symbol, code) in table.entries() {
            output.push(*symbol);
            output.push(code.len() as u8);
        }
        output.extend_from_slice(&packed);
        Ok(output)
    }
}
