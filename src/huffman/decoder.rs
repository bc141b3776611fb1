//! Huffman decoder
//!
//! The header only carries (symbol, code length) pairs. The codes
//! themselves are the priming preamble at the start of the bit stream:
//! reading each entry's length in bits, in table order, yields the exact
//! tree-derived code. The rest of the stream is decoded against those.

use super::bits::BitReader;
use super::tree::Code;
use super::HEADER_SIZE;
use crate::common::read_u16_le;
use crate::{Result, SubpackError};

/// Parsed Huffman header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanHeader {
    /// (symbol, code length) pairs in table order
    pub entries: Vec<(u8, u8)>,
    /// Length of the packed bit stream in bytes
    pub packed_length: usize,
    /// Zero bits padding the last packed byte
    pub pad_length: u8,
    /// Offset of the packed stream from the start of the buffer
    pub header_length: usize,
}

impl HuffmanHeader {
    /// Parse the header and table at the start of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        let count = *data.first().ok_or(SubpackError::UnexpectedEof)? as usize;
        let packed_length = read_u16_le(data, 1)? as usize;
        let pad_length = *data.get(3).ok_or(SubpackError::UnexpectedEof)?;

        // A full 256-symbol table stores its count as 0
        let entry_count = if count == 0 && packed_length > 0 {
            256
        } else {
            count
        };

        let table = data
            .get(HEADER_SIZE..HEADER_SIZE + entry_count * 2)
            .ok_or(SubpackError::UnexpectedEof)?;
        let entries = table
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();

        Ok(Self {
            entries,
            packed_length,
            pad_length,
            header_length: HEADER_SIZE + entry_count * 2,
        })
    }

    /// Packed bytes following this header in `data`
    pub fn packed<'a>(&self, data: &'a [u8]) -> Result<&'a [u8]> {
        data.get(self.header_length..self.header_length + self.packed_length)
            .ok_or(SubpackError::UnexpectedEof)
    }
}

/// Binary trie over codes
#[derive(Debug, Default)]
struct DecodeTrie {
    nodes: Vec<TrieNode>,
}

#[derive(Debug, Default, Clone)]
struct TrieNode {
    children: [Option<usize>; 2],
    symbol: Option<u8>,
}

impl DecodeTrie {
    fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    /// Insert `code`, rejecting codes that break the prefix property
    fn insert(&mut self, code: &[bool], symbol: u8) -> Result<()> {
        let prefix_error = || {
            SubpackError::InvalidData(format!(
                "code for 0x{symbol:02X} conflicts with another code"
            ))
        };

        let mut node = 0;
        for &bit in code {
            if self.nodes[node].symbol.is_some() {
                return Err(prefix_error());
            }
            node = match self.nodes[node].children[bit as usize] {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children[bit as usize] = Some(child);
                    child
                }
            };
        }

        let leaf = &mut self.nodes[node];
        if node == 0 || leaf.symbol.is_some() || leaf.children.iter().any(Option::is_some) {
            return Err(prefix_error());
        }
        leaf.symbol = Some(symbol);
        Ok(())
    }
}

/// Decode a buffer in the Huffman file format
pub fn decode_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let header = HuffmanHeader::parse(data)?;
    let mut reader = BitReader::new(header.packed(data)?, header.pad_length)?;

    let mut trie = DecodeTrie::new();
    for &(symbol, code_length) in &header.entries {
        if code_length == 0 {
            return Err(SubpackError::InvalidData(format!(
                "zero-length code for 0x{symbol:02X}"
            )));
        }
        let code: Code = reader.read_bits(code_length as usize)?;
        trie.insert(&code, symbol)?;
    }

    let mut output = Vec::with_capacity(reader.remaining() / 2);
    let mut node = 0;
    while let Some(bit) = reader.read_bit() {
        node = trie.nodes[node].children[bit as usize].ok_or_else(|| {
            SubpackError::InvalidData("bit stream does not match any code".to_string())
        })?;
        if let Some(symbol) = trie.nodes[node].symbol {
            output.push(symbol);
            node = 0;
        }
    }

    if node != 0 {
        return Err(SubpackError::InvalidData(
            "bit stream ends inside a code".to_string(),
        ));
    }
    Ok(output)
}
