//! Dictionary decoder
//!
//! Parses the replacement table, expands every entry into original bytes
//! and then expands the payload in a single pass.

use super::{encoder::ReplacementEntry, HEADER_SIZE};
use crate::common::read_u16_le;
use crate::package::strip_self_extracting;
use crate::{Result, SubpackError, MAX_SEQUENCE_LENGTH};

/// Parsed dictionary header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryHeader {
    /// Replacement table in stored order
    pub entries: Vec<ReplacementEntry>,
    /// Length of the substituted payload
    pub payload_length: usize,
    /// Offset of the payload from the start of the buffer
    pub header_length: usize,
}

impl DictionaryHeader {
    /// Parse the header and table at the start of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        let entry_count = *data.first().ok_or(SubpackError::UnexpectedEof)? as usize;
        let payload_length = read_u16_le(data, 1)? as usize;

        let mut pos = HEADER_SIZE;
        let mut entries = Vec::with_capacity(entry_count);
        for _ in 0..entry_count {
            let fields = data.get(pos..pos + 2).ok_or(SubpackError::UnexpectedEof)?;
            let (symbol, len) = (fields[0], fields[1] as usize);
            pos += 2;

            if len == 0 {
                return Err(SubpackError::InvalidData(format!(
                    "empty sequence for symbol 0x{symbol:02X}"
                )));
            }
            let sequence = data
                .get(pos..pos + len)
                .ok_or(SubpackError::UnexpectedEof)?
                .to_vec();
            pos += len;

            entries.push(ReplacementEntry { symbol, sequence });
        }

        Ok(Self {
            entries,
            payload_length,
            header_length: pos,
        })
    }

    /// Payload bytes following this header in `data`
    pub fn payload<'a>(&self, data: &'a [u8]) -> Result<&'a [u8]> {
        data.get(self.header_length..self.header_length + self.payload_length)
            .ok_or(SubpackError::UnexpectedEof)
    }
}

/// Expansion progress of a table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    InProgress,
    Done,
}

/// Fully expanded replacement table indexed by symbol
struct ExpansionTable {
    stored: Vec<Option<Vec<u8>>>,
    expanded: Vec<Option<Vec<u8>>>,
    visits: Vec<Visit>,
}

impl ExpansionTable {
    fn new(entries: &[ReplacementEntry]) -> Result<Self> {
        let mut stored: Vec<Option<Vec<u8>>> = vec![None; 256];
        for entry in entries {
            let slot = &mut stored[entry.symbol as usize];
            if slot.is_some() {
                return Err(SubpackError::InvalidData(format!(
                    "duplicate symbol 0x{:02X}",
                    entry.symbol
                )));
            }
            *slot = Some(entry.sequence.clone());
        }

        let mut table = Self {
            stored,
            expanded: vec![None; 256],
            visits: vec![Visit::Pending; 256],
        };
        for entry in entries {
            table.expand(entry.symbol)?;
        }
        Ok(table)
    }

    /// Expand `symbol` after every symbol its sequence refers to
    fn expand(&mut self, symbol: u8) -> Result<()> {
        match self.visits[symbol as usize] {
            Visit::Done => return Ok(()),
            Visit::InProgress => return Err(SubpackError::CyclicTable),
            Visit::Pending => {}
        }
        self.visits[symbol as usize] = Visit::InProgress;

        let sequence = self.stored[symbol as usize].clone().unwrap_or_default();
        let mut expanded = Vec::with_capacity(sequence.len());
        for byte in sequence {
            if self.stored[byte as usize].is_some() {
                self.expand(byte)?;
                if let Some(inner) = &self.expanded[byte as usize] {
                    expanded.extend_from_slice(inner);
                }
            } else {
                expanded.push(byte);
            }
        }

        // The encoder never stores keys longer than the length field allows
        if expanded.len() > MAX_SEQUENCE_LENGTH {
            return Err(SubpackError::InvalidData(format!(
                "symbol 0x{symbol:02X} expands to {} bytes",
                expanded.len()
            )));
        }

        self.expanded[symbol as usize] = Some(expanded);
        self.visits[symbol as usize] = Visit::Done;
        Ok(())
    }

    fn get(&self, byte: u8) -> Option<&[u8]> {
        self.expanded[byte as usize].as_deref()
    }
}

/// Decode a buffer in the dictionary file format
///
/// Bytes after the payload are ignored.
pub fn decode_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let header = DictionaryHeader::parse(data)?;
    let payload = header.payload(data)?;
    let table = ExpansionTable::new(&header.entries)?;

    let mut output = Vec::with_capacity(payload.len() * 2);
    for &byte in payload {
        match table.get(byte) {
            Some(sequence) => output.extend_from_slice(sequence),
            None => output.push(byte),
        }
    }
    Ok(output)
}

/// Decode a self-extracting package, skipping the prefix and the stub
pub fn decode_package(data: &[u8]) -> Result<Vec<u8>> {
    decode_bytes(strip_self_extracting(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_nested_table() {
        // 0x02 = "abc", 0x01 = 0x02 0x02 = "abcabc"
        let data = [
            0x02, 0x03, 0x00, // header
            0x02, 0x03, b'a', b'b', b'c', // entry
            0x01, 0x02, 0x02, 0x02, // entry
            0x01, b'-', 0x02,
        ];
        assert_eq!(decode_bytes(&data).unwrap(), b"abcabc-abc".to_vec());
    }

    #[test]
    fn test_decode_empty_table() {
        let data = [0x00, 0x03, 0x00, b'x', b'y', b'z'];
        assert_eq!(decode_bytes(&data).unwrap(), b"xyz".to_vec());
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let data = [0x00, 0x01, 0x00, b'x', b'\n', b's', b't', b'u', b'b'];
        assert_eq!(decode_bytes(&data).unwrap(), b"x".to_vec());
    }

    #[test]
    fn test_cyclic_table_rejected() {
        let data = [
            0x02, 0x00, 0x00, //
            0x01, 0x02, b'a', 0x02, //
            0x02, 0x02, b'b', 0x01,
        ];
        assert!(matches!(
            decode_bytes(&data),
            Err(SubpackError::CyclicTable)
        ));
    }

    #[test]
    fn test_self_reference_rejected() {
        let data = [0x01, 0x00, 0x00, 0x01, 0x02, 0x01, 0x01];
        assert!(matches!(
            decode_bytes(&data),
            Err(SubpackError::CyclicTable)
        ));
    }

    #[test]
    fn test_truncated_input() {
        assert!(matches!(decode_bytes(&[]), Err(SubpackError::UnexpectedEof)));
        assert!(matches!(
            decode_bytes(&[0x01, 0x00, 0x00, 0x01, 0x05, b'a']),
            Err(SubpackError::UnexpectedEof)
        ));
        assert!(matches!(
            decode_bytes(&[0x00, 0x05, 0x00, b'a']),
            Err(SubpackError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let data = [0x02, 0x00, 0x00, 0x01, 0x01, b'a', 0x01, 0x01, b'b'];
        assert!(matches!(
            decode_bytes(&data),
            Err(SubpackError::InvalidData(_))
        ));
    }

    #[test]
    fn test_header_parse() {
        let data = [0x01, 0x02, 0x00, 0x07, 0x02, b'h', b'i', 0x07, 0x07];
        let header = DictionaryHeader::parse(&data).unwrap();

        assert_eq!(header.entries.len(), 1);
        assert_eq!(header.entries[0].symbol, 0x07);
        assert_eq!(header.payload_length, 2);
        assert_eq!(header.header_length, 7);
        assert_eq!(header.payload(&data).unwrap(), &[0x07, 0x07]);
    }
}
