//! Static Huffman codec
//!
//! Byte frequencies drive a min-priority queue that builds a binary tree;
//! each leaf's root-to-leaf path is its code. The output carries a table
//! of (symbol, code length) pairs and a bit stream that starts with every
//! code in table order, followed by one code per input byte.

mod bits;
mod decoder;
mod encoder;
mod tree;

pub use bits::{BitReader, BitWriter};
pub use decoder::{decode_bytes, HuffmanHeader};
pub use encoder::{CodeTable, HuffmanEncoder};
pub use tree::{Code, FrequencyTable, HuffmanNode, HuffmanTree};

use crate::Result;

/// Size of the fixed header: entry count (1) + packed length (2) + pad length (1)
pub const HEADER_SIZE: usize = 4;

/// Compress `data` into the Huffman file format
pub fn encode_bytes(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanEncoder::new().encode(data)
}

/// Render a code as a string of `0` and `1`
pub fn code_to_string(code: &[bool]) -> String {
    code.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_to_string() {
        assert_eq!(code_to_string(&[true, false, true, true]), "1011");
        assert_eq!(code_to_string(&[]), "");
    }

    #[test]
    fn test_round_trip() {
        let inputs: [&[u8]; 5] = [
            b"",
            b"a",
            b"Hello",
            b"mississippi river",
            b"\x00\x00\x00\xff\xff\x01",
        ];
        for data in inputs {
            let encoded = encode_bytes(data).unwrap();
            assert_eq!(decode_bytes(&encoded).unwrap(), data);
        }
    }
}
