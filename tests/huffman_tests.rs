//! Tests for the static Huffman codec

use subpack::huffman::{code_to_string, HuffmanTree};
use subpack::{decompress_bytes, huffman_bytes, CodeTable, HuffmanHeader, Method, SubpackError};

#[test]
fn test_hello() -> Result<(), Box<dyn std::error::Error>> {
    let compressed = huffman_bytes(b"Hello")?;
    let header = HuffmanHeader::parse(&compressed)?;

    assert_eq!(compressed[0], 4);
    let symbols: Vec<u8> = header.entries.iter().map(|&(symbol, _)| symbol).collect();
    assert_eq!(symbols, b"Heol".to_vec());
    assert_eq!(decompress_bytes(&compressed, Method::Huffman, false)?, b"Hello");

    Ok(())
}

#[test]
fn test_frequent_bytes_get_shorter_codes() {
    let data = b"aaaaaaaaaaaaaaaabbbbbbbbccccdde";
    let table = CodeTable::from_data(data);

    let length = |symbol: u8| table.code(symbol).map(<[bool]>::len).unwrap_or(0);
    assert_eq!(length(b'a'), 1);
    assert!(length(b'a') <= length(b'b'));
    assert!(length(b'b') <= length(b'c'));
    assert!(length(b'c') <= length(b'd'));
    assert!(length(b'd') <= length(b'e'));
}

#[test]
fn test_codes_follow_tree_paths() {
    let tree = HuffmanTree::from_data(b"abracadabra").unwrap();
    let codes: Vec<(u8, String)> = tree
        .codes()
        .into_iter()
        .map(|(symbol, code)| (symbol, code_to_string(&code)))
        .collect();

    // Every leaf sits at the end of a distinct path
    assert_eq!(codes.len(), 5);
    for (i, (_, a)) in codes.iter().enumerate() {
        for (_, b) in &codes[i + 1..] {
            assert!(!a.starts_with(b.as_str()) && !b.starts_with(a.as_str()));
        }
    }
    assert_eq!(tree.root().frequency(), 11);
}

#[test]
fn test_empty_input() -> Result<(), Box<dyn std::error::Error>> {
    let compressed = huffman_bytes(b"")?;

    assert_eq!(hex::encode(&compressed), "00000000");
    assert!(decompress_bytes(&compressed, Method::Huffman, false)?.is_empty());

    Ok(())
}

#[test]
fn test_single_byte() -> Result<(), Box<dyn std::error::Error>> {
    for data in [&b"x"[..], &b"xxxxxxxxxxxxxxxxxxxx"[..]] {
        let compressed = huffman_bytes(data)?;
        assert_eq!(compressed[0], 1);
        assert_eq!(decompress_bytes(&compressed, Method::Huffman, false)?, data);
    }

    Ok(())
}

#[test]
fn test_all_byte_values() -> Result<(), Box<dyn std::error::Error>> {
    let data: Vec<u8> = (0..4096u32).map(|i| (i * 7 % 256) as u8).collect();
    let compressed = huffman_bytes(&data)?;

    assert_eq!(compressed[0], 0);
    assert_eq!(HuffmanHeader::parse(&compressed)?.entries.len(), 256);
    assert_eq!(decompress_bytes(&compressed, Method::Huffman, false)?, data);

    Ok(())
}

#[test]
fn test_skewed_text_shrinks() -> Result<(), Box<dyn std::error::Error>> {
    let data = "the quick brown fox jumps over the lazy dog ".repeat(50);
    let compressed = huffman_bytes(data.as_bytes())?;

    assert!(compressed.len() < data.len());
    assert_eq!(
        decompress_bytes(&compressed, Method::Huffman, false)?,
        data.as_bytes()
    );

    Ok(())
}

#[test]
fn test_payload_too_large() {
    // Uniform bytes cost 8 bits each, overflowing the 2-byte length field
    let data: Vec<u8> = (0..600_000u32).map(|i| (i % 256) as u8).collect();
    assert!(matches!(
        huffman_bytes(&data),
        Err(SubpackError::PayloadTooLarge(_))
    ));
}

#[test]
fn test_invalid_pad_rejected() {
    let mut compressed = huffman_bytes(b"Hello").unwrap();
    compressed[3] = 9;
    assert!(matches!(
        decompress_bytes(&compressed, Method::Huffman, false),
        Err(SubpackError::InvalidData(_))
    ));
}
