//! Subpack - dictionary-substitution and static Huffman byte compressors
//!
//! This crate provides two independent codecs that both emit self-describing
//! buffers (header, table, packed payload):
//!
//! - **Dictionary substitution** - repeated byte sequences are replaced with
//!   byte values the input never uses. Replacement sequences may themselves
//!   refer to other symbols. Output can be wrapped into a self-extracting
//!   package with an opaque decompression stub.
//! - **Static Huffman** - frequency-derived variable-length bit codes.
//!
//! Every call is a pure function of its input and options; encoding the
//! same input twice yields identical bytes.
//!
//! # Example - Dictionary codec
//!
//! ```
//! use subpack::{dictionary_bytes, decompress_bytes, CompressionLevel, DictionaryOptions, Method};
//!
//! let data = b"the rain in spain stays mainly in the plain, the rain in spain";
//! let options = DictionaryOptions::new().with_level(CompressionLevel::Level5);
//! let compressed = dictionary_bytes(data, &options)?;
//! let restored = decompress_bytes(&compressed, Method::Dictionary, false)?;
//! assert_eq!(&restored[..], &data[..]);
//! # Ok::<(), subpack::SubpackError>(())
//! ```
//!
//! # Example - Huffman codec
//!
//! ```
//! use subpack::{huffman_bytes, decompress_bytes, Method};
//!
//! let compressed = huffman_bytes(b"Hello")?;
//! assert_eq!(compressed[0], 4); // H, e, l, o
//! assert_eq!(decompress_bytes(&compressed, Method::Huffman, false)?, b"Hello");
//! # Ok::<(), subpack::SubpackError>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod common;
pub mod dictionary;
pub mod error;
pub mod huffman;
pub mod package;

// Async modules (only available with async feature)
#[cfg(feature = "async")]
pub mod async_batch;
#[cfg(feature = "async")]
pub mod async_convenience;

// Re-export commonly used types
pub use common::{
    CompressOptions, CompressionLevel, CompressionStats, DictionaryOptions, Method, Result,
    SubpackError, MAX_PAYLOAD_LENGTH, MAX_SEQUENCE_LENGTH, MAX_SYMBOL, SFX_PREFIX, SFX_RESERVED,
};
pub use dictionary::{DictionaryEncoder, DictionaryHeader, EncodedDictionary, ReplacementEntry};
pub use huffman::{CodeTable, HuffmanEncoder, HuffmanHeader};
pub use package::PackageAssembler;

// Re-export async types when async feature is enabled
#[cfg(feature = "async")]
pub use async_batch::AsyncBatchProcessor;
#[cfg(feature = "async")]
pub use async_convenience::*;

// Convenience functions

/// Compress data with the dictionary-substitution codec
///
/// # Arguments
/// * `data` - The data to compress
/// * `options` - Level, self-extracting reservation and symbol budget
///
/// # Returns
/// The header, replacement table and substituted payload
pub fn dictionary_bytes(data: &[u8], options: &DictionaryOptions) -> Result<Vec<u8>> {
    dictionary::encode_bytes(data, options)
}

/// Compress data with the static Huffman codec
pub fn huffman_bytes(data: &[u8]) -> Result<Vec<u8>> {
    huffman::encode_bytes(data)
}

/// Compress data with the method and packaging described by `options`
///
/// With a stub (or `self_extracting` set) the dictionary output is wrapped
/// into a self-extracting package. The Huffman codec has no such packaging.
pub fn compress_bytes(data: &[u8], options: &CompressOptions) -> Result<Vec<u8>> {
    match options.method {
        Method::Dictionary => {
            let body = dictionary_bytes(data, &options.dictionary)?;
            let assembler = if options.dictionary.self_extracting {
                PackageAssembler::self_extracting(options.stub.clone().unwrap_or_default())
            } else {
                PackageAssembler::plain()
            };
            Ok(assembler.assemble(body))
        }
        Method::Huffman => {
            if options.stub.is_some() || options.dictionary.self_extracting {
                return Err(SubpackError::InvalidOptions(
                    "self-extracting packages require the dictionary method".to_string(),
                ));
            }
            huffman_bytes(data)
        }
    }
}

/// Decompress data produced by [`compress_bytes`]
///
/// # Arguments
/// * `data` - The compressed data
/// * `method` - Codec that produced it
/// * `self_extracting` - Whether the data is a self-extracting package
pub fn decompress_bytes(data: &[u8], method: Method, self_extracting: bool) -> Result<Vec<u8>> {
    match (method, self_extracting) {
        (Method::Dictionary, false) => dictionary::decode_bytes(data),
        (Method::Dictionary, true) => dictionary::decode_package(data),
        (Method::Huffman, false) => huffman::decode_bytes(data),
        (Method::Huffman, true) => Err(SubpackError::InvalidOptions(
            "self-extracting packages require the dictionary method".to_string(),
        )),
    }
}

/// Summarize a finished compression by reading back its table size
pub fn compression_stats(
    input_len: usize,
    compressed: &[u8],
    method: Method,
    self_extracting: bool,
) -> Result<CompressionStats> {
    let table_entries = match method {
        Method::Dictionary => {
            let body = if self_extracting {
                package::strip_self_extracting(compressed)?
            } else {
                compressed
            };
            DictionaryHeader::parse(body)?.entries.len()
        }
        Method::Huffman => HuffmanHeader::parse(compressed)?.entries.len(),
    };
    Ok(CompressionStats::from_sizes(
        table_entries,
        input_len,
        compressed.len(),
    ))
}
