//! Common types and constants for the subpack codecs
//!
//! This module defines the configuration types, constants, and the error type
//! shared by the dictionary-substitution codec and the Huffman codec.

use thiserror::Error;

/// Compression level for the dictionary codec
///
/// Higher levels lower the repeat threshold a sequence must pass before it is
/// considered, trading header overhead for more substitution candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum CompressionLevel {
    /// Sequences must repeat more than 5 times
    Level1 = 1,
    /// Sequences must repeat more than 4 times
    Level2 = 2,
    /// Sequences must repeat more than 3 times
    Level3 = 3,
    /// Sequences must repeat more than 2 times
    Level4 = 4,
    /// Sequences must repeat more than once
    #[default]
    Level5 = 5,
}

impl CompressionLevel {
    /// All levels, weakest first
    pub const ALL: [CompressionLevel; 5] = [
        CompressionLevel::Level1,
        CompressionLevel::Level2,
        CompressionLevel::Level3,
        CompressionLevel::Level4,
        CompressionLevel::Level5,
    ];

    /// Create a CompressionLevel from a raw value
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            1 => Ok(CompressionLevel::Level1),
            2 => Ok(CompressionLevel::Level2),
            3 => Ok(CompressionLevel::Level3),
            4 => Ok(CompressionLevel::Level4),
            5 => Ok(CompressionLevel::Level5),
            _ => Err(SubpackError::InvalidLevel(value)),
        }
    }

    /// Repeat count a sequence group has to exceed to stay a candidate
    pub fn min_repeats(&self) -> usize {
        6 - *self as usize
    }
}

/// Codec selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Dictionary-substitution codec
    #[default]
    Dictionary = 0,
    /// Static Huffman codec
    Huffman = 1,
}

impl Method {
    /// Create a Method from a raw value
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Method::Dictionary),
            1 => Ok(Method::Huffman),
            _ => Err(SubpackError::InvalidMethod(value)),
        }
    }

    /// Create a Method from its selector letter (`d` or `h`)
    pub fn from_char(value: char) -> Result<Self> {
        match value {
            'd' => Ok(Method::Dictionary),
            'h' => Ok(Method::Huffman),
            _ => Err(SubpackError::InvalidMethod(value as u8)),
        }
    }
}

/// Options for the dictionary codec
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryOptions {
    /// Compression level
    pub level: CompressionLevel,
    /// Reserve `\n`/`\r` and normalize them out of the input
    pub self_extracting: bool,
    /// Upper bound on the number of replacement symbols
    pub max_symbols: Option<usize>,
}

impl DictionaryOptions {
    /// Create options with the default level and no symbol cap
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression level
    pub fn with_level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable self-extracting symbol reservation
    pub fn with_self_extracting(mut self, self_extracting: bool) -> Self {
        self.self_extracting = self_extracting;
        self
    }

    /// Cap the number of replacement symbols
    pub fn with_max_symbols(mut self, max_symbols: usize) -> Self {
        self.max_symbols = Some(max_symbols);
        self
    }
}

/// Top-level options consumed by [`crate::compress_bytes`]
#[derive(Debug, Clone, Default)]
pub struct CompressOptions {
    /// Which codec to run
    pub method: Method,
    /// Dictionary codec settings (ignored by the Huffman codec)
    pub dictionary: DictionaryOptions,
    /// Decompression stub appended to a self-extracting package
    pub stub: Option<Vec<u8>>,
}

impl CompressOptions {
    /// Options for the given method with default settings
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Set the dictionary options
    pub fn with_dictionary(mut self, dictionary: DictionaryOptions) -> Self {
        self.dictionary = dictionary;
        self
    }

    /// Produce a self-extracting package with the given stub
    pub fn with_stub(mut self, stub: Vec<u8>) -> Self {
        self.dictionary.self_extracting = true;
        self.stub = Some(stub);
        self
    }
}

/// Error type for subpack operations
#[derive(Debug, Error)]
pub enum SubpackError {
    /// Compression level outside 1..=5
    #[error("Invalid compression level: {0} (expected 1 to 5)")]
    InvalidLevel(u8),

    /// Unknown codec selector
    #[error("Invalid compression method: {0}")]
    InvalidMethod(u8),

    /// Payload does not fit the 2-byte length field
    #[error("Payload too large: {0} bytes (maximum {max})", max = MAX_PAYLOAD_LENGTH)]
    PayloadTooLarge(usize),

    /// Unexpected end of input
    #[error("Unexpected end of input")]
    UnexpectedEof,

    /// Invalid data format or corruption
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Replacement table references itself
    #[error("Replacement table contains a cycle")]
    CyclicTable,

    /// Option combination that cannot be honored
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Background task failure
    #[cfg(feature = "async")]
    #[error("Task failed: {0}")]
    TaskFailed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for subpack operations
pub type Result<T> = std::result::Result<T, SubpackError>;

/// Longest sequence the 1-byte key length field can describe
pub const MAX_SEQUENCE_LENGTH: usize = 0xFF;

/// Largest payload the 2-byte length field can describe
pub const MAX_PAYLOAD_LENGTH: usize = 0xFFFF;

/// Highest byte value usable as a replacement symbol
pub const MAX_SYMBOL: u8 = 0xFE;

/// Prefix written before a self-extracting package
pub const SFX_PREFIX: &[u8; 2] = b"//";

/// Bytes reserved in self-extracting mode
pub const SFX_RESERVED: [u8; 2] = [b'\n', b'\r'];

/// Statistics for a compression operation
#[derive(Debug, Default, Clone)]
pub struct CompressionStats {
    /// Number of table entries written
    pub table_entries: usize,
    /// Input bytes
    pub input_bytes: u64,
    /// Output bytes
    pub output_bytes: u64,
    /// Output size as a fraction of the input size
    pub compression_ratio: f64,
}

impl CompressionStats {
    /// Build stats from input and output sizes
    pub fn from_sizes(table_entries: usize, input_bytes: usize, output_bytes: usize) -> Self {
        let compression_ratio = if input_bytes == 0 {
            0.0
        } else {
            output_bytes as f64 / input_bytes as f64
        };
        Self {
            table_entries,
            input_bytes: input_bytes as u64,
            output_bytes: output_bytes as u64,
            compression_ratio,
        }
    }
}

/// Read a little-endian u16 length field at `pos`
pub(crate) fn read_u16_le(data: &[u8], pos: usize) -> Result<u16> {
    let bytes = data.get(pos..pos + 2).ok_or(SubpackError::UnexpectedEof)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Convert a payload length into its 2-byte field
pub(crate) fn payload_length_field(len: usize) -> Result<[u8; 2]> {
    let len = u16::try_from(len).map_err(|_| SubpackError::PayloadTooLarge(len))?;
    Ok(len.to_le_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_level() {
        assert_eq!(
            CompressionLevel::from_u8(1).unwrap(),
            CompressionLevel::Level1
        );
        assert_eq!(
            CompressionLevel::from_u8(5).unwrap(),
            CompressionLevel::Level5
        );
        assert!(CompressionLevel::from_u8(0).is_err());
        assert!(CompressionLevel::from_u8(6).is_err());

        assert_eq!(CompressionLevel::Level1.min_repeats(), 5);
        assert_eq!(CompressionLevel::Level5.min_repeats(), 1);
        assert_eq!(CompressionLevel::default(), CompressionLevel::Level5);
    }

    #[test]
    fn test_method() {
        assert_eq!(Method::from_u8(0).unwrap(), Method::Dictionary);
        assert_eq!(Method::from_u8(1).unwrap(), Method::Huffman);
        assert!(Method::from_u8(2).is_err());

        assert_eq!(Method::from_char('d').unwrap(), Method::Dictionary);
        assert_eq!(Method::from_char('h').unwrap(), Method::Huffman);
        assert!(Method::from_char('x').is_err());
    }

    #[test]
    fn test_options_builder() {
        let options = DictionaryOptions::new()
            .with_level(CompressionLevel::Level2)
            .with_self_extracting(true)
            .with_max_symbols(10);
        assert_eq!(options.level, CompressionLevel::Level2);
        assert!(options.self_extracting);
        assert_eq!(options.max_symbols, Some(10));

        let compress = CompressOptions::new(Method::Dictionary).with_stub(b"stub".to_vec());
        assert!(compress.dictionary.self_extracting);
        assert_eq!(compress.stub.as_deref(), Some(&b"stub"[..]));
    }

    #[test]
    fn test_length_fields() {
        assert_eq!(payload_length_field(0x1234).unwrap(), [0x34, 0x12]);
        assert!(matches!(
            payload_length_field(MAX_PAYLOAD_LENGTH + 1),
            Err(SubpackError::PayloadTooLarge(_))
        ));
        assert_eq!(read_u16_le(&[0x00, 0x34, 0x12], 1).unwrap(), 0x1234);
        assert!(read_u16_le(&[0x01], 0).is_err());
    }

    #[test]
    fn test_stats() {
        let stats = CompressionStats::from_sizes(3, 100, 50);
        assert_eq!(stats.table_entries, 3);
        assert!((stats.compression_ratio - 0.5).abs() < f64::EPSILON);
        assert_eq!(CompressionStats::from_sizes(0, 0, 3).compression_ratio, 0.0);
    }
}
