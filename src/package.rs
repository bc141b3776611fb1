//! Package assembly
//!
//! A plain package is the encoded body as is. A self-extracting package is
//! `//`, the body, a newline and then the decompression stub verbatim. The
//! stub is opaque here; whoever supplies it owns its format.

use crate::{Result, SubpackError, SFX_PREFIX, SFX_RESERVED};

/// Replace `\n` and `\r` with spaces so they can be reserved as symbols
pub fn normalize_line_breaks(data: &[u8]) -> Vec<u8> {
    data.iter()
        .map(|&byte| if SFX_RESERVED.contains(&byte) { b' ' } else { byte })
        .collect()
}

/// Wraps an encoded body into its final byte layout
#[derive(Debug, Clone, Default)]
pub struct PackageAssembler {
    stub: Option<Vec<u8>>,
}

impl PackageAssembler {
    /// Assembler that emits the body unchanged
    pub fn plain() -> Self {
        Self { stub: None }
    }

    /// Assembler that emits a self-extracting package with `stub`
    pub fn self_extracting(stub: Vec<u8>) -> Self {
        Self { stub: Some(stub) }
    }

    /// Produce the final package bytes
    pub fn assemble(&self, body: Vec<u8>) -> Vec<u8> {
        match &self.stub {
            None => body,
            Some(stub) => {
                let capacity = SFX_PREFIX.len() + body.len() + 1 + stub.len();
                let mut package = Vec::with_capacity(capacity);
                package.extend_from_slice(SFX_PREFIX);
                package.extend_from_slice(&body);
                package.push(b'\n');
                package.extend_from_slice(stub);
                package
            }
        }
    }
}

/// Body of a self-extracting package, still followed by the stub
pub fn strip_self_extracting(data: &[u8]) -> Result<&[u8]> {
    data.strip_prefix(&SFX_PREFIX[..]).ok_or_else(|| {
        SubpackError::InvalidData("missing self-extracting prefix".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_breaks() {
        assert_eq!(normalize_line_breaks(b"a\r\nb\n"), b"a  b ".to_vec());
        assert_eq!(normalize_line_breaks(b""), Vec::<u8>::new());
    }

    #[test]
    fn test_plain_package() {
        let assembler = PackageAssembler::plain();
        assert_eq!(assembler.assemble(vec![1, 2, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn test_self_extracting_package() {
        let assembler = PackageAssembler::self_extracting(b"STUB".to_vec());
        let package = assembler.assemble(vec![0x00, 0x01, 0x00, b'x']);

        assert_eq!(package, b"//\x00\x01\x00x\nSTUB".to_vec());
        assert_eq!(
            strip_self_extracting(&package).unwrap(),
            b"\x00\x01\x00x\nSTUB"
        );
    }

    #[test]
    fn test_strip_requires_prefix() {
        assert!(strip_self_extracting(b"\x00\x00\x00").is_err());
        assert!(strip_self_extracting(b"/").is_err());
    }
}
