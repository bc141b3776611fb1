//! MSB-first bit packing

use crate::{Result, SubpackError};

/// Packs bits into bytes, most significant bit first
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    output: Vec<u8>,
    /// Bits already used in the last output byte (0 when byte aligned)
    used_bits: u8,
}

impl BitWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one bit
    pub fn push_bit(&mut self, bit: bool) {
        if self.used_bits == 0 {
            self.output.push(0);
        }
        if bit {
            if let Some(last) = self.output.last_mut() {
                *last |= 0x80 >> self.used_bits;
            }
        }
        self.used_bits = (self.used_bits + 1) & 7;
    }

    /// Append every bit of `bits` in order
    pub fn push_bits(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.push_bit(bit);
        }
    }

    /// Number of bits written so far
    pub fn bit_len(&self) -> usize {
        match self.used_bits {
            0 => self.output.len() * 8,
            used => (self.output.len() - 1) * 8 + used as usize,
        }
    }

    /// Packed bytes and the number of zero bits padding the last byte
    pub fn finish(self) -> (Vec<u8>, u8) {
        let pad = (8 - self.used_bits) & 7;
        (self.output, pad)
    }
}

/// Reads bits MSB-first from a byte slice, up to a bit limit
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
    limit: usize,
}

impl<'a> BitReader<'a> {
    /// Read `data` except for the last `pad` bits
    pub fn new(data: &'a [u8], pad: u8) -> Result<Self> {
        let total = data.len() * 8;
        let pad = pad as usize;
        if pad > 7 || pad > total {
            return Err(SubpackError::InvalidData(format!(
                "invalid pad length {pad}"
            )));
        }
        Ok(Self {
            data,
            pos: 0,
            limit: total - pad,
        })
    }

    /// Next bit, or `None` once the limit is reached
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.pos >= self.limit {
            return None;
        }
        let byte = self.data[self.pos / 8];
        let bit = byte & (0x80 >> (self.pos % 8)) != 0;
        self.pos += 1;
        Some(bit)
    }

    /// Read exactly `count` bits
    pub fn read_bits(&mut self, count: usize) -> Result<Vec<bool>> {
        (0..count)
            .map(|_| self.read_bit().ok_or(SubpackError::UnexpectedEof))
            .collect()
    }

    /// Bits left before the limit
    pub fn remaining(&self) -> usize {
        self.limit - self.pos
    }
}
