//! Replacement symbol allocation
//!
//! Symbols are byte values the input never uses. The top byte value is
//! never handed out, and self-extracting packages also keep `\n` and `\r`
//! free because the stub's host format treats them as line terminators.

use super::index::SymbolFrequencyIndex;
use crate::{DictionaryOptions, MAX_SYMBOL, SFX_RESERVED};
use log::debug;

/// Picks unused byte values to stand in for sequences
#[derive(Debug, Clone, Default)]
pub struct SymbolAllocator {
    self_extracting: bool,
    max_symbols: Option<usize>,
}

impl SymbolAllocator {
    /// Create an allocator following the given options
    pub fn new(options: &DictionaryOptions) -> Self {
        Self {
            self_extracting: options.self_extracting,
            max_symbols: options.max_symbols,
        }
    }

    /// Unused byte values, ascending, capped to the symbol budget
    pub fn allocate(&self, index: &SymbolFrequencyIndex) -> Vec<u8> {
        let mut symbols: Vec<u8> = (0..=MAX_SYMBOL)
            .filter(|&byte| !index.contains(byte))
            .filter(|byte| !(self.self_extracting && SFX_RESERVED.contains(byte)))
            .collect();

        if let Some(max) = self.max_symbols {
            symbols.truncate(max);
        }

        debug!("{} replacement symbols available", symbols.len());
        symbols
    }
}
