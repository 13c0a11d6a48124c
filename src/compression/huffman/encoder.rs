//! Symbols to table plus `'0'`/`'1'` payload.

use super::codebook::CodeBook;
use super::frequency::{FrequencyTable, Symbol};
use super::table::CodeTable;
use super::tree::{HuffmanTree, MergeStrategy};
use crate::error::{Error, Result};
use log::debug;
use std::io::Write;

/// Output of one encode call: the table and the payload it decodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    pub table: CodeTable,
    pub payload: String,
    symbols: usize,
}

/// Size figures for an encoded stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodingStats {
    pub symbols: usize,
    pub distinct: usize,
    pub payload_bits: usize,
    pub bits_per_symbol: f64,
}

impl Encoded {
    /// Write the full stream: table, separator line, payload.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        self.table.write_to(&mut writer)?;
        writer.write_all(self.payload.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.table.to_bytes();
        out.extend_from_slice(self.payload.as_bytes());
        out
    }

    /// Number of input symbols this payload encodes.
    pub fn symbol_count(&self) -> usize {
        self.symbols
    }

    pub fn stats(&self) -> CodingStats {
        CodingStats {
            symbols: self.symbols,
            distinct: self.table.len(),
            payload_bits: self.payload.len(),
            bits_per_symbol: self.payload.len() as f64 / self.symbols as f64,
        }
    }
}

/// Two-pass encoder: count the whole input, then translate it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    strategy: MergeStrategy,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn encode(&self, input: &[Symbol]) -> Result<Encoded> {
        let frequencies = FrequencyTable::build(input)?;
        // The tree is dropped at the end of this statement; only the book survives.
        let book = CodeBook::from_tree(&HuffmanTree::build_with(&frequencies, self.strategy)?);
        let table = CodeTable::new(&frequencies, &book)?;
        let payload = encode_symbols(input, &book)?;
        debug!(
            "encoded {} symbols into {} bits",
            input.len(),
            payload.len()
        );
        Ok(Encoded {
            table,
            payload,
            symbols: input.len(),
        })
    }
}

/// Concatenate the codewords of `input` in order.
///
/// A symbol without a codeword means the book was not built from this input.
pub fn encode_symbols(input: &[Symbol], book: &CodeBook) -> Result<String> {
    let mut payload = String::new();
    for &symbol in input {
        let code = book
            .get(symbol)
            .ok_or(Error::MissingCodeword { symbol })?;
        payload.push_str(code);
    }
    Ok(payload)
}
