//! Serialized code table.
//!
//! The table is the self-describing header of an encoded stream:
//!
//! ```text
//! <tsize>\n
//! <symbol>\t<probability>\t<codeword>\n    (tsize rows)
//! \n
//! <payload>
//! ```
//!
//! The symbol is written as its raw byte, the probability with six fractional
//! digits and the codeword as literal `0`/`1` characters. Only the codewords
//! matter for decoding; probabilities are carried along for inspection and
//! survive a parse/write cycle unchanged.

use super::codebook::CodeBook;
use super::frequency::{FrequencyTable, Symbol};
use crate::error::{Error, Result};
use log::warn;
use std::fmt;
use std::io::Write;

/// One row of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableEntry {
    pub symbol: Symbol,
    pub probability: f64,
    pub codeword: String,
}

/// Rows of the serialized table, in frequency order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeTable {
    entries: Vec<TableEntry>,
}

impl CodeTable {
    /// Pair every entry of `frequencies` with its codeword from `book`.
    pub fn new(frequencies: &FrequencyTable, book: &CodeBook) -> Result<Self> {
        let entries = frequencies
            .iter()
            .map(|entry| {
                let codeword = book
                    .get(entry.symbol)
                    .ok_or(Error::MissingCodeword {
                        symbol: entry.symbol,
                    })?
                    .to_string();
                Ok(TableEntry {
                    symbol: entry.symbol,
                    probability: entry.probability,
                    codeword,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(CodeTable { entries })
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rebuild the code book, checking that the codewords are prefix-free.
    pub fn code_book(&self) -> Result<CodeBook> {
        if self.entries.is_empty() {
            return Err(Error::EmptyTable);
        }
        CodeBook::from_codewords(self.entries.iter().map(|e| (e.symbol, e.codeword.clone())))
    }

    /// Shannon entropy of the symbol distribution, in bits per symbol.
    pub fn entropy(&self) -> f64 {
        self.entries
            .iter()
            .filter(|e| e.probability > 0.0)
            .map(|e| -e.probability * e.probability.log2())
            .sum()
    }

    /// Expected codeword length in bits per symbol.
    pub fn average_code_length(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.probability * e.codeword.len() as f64)
            .sum()
    }

    /// Write the header, the rows and the blank separator line.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", self.entries.len())?;
        for entry in &self.entries {
            writer.write_all(&[entry.symbol, b'\t'])?;
            writeln!(writer, "{:.6}\t{}", entry.probability, entry.codeword)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut out);
        out
    }

    /// Parse a table from the front of `input`, returning it with the remaining
    /// bytes (the payload).
    ///
    /// Lines may end in `\n` or `\r\n`.
    pub fn parse(input: &[u8]) -> Result<(CodeTable, &[u8])> {
        let mut cursor = Cursor::new(input);

        let header = cursor
            .line()
            .ok_or_else(|| Error::MalformedHeader("missing line terminator".to_string()))?;
        let header = std::str::from_utf8(header)
            .map_err(|_| Error::MalformedHeader("header is not text".to_string()))?;
        let tsize: usize = header
            .trim()
            .parse()
            .map_err(|_| Error::MalformedHeader(format!("{:?} is not a symbol count", header)))?;
        if tsize == 0 {
            return Err(Error::EmptyTable);
        }
        if tsize > 256 {
            return Err(Error::MalformedHeader(format!(
                "{} symbols exceed the byte alphabet",
                tsize
            )));
        }

        let mut entries = Vec::with_capacity(tsize);
        for row in 1..=tsize {
            entries.push(parse_row(&mut cursor, row)?);
        }

        match cursor.line() {
            Some([]) => {}
            _ => {
                return Err(Error::MalformedRow {
                    row: tsize + 1,
                    reason: format!("expected a blank line after {} rows", tsize),
                })
            }
        }

        if cursor.saw_crlf {
            warn!("code table uses CRLF line endings");
        }
        Ok((CodeTable { entries }, cursor.rest()))
    }
}

fn parse_row(cursor: &mut Cursor<'_>, row: usize) -> Result<TableEntry> {
    let malformed = |reason: &str| Error::MalformedRow {
        row,
        reason: reason.to_string(),
    };

    let symbol = cursor
        .byte()
        .ok_or_else(|| malformed("unexpected end of table"))?;
    if cursor.byte() != Some(b'\t') {
        return Err(malformed("expected a tab after the symbol"));
    }

    let probability = cursor
        .until(b'\t')
        .ok_or_else(|| malformed("missing tab after the probability"))?;
    let probability: f64 = std::str::from_utf8(probability)
        .ok()
        .and_then(|text| text.trim().parse().ok())
        .ok_or_else(|| malformed("probability is not a number"))?;
    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(malformed("probability outside [0, 1]"));
    }

    let codeword = cursor
        .line()
        .ok_or_else(|| malformed("missing line terminator"))?;
    if codeword.is_empty() || !codeword.iter().all(|&b| b == b'0' || b == b'1') {
        return Err(malformed("codeword must be a non-empty string of 0 and 1"));
    }
    let codeword = String::from_utf8_lossy(codeword).into_owned();

    Ok(TableEntry {
        symbol,
        probability,
        codeword,
    })
}

/// Forward-only reader over the serialized bytes.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    saw_crlf: bool,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Cursor {
            bytes,
            pos: 0,
            saw_crlf: false,
        }
    }

    fn byte(&mut self) -> Option<u8> {
        let b = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }

    /// Bytes up to `delim`, consuming the delimiter.
    fn until(&mut self, delim: u8) -> Option<&'a [u8]> {
        let rest = &self.bytes[self.pos..];
        let end = rest.iter().position(|&b| b == delim)?;
        self.pos += end + 1;
        Some(&rest[..end])
    }

    /// Bytes up to the next line terminator, without it.
    fn line(&mut self) -> Option<&'a [u8]> {
        let line = self.until(b'\n')?;
        match line.split_last() {
            Some((b'\r', head)) => {
                self.saw_crlf = true;
                Some(head)
            }
            _ => Some(line),
        }
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

/// Human-readable listing, with unprintable symbols escaped.
impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.entries.len())?;
        for entry in &self.entries {
            writeln!(
                f,
                "{}\t{:.6}\t{}",
                std::ascii::escape_default(entry.symbol),
                entry.probability,
                entry.codeword
            )?;
        }
        Ok(())
    }
}
