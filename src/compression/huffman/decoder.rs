//! Table plus payload back to symbols.

use super::codebook::CodeBook;
use super::frequency::Symbol;
use super::table::CodeTable;
use crate::error::{Error, Result};
use log::{debug, warn};

/// Decode a full stream: parse the table, rebuild the code book, match the payload.
pub fn decode_stream(stream: &[u8]) -> Result<Vec<Symbol>> {
    let (table, payload) = CodeTable::parse(stream)?;
    let book = table.code_book()?;
    debug!(
        "parsed code table with {} symbols, payload {} bytes",
        table.len(),
        payload.len()
    );
    decode_payload(&book, payload)
}

/// Greedily match payload bits against the codewords of `book`.
///
/// Bits are appended to a buffer one at a time; as soon as the buffer equals a
/// codeword its symbol is emitted and the buffer is cleared. Because the book
/// is prefix-free at most one codeword can ever match.
///
/// A single trailing line terminator after the payload is ignored. Any other
/// byte that is not `'0'` or `'1'` is an error, as is a buffer that grows past
/// the longest codeword or is still non-empty when the payload ends.
pub fn decode_payload(book: &CodeBook, payload: &[u8]) -> Result<Vec<Symbol>> {
    if book.is_empty() {
        return Err(Error::EmptyTable);
    }
    let payload = strip_line_terminator(payload);

    let inverse = book.inverse();
    let max_len = book.max_len();
    let mut buffer = String::with_capacity(max_len);
    let mut output = Vec::new();

    for (offset, &byte) in payload.iter().enumerate() {
        match byte {
            b'0' | b'1' => buffer.push(byte as char),
            _ => return Err(Error::InvalidBit { byte, offset }),
        }
        if let Some(&symbol) = inverse.get(buffer.as_str()) {
            output.push(symbol);
            buffer.clear();
        } else if buffer.len() >= max_len {
            return Err(Error::UnmatchedBits {
                pending: buffer,
                offset,
            });
        }
    }

    if !buffer.is_empty() {
        return Err(Error::TruncatedPayload { pending: buffer });
    }
    debug!("decoded {} symbols", output.len());
    Ok(output)
}

fn strip_line_terminator(payload: &[u8]) -> &[u8] {
    let stripped = payload
        .strip_suffix(b"\r\n")
        .or_else(|| payload.strip_suffix(b"\n"));
    match stripped {
        Some(rest) => {
            warn!("ignoring line terminator after payload");
            rest
        }
        None => payload,
    }
}
