//! Static Huffman coding over bytes.
//!
//! Encoding is two-pass. The whole input is counted into a [`FrequencyTable`],
//! a [`HuffmanTree`] is merged from it, the tree is walked into a [`CodeBook`]
//! and the input is translated codeword by codeword. The result is written as
//! a [`CodeTable`] followed by the payload, one ASCII `'0'` or `'1'` per bit:
//!
//! ```text
//! 5
//! a	0.454545	1
//! b	0.181818	01
//! r	0.181818	000
//! c	0.090909	0010
//! d	0.090909	0011
//!
//! 10100010010100111010001
//! ```
//!
//! Decoding only needs the codewords from the table. Bits are matched greedily
//! against them, which is unambiguous because the code is prefix-free.
//!
//! An input with a single distinct symbol gets the codeword `"0"`, so its
//! payload is one `'0'` per occurrence.

pub mod codebook;
pub mod decoder;
pub mod encoder;
pub mod frequency;
pub mod table;
pub mod tree;

pub use codebook::CodeBook;
pub use decoder::{decode_payload, decode_stream};
pub use encoder::{encode_symbols, CodingStats, Encoded, Encoder};
pub use frequency::{FrequencyEntry, FrequencyTable, Symbol};
pub use table::{CodeTable, TableEntry};
pub use tree::{Bit, HuffmanNode, HuffmanTree, MergeStrategy};

use super::Compression;
use crate::error::Result;
use std::io::{Read, Write};

/// [`Compression`] front end for the Huffman coder.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCoder {
    encoder: Encoder,
}

impl HuffmanCoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick how the tree builder orders nodes. The output is the same either way.
    pub fn with_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.encoder = self.encoder.with_strategy(strategy);
        self
    }

    pub fn encode(&self, input: &[u8]) -> Result<Encoded> {
        self.encoder.encode(input)
    }

    pub fn decode(&self, stream: &[u8]) -> Result<Vec<u8>> {
        decode_stream(stream)
    }
}

impl Compression for HuffmanCoder {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.encode(data)?.to_bytes())
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.decode(data)
    }
}

/// Convenience function: encodes `input` and returns the serialized stream.
pub fn huffman_encode(input: &[u8]) -> Result<Vec<u8>> {
    HuffmanCoder::new().compress(input)
}

/// Convenience function: decodes a serialized stream back to the original bytes.
pub fn huffman_decode(stream: &[u8]) -> Result<Vec<u8>> {
    decode_stream(stream)
}

/// Read all of `reader`, encode it and write the stream to `writer`.
pub fn encode_to_writer<R: Read, W: Write>(mut reader: R, writer: W) -> Result<Encoded> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    let encoded = HuffmanCoder::new().encode(&input)?;
    encoded.write_to(writer)?;
    Ok(encoded)
}

/// Read a whole encoded stream from `reader` and decode it.
pub fn decode_reader<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let mut stream = Vec::new();
    reader.read_to_end(&mut stream)?;
    decode_stream(&stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};

    #[test]
    fn test_encode_decode() {
        let input = b"huffman coding in rust is fun!";
        let encoded = huffman_encode(input).unwrap();
        let decoded = huffman_decode(&encoded).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_single_character() {
        let input = b"aaaaaaa";
        let encoded = huffman_encode(input).unwrap();
        assert!(encoded.ends_with(b"\n\n0000000"));
        assert_eq!(huffman_decode(&encoded).unwrap(), input);
    }

    #[test]
    fn test_non_ascii() {
        let input = "这是一段测试".as_bytes();
        let encoded = huffman_encode(input).unwrap();
        assert_eq!(huffman_decode(&encoded).unwrap(), input);
    }

    #[test]
    fn test_all_byte_values() {
        let input: Vec<u8> = (0..=255u8).chain(0..=127u8).collect();
        let coder = HuffmanCoder::new().with_strategy(MergeStrategy::MinHeap);
        let encoded = coder.compress(&input).unwrap();
        assert_eq!(coder.decompress(&encoded).unwrap(), input);
    }

    #[test]
    fn test_empty_input() {
        let err = huffman_encode(b"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Precondition);
    }

    #[test]
    fn test_reader_writer() {
        let input = b"peter piper picked a peck of pickled peppers";
        let mut stream = Vec::new();
        let encoded = encode_to_writer(&input[..], &mut stream).unwrap();
        assert_eq!(stream, encoded.to_bytes());
        assert_eq!(decode_reader(stream.as_slice()).unwrap(), input);
    }

    #[test]
    fn test_truncated_stream() {
        let mut stream = huffman_encode(b"abracadabra").unwrap();
        // The payload ends "000 1" (r, a); cutting two bits leaves r half read.
        stream.truncate(stream.len() - 2);
        let err = huffman_decode(&stream).unwrap_err();
        assert!(matches!(err, Error::TruncatedPayload { .. }));
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}
