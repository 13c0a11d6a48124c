//! Compression algorithms implementation.
//!
//! This module provides a static Huffman coder whose output is a text table
//! followed by one `'0'`/`'1'` character per coded bit.
//!
//! # Examples
//!
//! ```rust
//! use huffman_text::compression::{huffman::HuffmanCoder, Compression};
//!
//! let coder = HuffmanCoder::new();
//! let encoded = coder.compress(b"abracadabra").unwrap();
//! assert_eq!(coder.decompress(&encoded).unwrap(), b"abracadabra");
//! ```

use crate::error::Result;

/// Trait for compression algorithms
pub trait Compression {
    /// Compress the input data
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompress the compressed data
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

pub mod huffman;
pub use huffman::{
    huffman_decode, huffman_encode, CodeBook, CodeTable, Encoded, FrequencyTable, HuffmanCoder,
    HuffmanNode, HuffmanTree, MergeStrategy,
};
