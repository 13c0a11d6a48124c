pub mod compression;
pub mod error;

pub use compression::huffman;
pub use error::{Error, ErrorKind, Phase, Result};
