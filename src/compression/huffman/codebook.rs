//! Symbol to codeword mapping.

use super::frequency::Symbol;
use super::tree::{HuffmanNode, HuffmanTree};
use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};

/// Prefix-free mapping from each symbol to its codeword.
///
/// Codewords are strings of `'0'` and `'1'` characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeBook {
    codes: BTreeMap<Symbol, String>,
}

impl CodeBook {
    /// Read the codewords off the root-to-leaf paths of `tree`.
    ///
    /// A tree that is a single leaf gives its symbol the codeword `"0"`, so
    /// every occurrence still costs one payload bit and the run length
    /// survives the round trip.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        let mut path = String::new();
        // (node, length of the parent's path, label of the edge into node)
        let mut stack: Vec<(&HuffmanNode, usize, Option<char>)> = vec![(tree.root(), 0, None)];

        while let Some((node, prefix_len, edge)) = stack.pop() {
            path.truncate(prefix_len);
            if let Some(bit) = edge {
                path.push(bit);
            }
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    let code = if path.is_empty() {
                        "0".to_string()
                    } else {
                        path.clone()
                    };
                    codes.insert(*symbol, code);
                }
                HuffmanNode::Internal {
                    left,
                    right,
                    left_bit,
                    right_bit,
                    ..
                } => {
                    stack.push((right.as_ref(), path.len(), Some(right_bit.as_char())));
                    stack.push((left.as_ref(), path.len(), Some(left_bit.as_char())));
                }
            }
        }
        CodeBook { codes }
    }

    /// Build a code book from externally supplied codewords, e.g. a parsed table.
    ///
    /// Rejects duplicate symbols, empty or non-binary codewords, and any pair of
    /// codewords where one is a prefix of the other.
    pub fn from_codewords<I>(codewords: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Symbol, String)>,
    {
        let mut codes = BTreeMap::new();
        for (row, (symbol, code)) in codewords.into_iter().enumerate() {
            if code.is_empty() || !code.bytes().all(|b| b == b'0' || b == b'1') {
                return Err(Error::MalformedRow {
                    row: row + 1,
                    reason: format!("invalid codeword {:?}", code),
                });
            }
            if codes.insert(symbol, code).is_some() {
                return Err(Error::DuplicateSymbol { symbol });
            }
        }
        let book = CodeBook { codes };
        if let Some((first, second)) = book.find_collision() {
            return Err(Error::CodewordCollision { first, second });
        }
        Ok(book)
    }

    pub fn get(&self, symbol: Symbol) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> {
        self.codes.iter().map(|(&s, c)| (s, c.as_str()))
    }

    /// Length of the longest codeword.
    pub fn max_len(&self) -> usize {
        self.codes.values().map(String::len).max().unwrap_or(0)
    }

    pub fn is_prefix_free(&self) -> bool {
        self.find_collision().is_none()
    }

    /// First pair of codewords where one is a prefix of (or equal to) the other.
    ///
    /// After sorting, a codeword that prefixes any other also prefixes its
    /// immediate successor, so checking neighbours is enough.
    fn find_collision(&self) -> Option<(String, String)> {
        let mut sorted: Vec<&String> = self.codes.values().collect();
        sorted.sort();
        sorted
            .windows(2)
            .find(|pair| pair[1].starts_with(pair[0].as_str()))
            .map(|pair| (pair[0].clone(), pair[1].clone()))
    }

    /// Codeword to symbol lookup used by the decoder.
    pub fn inverse(&self) -> HashMap<&str, Symbol> {
        self.codes.iter().map(|(&s, c)| (c.as_str(), s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::huffman::frequency::FrequencyTable;

    fn book_for(input: &[u8]) -> CodeBook {
        let table = FrequencyTable::build(input).unwrap();
        CodeBook::from_tree(&HuffmanTree::build(&table).unwrap())
    }

    #[test]
    fn test_two_symbols() {
        let book = book_for(b"ab");
        assert_eq!(book.get(b'a'), Some("0"));
        assert_eq!(book.get(b'b'), Some("1"));
    }

    #[test]
    fn test_abracadabra_codes() {
        let book = book_for(b"abracadabra");
        assert_eq!(book.get(b'a'), Some("1"));
        assert_eq!(book.get(b'b'), Some("01"));
        assert_eq!(book.get(b'r'), Some("000"));
        assert_eq!(book.get(b'c'), Some("0010"));
        assert_eq!(book.get(b'd'), Some("0011"));
        assert_eq!(book.max_len(), 4);
        assert!(book.is_prefix_free());
    }

    #[test]
    fn test_huffman_tree_and_code_table() {
        let input = b"this is an example for huffman encoding";
        let book = book_for(input);
        for &ch in input.iter() {
            let code = book.get(ch).unwrap_or_else(|| panic!("Missing code for '{}'", ch as char));
            assert!(!code.is_empty());
        }
        assert!(book.is_prefix_free());
    }

    #[test]
    fn test_single_symbol_gets_zero() {
        let book = book_for(b"aaaa");
        assert_eq!(book.len(), 1);
        assert_eq!(book.get(b'a'), Some("0"));
    }

    #[test]
    fn test_from_codewords_rejects_prefix() {
        let err = CodeBook::from_codewords(vec![
            (b'a', "0".to_string()),
            (b'b', "01".to_string()),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::CodewordCollision { ref first, ref second }
            if first == "0" && second == "01"));
    }

    #[test]
    fn test_from_codewords_rejects_duplicates() {
        let same_code = CodeBook::from_codewords(vec![
            (b'a', "10".to_string()),
            (b'b', "10".to_string()),
        ]);
        assert!(matches!(same_code, Err(Error::CodewordCollision { .. })));

        let same_symbol = CodeBook::from_codewords(vec![
            (b'a', "0".to_string()),
            (b'a', "1".to_string()),
        ]);
        assert!(matches!(
            same_symbol,
            Err(Error::DuplicateSymbol { symbol: b'a' })
        ));
    }

    #[test]
    fn test_from_codewords_rejects_bad_bits() {
        let result = CodeBook::from_codewords(vec![(b'a', "0x1".to_string())]);
        assert!(matches!(result, Err(Error::MalformedRow { row: 1, .. })));
        let result = CodeBook::from_codewords(vec![(b'a', String::new())]);
        assert!(matches!(result, Err(Error::MalformedRow { .. })));
    }

    #[test]
    fn test_inverse() {
        let book = book_for(b"abracadabra");
        let inverse = book.inverse();
        assert_eq!(inverse.len(), 5);
        assert_eq!(inverse.get("0010"), Some(&b'c'));
    }
}
