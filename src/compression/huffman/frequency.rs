//! Symbol counting and the probability-sorted frequency table.

use crate::error::{Error, Result};
use log::debug;

/// A single alphabet unit.
pub type Symbol = u8;

/// One distinct symbol with its occurrence count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyEntry {
    pub symbol: Symbol,
    pub count: u64,
    pub probability: f64,
}

/// Distinct symbols of an input, sorted by probability descending.
///
/// Symbols with equal counts keep the order in which they were first seen in
/// the input, so the table (and everything built from it) is reproducible.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
    total: u64,
}

impl FrequencyTable {
    /// Count every symbol of `input`.
    ///
    /// Returns [`Error::EmptyInput`] when `input` has no symbols.
    pub fn build(input: &[Symbol]) -> Result<Self> {
        if input.is_empty() {
            return Err(Error::EmptyInput);
        }

        // slot[symbol] is the index of the symbol's entry, in first-seen order
        let mut slot: [Option<usize>; 256] = [None; 256];
        let mut counts: Vec<(Symbol, u64)> = Vec::new();
        for &symbol in input {
            match slot[symbol as usize] {
                Some(i) => counts[i].1 += 1,
                None => {
                    slot[symbol as usize] = Some(counts.len());
                    counts.push((symbol, 1));
                }
            }
        }

        // Stable sort keeps first-seen order among equal counts.
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let total = input.len() as u64;
        let entries: Vec<FrequencyEntry> = counts
            .into_iter()
            .map(|(symbol, count)| FrequencyEntry {
                symbol,
                count,
                probability: count as f64 / total as f64,
            })
            .collect();

        debug!(
            "counted {} symbols, {} distinct",
            total,
            entries.len()
        );
        Ok(FrequencyTable { entries, total })
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrequencyEntry> {
        self.entries.iter()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn get(&self, symbol: Symbol) -> Option<&FrequencyEntry> {
        self.entries.iter().find(|e| e.symbol == symbol)
    }

    /// Sum of all probabilities, 1.0 up to rounding.
    pub fn probability_sum(&self) -> f64 {
        self.entries.iter().map(|e| e.probability).sum()
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a FrequencyEntry;
    type IntoIter = std::slice::Iter<'a, FrequencyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frequency_table() {
        let table = FrequencyTable::build(b"aabccc").unwrap();
        assert_eq!(table.total(), 6);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(b'a').unwrap().count, 2);
        assert_eq!(table.get(b'b').unwrap().count, 1);
        assert_eq!(table.get(b'c').unwrap().count, 3);
        assert!(table.get(b'z').is_none());
    }

    #[test]
    fn test_sorted_descending() {
        let table = FrequencyTable::build(b"abracadabra").unwrap();
        let order: Vec<(u8, u64)> = table.iter().map(|e| (e.symbol, e.count)).collect();
        assert_eq!(
            order,
            vec![(b'a', 5), (b'b', 2), (b'r', 2), (b'c', 1), (b'd', 1)]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let table = FrequencyTable::build(b"zyxxyz").unwrap();
        let symbols: Vec<u8> = table.iter().map(|e| e.symbol).collect();
        assert_eq!(symbols, b"zyx".to_vec());
    }

    #[test]
    fn test_probability_sum() {
        let table = FrequencyTable::build(b"this is an example for huffman encoding").unwrap();
        assert_relative_eq!(table.probability_sum(), 1.0, epsilon = 1e-12);
        for entry in &table {
            assert!(entry.probability > 0.0 && entry.probability <= 1.0);
        }
    }

    #[test]
    fn test_single_symbol_probability_is_one() {
        let table = FrequencyTable::build(b"aaaa").unwrap();
        assert_eq!(table.len(), 1);
        assert_relative_eq!(table.entries()[0].probability, 1.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(FrequencyTable::build(b""), Err(Error::EmptyInput)));
    }
}
