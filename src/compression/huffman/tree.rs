//! Huffman tree assembly.
//!
//! Two merge strategies are available and both produce the same tree for the
//! same [`FrequencyTable`]:
//!
//! - [`MergeStrategy::SortedList`] keeps the working nodes in a list sorted by
//!   weight descending, merges the last two and re-inserts the result with a
//!   linear scan. Cheap for byte alphabets.
//! - [`MergeStrategy::MinHeap`] keeps the nodes in a [`BinaryHeap`] keyed on
//!   `(weight, sequence)` so that the pop order matches the sorted list.
//!
//! # Tie-break
//!
//! Within one weight class the sorted list holds leaves in table order followed
//! by internal nodes in creation order, because a merged node is inserted
//! before the first node of strictly smaller weight. The last element (the
//! "right" child of the next merge) is therefore the lowest-weight node that
//! entered the list most recently. The heap assigns leaves their table index
//! and internal nodes `leaf_count + creation_index` as sequence number, and
//! pops the smallest weight with the largest sequence number first.
//!
//! The child with the smaller weight is labelled `1`, the other `0`. On equal
//! weights the right child is labelled `1`.

use super::frequency::{FrequencyTable, Symbol};
use crate::error::{Error, Result};
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Label of a tree edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

/// Represents a node in the Huffman tree.
///
/// Weights are occurrence counts. Probabilities are `weight / total` and
/// order the same way, without rounding ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A leaf node holds a symbol and its count.
    Leaf { symbol: Symbol, weight: u64 },
    /// An internal node owns exactly two children and labels both edges.
    Internal {
        weight: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
        left_bit: Bit,
        right_bit: Bit,
    },
}

impl HuffmanNode {
    /// Returns the weight of the node.
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Join two nodes under a new parent and label the edges.
    fn merge(left: HuffmanNode, right: HuffmanNode) -> HuffmanNode {
        let (left_bit, right_bit) = if left.weight() < right.weight() {
            (Bit::One, Bit::Zero)
        } else {
            (Bit::Zero, Bit::One)
        };
        HuffmanNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
            left_bit,
            right_bit,
        }
    }

    fn depth(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 0,
            HuffmanNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn count(&self, leaves: &mut usize, internals: &mut usize) {
        match self {
            HuffmanNode::Leaf { .. } => *leaves += 1,
            HuffmanNode::Internal { left, right, .. } => {
                *internals += 1;
                left.count(leaves, internals);
                right.count(leaves, internals);
            }
        }
    }
}

/// How the builder keeps track of the nodes that still need merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    #[default]
    SortedList,
    MinHeap,
}

/// A node waiting in the heap, with its position in the equivalent sorted list.
#[derive(Debug)]
struct Ranked {
    node: HuffmanNode,
    seq: usize,
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lower weight first, then the later arrival.
        other
            .node
            .weight()
            .cmp(&self.node.weight())
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

/// A fully merged Huffman tree.
///
/// Dropping the tree frees every node; nothing else holds references into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build the tree with the default [`MergeStrategy::SortedList`].
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        Self::build_with(table, MergeStrategy::default())
    }

    pub fn build_with(table: &FrequencyTable, strategy: MergeStrategy) -> Result<Self> {
        let root = match strategy {
            MergeStrategy::SortedList => merge_sorted_list(table)?,
            MergeStrategy::MinHeap => merge_min_heap(table)?,
        };
        let tree = HuffmanTree { root };
        debug!(
            "built huffman tree ({:?}): {} leaves, depth {}",
            strategy,
            tree.leaf_count(),
            tree.depth()
        );
        Ok(tree)
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Total weight, equal to the number of symbols counted.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn leaf_count(&self) -> usize {
        let (mut leaves, mut internals) = (0, 0);
        self.root.count(&mut leaves, &mut internals);
        leaves
    }

    pub fn internal_count(&self) -> usize {
        let (mut leaves, mut internals) = (0, 0);
        self.root.count(&mut leaves, &mut internals);
        internals
    }
}

fn leaves(table: &FrequencyTable) -> impl Iterator<Item = HuffmanNode> + '_ {
    table.iter().map(|entry| HuffmanNode::Leaf {
        symbol: entry.symbol,
        weight: entry.count,
    })
}

fn merge_sorted_list(table: &FrequencyTable) -> Result<HuffmanNode> {
    let mut tops: Vec<HuffmanNode> = leaves(table).collect();
    loop {
        match (tops.pop(), tops.pop()) {
            (Some(right), Some(left)) => {
                trace!("merging {} + {}", left.weight(), right.weight());
                let node = HuffmanNode::merge(left, right);
                let pos = tops
                    .iter()
                    .position(|n| n.weight() < node.weight())
                    .unwrap_or(tops.len());
                tops.insert(pos, node);
            }
            (Some(root), None) => return Ok(root),
            _ => return Err(Error::EmptyFrequencyTable),
        }
    }
}

fn merge_min_heap(table: &FrequencyTable) -> Result<HuffmanNode> {
    let mut heap: BinaryHeap<Ranked> = leaves(table)
        .enumerate()
        .map(|(seq, node)| Ranked { node, seq })
        .collect();
    let mut next_seq = heap.len();
    loop {
        match (heap.pop(), heap.pop()) {
            (Some(right), Some(left)) => {
                trace!("merging {} + {}", left.node.weight(), right.node.weight());
                heap.push(Ranked {
                    node: HuffmanNode::merge(left.node, right.node),
                    seq: next_seq,
                });
                next_seq += 1;
            }
            (Some(root), None) => return Ok(root.node),
            _ => return Err(Error::EmptyFrequencyTable),
        }
    }
}
