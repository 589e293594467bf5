//! Huffman tree construction.

use crate::error::{Error, Result};
use crate::freq::FrequencyTable;
use log::debug;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A node in a Huffman tree.
///
/// Each node owns its children outright; there is no shared structure.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Node {
  /// A symbol and the number of times it occurs.
  Leaf { symbol: char, weight: u64 },

  /// Two subtrees, weighing the sum of both.
  Internal {
    weight: u64,
    left: Box<Node>,
    right: Box<Node>,
  },
}

impl Node {
  pub fn leaf(symbol: char, weight: u64) -> Self {
    Node::Leaf { symbol, weight }
  }

  /// Joins two nodes under a new internal node, `left` taking the 0 edge.
  ///
  /// Returns `None` if the combined weight does not fit in a `u64`.
  pub fn merge(left: Node, right: Node) -> Option<Self> {
    let weight = left.weight().checked_add(right.weight())?;
    Some(Node::Internal {
      weight,
      left: Box::new(left),
      right: Box::new(right),
    })
  }

  pub fn weight(&self) -> u64 {
    match self {
      Node::Leaf { weight, .. } => *weight,
      Node::Internal { weight, .. } => *weight,
    }
  }
}

/// A complete Huffman tree for some text.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct HuffmanTree {
  root: Node,
}

impl HuffmanTree {
  /// Wraps an already built root node.
  pub fn new(root: Node) -> Self {
    HuffmanTree { root }
  }

  /// Builds the optimal prefix code tree for `table`.
  ///
  /// Nodes are taken from a min-heap ordered by weight, with equal weights
  /// taken in the order they were inserted. Leaves are inserted in ascending
  /// symbol order and merged nodes after them, so the shape of the tree is
  /// fully determined by the table.
  ///
  /// A table with a single symbol produces a lone leaf.
  pub fn from_frequencies(table: &FrequencyTable) -> Result<Self> {
    let mut heap = BinaryHeap::with_capacity(table.len());
    let mut sequence = 0;
    for (symbol, weight) in table {
      heap.push(Entry::new(Node::leaf(symbol, weight), sequence));
      sequence += 1;
    }

    let root = loop {
      let first = heap.pop().ok_or(Error::EmptyAlphabet)?;
      match heap.pop() {
        Some(second) => {
          let merged = Node::merge(first.node, second.node)
            .ok_or(Error::WeightOverflow)?;
          heap.push(Entry::new(merged, sequence));
          sequence += 1;
        }
        None => break first.node,
      }
    };

    let tree = HuffmanTree { root };
    debug!(
      "built huffman tree: {} symbols, depth {}, weight {}",
      tree.leaf_count(),
      tree.depth(),
      tree.weight()
    );
    Ok(tree)
  }

  /// Counts the symbols in `text` and builds its tree.
  pub fn from_text(text: &str) -> Result<Self> {
    Self::from_frequencies(&FrequencyTable::from_text(text))
  }

  pub fn root(&self) -> &Node {
    &self.root
  }

  /// The total weight of the tree, which is the length of the text it was
  /// built from.
  pub fn weight(&self) -> u64 {
    self.root.weight()
  }

  /// The number of distinct symbols in the tree.
  pub fn leaf_count(&self) -> usize {
    fn count(node: &Node) -> usize {
      match node {
        Node::Leaf { .. } => 1,
        Node::Internal { left, right, .. } => count(left) + count(right),
      }
    }
    count(&self.root)
  }

  /// The length of the longest root to leaf path.
  pub fn depth(&self) -> usize {
    fn depth(node: &Node) -> usize {
      match node {
        Node::Leaf { .. } => 0,
        Node::Internal { left, right, .. } => 1 + depth(left).max(depth(right)),
      }
    }
    depth(&self.root)
  }

  /// The number of bits needed to encode the text this tree was built from,
  /// i.e. the sum over all leaves of weight times code length.
  ///
  /// A lone leaf gets the one bit code, matching the code book. Returns
  /// `None` if the count does not fit in a `u64`.
  pub fn weighted_path_length(&self) -> Option<u64> {
    fn walk(node: &Node, depth: u64) -> Option<u64> {
      match node {
        Node::Leaf { weight, .. } => weight.checked_mul(depth.max(1)),
        Node::Internal { left, right, .. } => {
          walk(left, depth + 1)?.checked_add(walk(right, depth + 1)?)
        }
      }
    }
    walk(&self.root, 0)
  }
}

/// Heap entry ordering nodes so that `BinaryHeap`, a max-heap, pops the
/// lightest node first, and the earliest inserted among equal weights.
#[derive(Debug)]
struct Entry {
  weight: u64,
  sequence: u64,
  node: Node,
}

impl Entry {
  fn new(node: Node, sequence: u64) -> Self {
    Entry {
      weight: node.weight(),
      sequence,
      node,
    }
  }
}

impl PartialEq for Entry {
  fn eq(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Equal
  }
}

impl Eq for Entry {}

impl Ord for Entry {
  fn cmp(&self, other: &Self) -> Ordering {
    (other.weight, other.sequence).cmp(&(self.weight, self.sequence))
  }
}

impl PartialOrd for Entry {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}
