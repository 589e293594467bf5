//! Code books mapping symbols to their Huffman codes and back.

use crate::bit::{BitVec, BitVecExt};
use crate::tree::{HuffmanTree, Node};
use log::trace;
use std::collections::{BTreeMap, HashMap};

/// The codes assigned to every symbol of a Huffman tree.
///
/// A code book is derived from a tree and handed to the packer explicitly; it
/// is never shared between unrelated compressions.
#[derive(Clone, Debug, Default)]
pub struct CodeBook {
  codes: BTreeMap<char, BitVec>,
  symbols: HashMap<BitVec, char>,
}

impl CodeBook {
  /// Walks `tree` depth first, appending a 0 for every left edge and a 1 for
  /// every right edge.
  ///
  /// A tree made of a single leaf would give its symbol an empty code, which
  /// can't be told apart from no code at all once packed. That leaf gets the
  /// code `0` instead.
  pub fn from_tree(tree: &HuffmanTree) -> Self {
    let mut book = CodeBook::default();
    match tree.root() {
      Node::Leaf { symbol, .. } => {
        book.insert(*symbol, BitVec::from_elem(1, false))
      }
      root => book.assign(root, &mut BitVec::new()),
    }
    book
  }

  fn assign(&mut self, node: &Node, path: &mut BitVec) {
    match node {
      Node::Leaf { symbol, .. } => self.insert(*symbol, path.clone()),
      Node::Internal { left, right, .. } => {
        path.push(false);
        self.assign(left, path);
        path.pop();
        path.push(true);
        self.assign(right, path);
        path.pop();
      }
    }
  }

  fn insert(&mut self, symbol: char, code: BitVec) {
    trace!("code for {:?}: {}", symbol, code.to_bit_string());
    self.symbols.insert(code.clone(), symbol);
    self.codes.insert(symbol, code);
  }

  /// The code for `symbol`.
  pub fn code(&self, symbol: char) -> Option<&BitVec> {
    self.codes.get(&symbol)
  }

  /// The symbol whose code is exactly `code`.
  pub fn symbol(&self, code: &BitVec) -> Option<char> {
    self.symbols.get(code).copied()
  }

  /// The number of symbols in this book.
  pub fn len(&self) -> usize {
    self.codes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.codes.is_empty()
  }

  /// Iterates over `(symbol, code)` pairs in ascending symbol order.
  pub fn iter(&self) -> impl Iterator<Item = (char, &BitVec)> + '_ {
    self.codes.iter().map(|(&c, code)| (c, code))
  }
}
