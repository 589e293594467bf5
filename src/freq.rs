//! Symbol frequency counting.

use std::collections::btree_map::{self, BTreeMap};

/// Occurrence counts for each distinct symbol of a text.
///
/// Symbols iterate in ascending order so that anything built from the table,
/// the Huffman tree in particular, comes out the same on every run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FrequencyTable {
  counts: BTreeMap<char, u64>,
}

impl FrequencyTable {
  /// Counts the symbols in `text`. Empty text gives an empty table.
  pub fn from_text(text: &str) -> Self {
    let mut counts = BTreeMap::new();
    for c in text.chars() {
      *counts.entry(c).or_insert(0) += 1;
    }
    FrequencyTable { counts }
  }

  /// The number of distinct symbols.
  pub fn len(&self) -> usize {
    self.counts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.counts.is_empty()
  }

  /// The count for `symbol`, if it occurs at all.
  pub fn get(&self, symbol: char) -> Option<u64> {
    self.counts.get(&symbol).copied()
  }

  /// The sum of all counts, equal to the length of the text in symbols.
  ///
  /// Returns `None` if the sum does not fit in a `u64`, which only happens
  /// for tables built from explicit counts.
  pub fn total(&self) -> Option<u64> {
    self.counts.values().try_fold(0u64, |acc, &n| acc.checked_add(n))
  }

  /// Iterates over `(symbol, count)` pairs in ascending symbol order.
  pub fn iter(&self) -> Iter<'_> {
    Iter(self.counts.iter())
  }
}

impl std::iter::FromIterator<(char, u64)> for FrequencyTable {
  /// Builds a table from explicit counts. Zero counts are dropped and repeated
  /// symbols accumulate, saturating at `u64::MAX`.
  fn from_iter<I: IntoIterator<Item = (char, u64)>>(iter: I) -> Self {
    let mut counts = BTreeMap::new();
    for (symbol, count) in iter.into_iter().filter(|&(_, n)| n > 0) {
      let n = counts.entry(symbol).or_insert(0u64);
      *n = n.saturating_add(count);
    }
    FrequencyTable { counts }
  }
}

/// Iterator over the entries of a [`FrequencyTable`].
pub struct Iter<'a>(btree_map::Iter<'a, char, u64>);

impl<'a> Iterator for Iter<'a> {
  type Item = (char, u64);

  fn next(&mut self) -> Option<Self::Item> {
    self.0.next().map(|(&c, &n)| (c, n))
  }
}

impl<'a> IntoIterator for &'a FrequencyTable {
  type Item = (char, u64);
  type IntoIter = Iter<'a>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}
