//! Utility functions for dealing with bit vectors.

pub use bit_vec::BitVec;

/// Extensions to `BitVec`.
pub trait BitVecExt {
  /// Parses a string of `'0'` and `'1'` characters into a `BitVec`.
  ///
  /// Returns `None` if `s` contains any other character.
  ///
  /// # Example
  ///
  /// ```
  /// # use hufpack::bit::{BitVec, BitVecExt};
  /// let b = BitVec::from_bit_str("101").unwrap();
  /// assert_eq!(b.to_bytes(), &[0b1010_0000]);
  /// ```
  fn from_bit_str(s: &str) -> Option<Self>
  where
    Self: Sized;

  /// Renders this `BitVec` as a string of `'0'` and `'1'` characters.
  ///
  /// This is the inverse operation of [`from_bit_str`].
  ///
  /// [`from_bit_str`]: BitVecExt::from_bit_str
  fn to_bit_string(&self) -> String;

  /// True if `self` is a prefix of `other`. Every `BitVec` is a prefix of
  /// itself.
  fn is_prefix_of(&self, other: &Self) -> bool;

  /// Appends every bit of `other` to the end of `self`.
  fn extend_from(&mut self, other: &Self);

  /// Zero extends or truncates this `BitVec` to the desired length.
  fn zext_or_trunc(&mut self, len: usize);
}

impl BitVecExt for BitVec {
  fn from_bit_str(s: &str) -> Option<Self> {
    s.chars()
      .map(|c| match c {
        '0' => Some(false),
        '1' => Some(true),
        _ => None,
      })
      .collect()
  }

  fn to_bit_string(&self) -> String {
    self.iter().map(|b| if b { '1' } else { '0' }).collect()
  }

  fn is_prefix_of(&self, other: &Self) -> bool {
    self.len() <= other.len()
      && self.iter().zip(other.iter()).all(|(a, b)| a == b)
  }

  fn extend_from(&mut self, other: &Self) {
    self.extend(other.iter());
  }

  fn zext_or_trunc(&mut self, len: usize) {
    if self.len() < len {
      self.grow(len - self.len(), false);
    } else {
      self.truncate(len);
    }
  }
}
