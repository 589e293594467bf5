//! Variable-Width Integer Encoding (VIE): a UTF-8 style encoding for integer
//! values which keeps small values small. Every integer stored in an archive
//! (leaf weights, symbol scalars, payload lengths) goes through it.

/// A code point in the variable-width integer encoding encodes an integer
/// value as a string of bytes; least significant bits first, 7 bits per
/// byte.
///
/// The highest bit of each byte is reserved as a prefix; 1 denotes that the
/// next byte is a continuation of this code point and 0 means that this byte
/// is the end of the code point.
///
/// # Examples
///
/// The number 131 is `1000 0011` in binary. It spreads over 2 bytes:
///
/// ```text
/// 1000 0011   0000 0001
/// ^~~~ ~~~~           #
/// ```
///
/// The highest bit of the first byte (marked with `^`) says that the next
/// byte is a part of this code point. The 7 bits after it (marked with `~`)
/// are the lower 7 bits of 131. The remaining high bit of 131 sits in the
/// lowest position of the second byte, whose own prefix bit is 0.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CodePoint {
  bytes: Vec<u8>,
}

/// The longest code point needed for a `u64` value.
const MAX_BYTES: usize = 10;

impl CodePoint {
  /// The number of bytes taken up by this code point.
  #[inline]
  pub fn count(&self) -> usize {
    self.bytes.len()
  }

  /// Reference to the bytes which make up this code point.
  #[inline]
  pub fn bytes(&self) -> &[u8] {
    &self.bytes[..]
  }

  /// Decodes this code point into a `u64`.
  pub fn value(&self) -> u64 {
    self
      .bytes
      .iter()
      .enumerate()
      .fold(0, |acc, (i, b)| acc | (u64::from(b & 0x7f) << (7 * i)))
  }

  /// Reads a single code point from the front of `bytes`, returning it along
  /// with the number of bytes consumed.
  ///
  /// Returns `None` if `bytes` ends before the code point does, or if the
  /// code point holds a value too large for a `u64`.
  pub fn read(bytes: &[u8]) -> Option<(CodePoint, usize)> {
    let end = bytes.iter().position(|b| b & 0x80 == 0)? + 1;
    if end > MAX_BYTES {
      return None;
    }

    // The tenth byte may only contribute the single remaining bit of a u64.
    if end == MAX_BYTES && bytes[end - 1] > 1 {
      return None;
    }

    let cp = CodePoint {
      bytes: bytes[..end].to_vec(),
    };
    Some((cp, end))
  }
}

impl From<u64> for CodePoint {
  /// Constructs a code point from an integer value.
  fn from(mut x: u64) -> Self {
    let mut bytes = Vec::with_capacity(MAX_BYTES);
    loop {
      let low = (x & 0x7f) as u8;
      x >>= 7;
      if x == 0 {
        bytes.push(low);
        break;
      }
      bytes.push(low | 0x80);
    }
    CodePoint { bytes }
  }
}
