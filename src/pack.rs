//! Packing encoded text into bytes.
//!
//! A packed payload is laid out as follows:
//!
//! ```text
//! +--------+-----------------------------+
//! | header | content bits + zero padding |
//! +--------+-----------------------------+
//!   1 byte   1 or more bytes
//! ```
//!
//! The header's unsigned value is the number of padding bits at the end of
//! the content. Padding is always between 1 and 8 bits, so text whose code
//! length is already a multiple of 8 gets a whole byte of padding.

use crate::bit::{BitVec, BitVecExt};
use crate::book::CodeBook;
use crate::error::{Error, Result};
use crate::math;
use log::debug;

/// Header byte plus encoded content, padded to a byte boundary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PackedPayload {
  bytes: Vec<u8>,
}

impl PackedPayload {
  /// Wraps raw payload bytes without checking them. Problems surface when
  /// the payload is unpacked.
  pub fn from_bytes(bytes: Vec<u8>) -> Self {
    PackedPayload { bytes }
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  pub fn into_bytes(self) -> Vec<u8> {
    self.bytes
  }

  /// The number of bytes in the payload, header included.
  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  /// The padding count recorded in the header.
  pub fn padding(&self) -> Option<u8> {
    self.bytes.first().copied()
  }

  /// Strips the header and padding, returning the encoded bits.
  pub fn unpack(&self) -> Result<BitVec> {
    let (&padding, content) = match self.bytes.split_first() {
      Some((_, [])) | None => {
        return Err(Error::MalformedPayload("payload shorter than 9 bits"))
      }
      Some(split) => split,
    };

    let padding = padding as usize;
    if padding == 0 || padding > 8 {
      return Err(Error::MalformedPayload("padding count out of range"));
    }

    let mut bits = BitVec::from_bytes(content);
    if padding > bits.len() {
      return Err(Error::MalformedPayload("padding exceeds content"));
    }

    let len = bits.len() - padding;
    if bits.iter().skip(len).any(|b| b) {
      return Err(Error::MalformedPayload("nonzero padding bits"));
    }
    bits.truncate(len);
    Ok(bits)
  }
}

/// Concatenates the code of every symbol in `text`.
pub fn encode(text: &str, book: &CodeBook) -> Result<BitVec> {
  let mut bits = BitVec::new();
  for c in text.chars() {
    let code = book.code(c).ok_or(Error::UnknownSymbol(c))?;
    bits.extend_from(code);
  }
  Ok(bits)
}

/// Encodes `text` and packs the result behind a padding header.
pub fn pack(text: &str, book: &CodeBook) -> Result<PackedPayload> {
  let bits = encode(text, book)?;
  Ok(pack_bits(bits))
}

/// Pads `bits` to a byte boundary and prefixes the padding header.
pub fn pack_bits(mut bits: BitVec) -> PackedPayload {
  let len = bits.len();
  let padding = math::padding_bits(len);
  bits.zext_or_trunc(len + padding);

  let mut bytes = Vec::with_capacity(1 + math::div_ceil(bits.len(), 8));
  bytes.push(padding as u8);
  bytes.extend(bits.to_bytes());
  debug!(
    "packed {} bits with {} bits of padding into {} bytes",
    len,
    padding,
    bytes.len()
  );
  PackedPayload { bytes }
}
