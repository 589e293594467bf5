//! This module defines the binary representation of compressed archives.
//!
//! An archive holds exactly two things: the Huffman tree used to encode the
//! text and the packed payload. All integers are stored as
//! [variable-width code points](../vie/struct.CodePoint.html).
//!
//! ```text
//! magic      "HUFP"
//! version    0x01
//! tree       pre-order, one tag byte per node:
//!              0x00 <weight> <symbol>   leaf
//!              0x01 <left> <right>      internal
//! payload    <length> <bytes>
//! ```
//!
//! Internal node weights are not stored. They are recomputed from the leaves
//! when reading.

use crate::error::{Error, Result};
use crate::pack::PackedPayload;
use crate::tree::{HuffmanTree, Node};
use crate::vie::CodePoint;
use log::debug;
use std::collections::HashSet;
use std::convert::TryFrom;

#[cfg(test)]
mod test;

/// Marks the start of every archive.
pub const MAGIC: &[u8; 4] = b"HUFP";

/// The only format version this crate reads and writes.
pub const VERSION: u8 = 1;

/// Deeper trees than this are rejected as corrupt. Huffman trees with `u64`
/// weights never get close.
const MAX_DEPTH: usize = 128;

const LEAF: u8 = 0;
const INTERNAL: u8 = 1;

/// A Huffman tree together with the payload it encodes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Archive {
  pub tree: HuffmanTree,
  pub payload: PackedPayload,
}

impl Archive {
  pub fn new(tree: HuffmanTree, payload: PackedPayload) -> Self {
    Archive { tree, payload }
  }

  /// Serializes this archive.
  pub fn to_bytes(&self) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(MAGIC.len() + 1 + self.payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.push(VERSION);
    write_node(&mut bytes, self.tree.root());
    write_int(&mut bytes, self.payload.len() as u64);
    bytes.extend_from_slice(self.payload.as_bytes());
    debug!(
      "serialized archive: {} bytes, {} of payload",
      bytes.len(),
      self.payload.len()
    );
    bytes
  }

  /// Deserializes an archive, checking its structure along the way.
  ///
  /// The payload bytes are not inspected here; that happens in
  /// `PackedPayload::unpack`.
  pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
    let mut reader = Reader::new(bytes);
    if reader.take(MAGIC.len())? != MAGIC {
      return Err(Error::CorruptArchive("not an archive"));
    }
    if reader.byte()? != VERSION {
      return Err(Error::CorruptArchive("unsupported archive version"));
    }

    let mut seen = HashSet::new();
    let root = read_node(&mut reader, &mut seen, 0)?;

    let len = usize::try_from(reader.int()?)
      .map_err(|_| Error::CorruptArchive("payload length out of range"))?;
    let payload = PackedPayload::from_bytes(reader.take(len)?.to_vec());

    if !reader.is_done() {
      return Err(Error::CorruptArchive("trailing bytes after payload"));
    }

    Ok(Archive {
      tree: HuffmanTree::new(root),
      payload,
    })
  }
}

fn write_int(bytes: &mut Vec<u8>, value: u64) {
  bytes.extend_from_slice(CodePoint::from(value).bytes());
}

fn write_node(bytes: &mut Vec<u8>, node: &Node) {
  match node {
    Node::Leaf { symbol, weight } => {
      bytes.push(LEAF);
      write_int(bytes, *weight);
      write_int(bytes, u64::from(*symbol as u32));
    }
    Node::Internal { left, right, .. } => {
      bytes.push(INTERNAL);
      write_node(bytes, left);
      write_node(bytes, right);
    }
  }
}

fn read_node(
  reader: &mut Reader<'_>,
  seen: &mut HashSet<char>,
  depth: usize,
) -> Result<Node> {
  if depth > MAX_DEPTH {
    return Err(Error::CorruptArchive("tree too deep"));
  }

  match reader.byte()? {
    LEAF => {
      let weight = reader.int()?;
      if weight == 0 {
        return Err(Error::CorruptArchive("leaf with zero weight"));
      }
      let symbol = u32::try_from(reader.int()?)
        .ok()
        .and_then(std::char::from_u32)
        .ok_or(Error::CorruptArchive("invalid symbol"))?;
      if !seen.insert(symbol) {
        return Err(Error::CorruptArchive("duplicate symbol"));
      }
      Ok(Node::leaf(symbol, weight))
    }
    INTERNAL => {
      let left = read_node(reader, seen, depth + 1)?;
      let right = read_node(reader, seen, depth + 1)?;
      Node::merge(left, right)
        .ok_or(Error::CorruptArchive("tree weight overflow"))
    }
    _ => Err(Error::CorruptArchive("unknown node tag")),
  }
}

/// Cursor over the bytes of an archive. Running out of bytes is always
/// reported as a corrupt archive.
struct Reader<'a> {
  bytes: &'a [u8],
}

impl<'a> Reader<'a> {
  fn new(bytes: &'a [u8]) -> Self {
    Reader { bytes }
  }

  fn is_done(&self) -> bool {
    self.bytes.is_empty()
  }

  fn take(&mut self, n: usize) -> Result<&'a [u8]> {
    if n > self.bytes.len() {
      return Err(Error::CorruptArchive("unexpected end of archive"));
    }
    let (head, tail) = self.bytes.split_at(n);
    self.bytes = tail;
    Ok(head)
  }

  fn byte(&mut self) -> Result<u8> {
    Ok(self.take(1)?[0])
  }

  fn int(&mut self) -> Result<u64> {
    let (cp, used) = CodePoint::read(self.bytes)
      .ok_or(Error::CorruptArchive("bad integer encoding"))?;
    self.bytes = &self.bytes[used..];
    Ok(cp.value())
  }
}
