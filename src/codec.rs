//! The full compression pipeline.

use crate::archive::Archive;
use crate::book::CodeBook;
use crate::error::{Error, Result};
use crate::freq::FrequencyTable;
use crate::pack;
use crate::store::{Sink, Source};
use crate::tree::{HuffmanTree, Node};
use log::debug;
use std::str;

/// Compresses text into archives and back.
///
/// The codec keeps no state between calls: every code book and tree is built
/// for, and owned by, a single operation. Codecs uphold the following
/// invariant for all non-empty text `x`:
///
/// ```text
/// decompress(compress(x)) == x
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct HuffmanCodec;

impl HuffmanCodec {
  pub fn new() -> Self {
    HuffmanCodec
  }

  /// Compresses `text` into an archive.
  ///
  /// Fails with [`Error::EmptyAlphabet`] if `text` is empty.
  pub fn compress(&self, text: &str) -> Result<Archive> {
    let table = FrequencyTable::from_text(text);
    let tree = HuffmanTree::from_frequencies(&table)?;
    debug!(
      "compressing {} symbols, {} distinct",
      tree.weight(),
      table.len()
    );
    let book = CodeBook::from_tree(&tree);
    let payload = pack::pack(text, &book)?;
    Ok(Archive::new(tree, payload))
  }

  /// Recovers the text held in `archive`.
  pub fn decompress(&self, archive: &Archive) -> Result<String> {
    let bits = archive.payload.unpack()?;
    let text = walk(archive.tree.root(), bits.iter())?;
    debug!("decoded {} bits into {} bytes of text", bits.len(), text.len());
    Ok(text)
  }

  /// Reads text from `source`, compresses it and writes the serialized
  /// archive to `sink`. Returns the archive that was written.
  pub fn compress_from<S, W>(&self, source: &S, sink: &mut W) -> Result<Archive>
  where
    S: Source + ?Sized,
    W: Sink + ?Sized,
  {
    let bytes = source.read()?;
    let text = str::from_utf8(&bytes)?;
    let archive = self.compress(text)?;
    sink.write(&archive.to_bytes())?;
    Ok(archive)
  }

  /// Reads and deserializes an archive from `source` without decoding it.
  pub fn read_archive<S>(&self, source: &S) -> Result<Archive>
  where
    S: Source + ?Sized,
  {
    let bytes = source.read()?;
    Archive::from_bytes(&bytes)
  }

  /// Reads a serialized archive from `source`, decompresses it and writes
  /// the text to `sink`. Returns the text that was written.
  pub fn decompress_from<S, W>(
    &self,
    source: &S,
    sink: &mut W,
  ) -> Result<String>
  where
    S: Source + ?Sized,
    W: Sink + ?Sized,
  {
    let archive = self.read_archive(source)?;
    let text = self.decompress(&archive)?;
    sink.write(text.as_bytes())?;
    Ok(text)
  }
}

/// Decodes `bits` by walking the tree from `root`: left on 0, right on 1.
/// Reaching a leaf emits its symbol and starts over at the root.
///
/// A lone leaf root reads every 0 bit as one occurrence of its symbol.
///
/// The walk must end back at the root, and the number of symbols emitted
/// must match the weight of the root.
fn walk<I: Iterator<Item = bool>>(root: &Node, bits: I) -> Result<String> {
  let mut text = String::new();
  let mut emitted = 0u64;
  let mut node = root;

  for bit in bits {
    node = match (node, bit) {
      (Node::Leaf { .. }, true) => {
        return Err(Error::CorruptArchive("one bit in single symbol stream"))
      }
      (Node::Leaf { .. }, false) => node,
      (Node::Internal { left, .. }, false) => &**left,
      (Node::Internal { right, .. }, true) => &**right,
    };

    if let Node::Leaf { symbol, .. } = node {
      text.push(*symbol);
      emitted += 1;
      node = root;
    }
  }

  if !std::ptr::eq(node, root) {
    return Err(Error::CorruptArchive("bits end part way through a code"));
  }
  if emitted != root.weight() {
    return Err(Error::CorruptArchive("decoded length does not match tree"));
  }
  Ok(text)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::pack::PackedPayload;
  use crate::store::{FileSink, FileSource};
  use proptest::prelude::*;
  use std::{env, fs, process};

  fn roundtrip(text: &str) -> String {
    let codec = HuffmanCodec::new();
    let archive = codec.compress(text).unwrap();
    codec.decompress(&archive).unwrap()
  }

  #[test]
  fn abracadabra_roundtrip() {
    assert_eq!("abracadabra", roundtrip("abracadabra"));
  }

  #[test]
  fn single_symbol_roundtrip() {
    assert_eq!("aaaa", roundtrip("aaaa"));
    assert_eq!("a", roundtrip("a"));
    assert_eq!("aaaaaaaa", roundtrip("aaaaaaaa"));
  }

  #[test]
  fn multi_byte_symbols_roundtrip() {
    let text = "naïve café ☕ 日本語\n\ttabs";
    assert_eq!(text, roundtrip(text));
  }

  #[test]
  fn empty_text_is_an_error() {
    let result = HuffmanCodec::new().compress("");
    assert!(matches!(result, Err(Error::EmptyAlphabet)));
  }

  #[test]
  fn one_codec_many_operations() {
    let codec = HuffmanCodec::new();
    let first = codec.compress("first text").unwrap();
    let second = codec.compress("zzz").unwrap();
    assert_eq!("zzz", codec.decompress(&second).unwrap());
    assert_eq!("first text", codec.decompress(&first).unwrap());
  }

  #[test]
  fn truncated_content_is_detected() {
    let codec = HuffmanCodec::new();
    let mut archive = codec.compress("abracadabra").unwrap();
    let mut bytes = archive.payload.into_bytes();
    bytes.pop();
    archive.payload = PackedPayload::from_bytes(bytes);
    let err = codec.decompress(&archive).unwrap_err();
    assert!(err.is_corruption(), "unexpected error: {}", err);
  }

  #[test]
  fn bits_ending_mid_code_are_detected() {
    let tree = HuffmanTree::from_text("abracadabra").unwrap();
    // "0" (a) followed by "10" which stops inside the subtree of c and d
    let bits = vec![false, true, false];
    let result = walk(tree.root(), bits.into_iter());
    assert!(matches!(result, Err(Error::CorruptArchive(_))));
  }

  #[test]
  fn one_bit_for_single_symbol_is_detected() {
    let tree = HuffmanTree::from_text("aaaa").unwrap();
    let result = walk(tree.root(), vec![false, true].into_iter());
    assert!(matches!(result, Err(Error::CorruptArchive(_))));
  }

  #[test]
  fn extra_symbols_are_detected() {
    let tree = HuffmanTree::from_text("aa").unwrap();
    let result = walk(tree.root(), vec![false; 3].into_iter());
    assert!(matches!(result, Err(Error::CorruptArchive(_))));
  }

  #[test]
  fn invalid_utf8_source() {
    let source: &[u8] = &[0x61, 0xff];
    let mut sink = Vec::<u8>::new();
    let result = HuffmanCodec::new().compress_from(source, &mut sink);
    assert!(matches!(result, Err(Error::InvalidText(_))));
    assert!(sink.is_empty());
  }

  #[test]
  fn in_memory_roundtrip() {
    let codec = HuffmanCodec::new();
    let mut archive = Vec::<u8>::new();
    codec.compress_from("hello world", &mut archive).unwrap();
    let mut text = Vec::<u8>::new();
    codec.decompress_from(&archive, &mut text).unwrap();
    assert_eq!(b"hello world".to_vec(), text);
  }

  #[test]
  fn file_roundtrip() {
    let dir = env::temp_dir().join(format!("hufpack-codec-{}", process::id()));
    let input = dir.join("uploads").join("input.txt");
    let archive = dir.join("downloads").join("compressed.huff");
    let output = dir.join("downloads").join("decompressed.txt");
    FileSink::new(&input).write(b"the quick brown fox").unwrap();

    let codec = HuffmanCodec::new();
    codec
      .compress_from(&FileSource::new(&input), &mut FileSink::new(&archive))
      .unwrap();
    codec
      .decompress_from(&FileSource::new(&archive), &mut FileSink::new(&output))
      .unwrap();

    assert_eq!("the quick brown fox", fs::read_to_string(&output).unwrap());
    fs::remove_dir_all(dir).unwrap();
  }

  #[test]
  fn missing_input_file() {
    let path = env::temp_dir().join("hufpack-codec-missing").join("in.txt");
    let result = HuffmanCodec::new()
      .compress_from(&FileSource::new(&path), &mut Vec::<u8>::new());
    assert!(matches!(result, Err(Error::SourceNotFound(_))));
  }

  #[test]
  fn read_archive_missing_file() {
    let path = env::temp_dir().join("hufpack-codec-missing").join("a.huff");
    let result = HuffmanCodec::new().read_archive(&FileSource::new(&path));
    assert!(matches!(result, Err(Error::SourceNotFound(_))));
  }

  #[test]
  fn read_archive_does_not_decode() {
    let codec = HuffmanCodec::new();
    let archive = codec.compress("abracadabra").unwrap();
    let bytes = archive.to_bytes();
    assert_eq!(archive, codec.read_archive(&bytes).unwrap());
  }

  proptest! {
    #[test]
    fn prop_roundtrip(s in "\\PC{1,300}") {
      prop_assert_eq!(&s, &roundtrip(&s));
    }

    #[test]
    fn prop_roundtrip_with_newlines(s in "(?s).{1,100}") {
      prop_assert_eq!(&s, &roundtrip(&s));
    }
  }
}
