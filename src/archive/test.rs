use super::*;
use crate::codec::HuffmanCodec;
use proptest::prelude::*;

fn archive_for(text: &str) -> Archive {
  HuffmanCodec::new().compress(text).unwrap()
}

fn assert_corrupt(bytes: &[u8]) {
  match Archive::from_bytes(bytes) {
    Err(Error::CorruptArchive(_)) => {}
    other => panic!("expected corrupt archive, got {:?}", other),
  }
}

#[test]
#[rustfmt::skip]
fn abracadabra_layout() {
  let bytes = archive_for("abracadabra").to_bytes();
  let expected = vec![
    b'H', b'U', b'F', b'P', VERSION,
    INTERNAL,
      LEAF, 5, b'a',
      INTERNAL,
        INTERNAL,
          LEAF, 1, b'c',
          LEAF, 1, b'd',
        INTERNAL,
          LEAF, 2, b'b',
          LEAF, 2, b'r',
    4, 0x01, 0x6e, 0x8a, 0xdc,
  ];
  assert_eq!(expected, bytes);
}

#[test]
fn single_leaf_layout() {
  let bytes = archive_for("aaaa").to_bytes();
  assert_eq!(
    vec![b'H', b'U', b'F', b'P', VERSION, LEAF, 4, b'a', 2, 0x04, 0x00],
    bytes
  );
}

#[test]
fn deserialized_archive_matches() {
  let archive = archive_for("she sells sea shells");
  let read = Archive::from_bytes(&archive.to_bytes()).unwrap();
  assert_eq!(archive, read);
}

#[test]
fn wide_symbols_use_multi_byte_integers() {
  let archive = archive_for("€€");
  let bytes = archive.to_bytes();
  // U+20AC spreads over two code point bytes.
  assert_eq!(&[LEAF, 2, 0xac, 0x41], &bytes[5..9]);
  assert_eq!(archive, Archive::from_bytes(&bytes).unwrap());
}

#[test]
fn bad_magic() {
  let mut bytes = archive_for("abc").to_bytes();
  bytes[0] = b'X';
  assert_corrupt(&bytes);
}

#[test]
fn unsupported_version() {
  let mut bytes = archive_for("abc").to_bytes();
  bytes[4] = VERSION + 1;
  assert_corrupt(&bytes);
}

#[test]
fn unknown_tag() {
  let mut bytes = archive_for("abc").to_bytes();
  bytes[5] = 7;
  assert_corrupt(&bytes);
}

#[test]
fn every_truncation_is_corrupt() {
  let bytes = archive_for("abracadabra").to_bytes();
  for len in 0..bytes.len() {
    assert_corrupt(&bytes[..len]);
  }
}

#[test]
fn trailing_bytes() {
  let mut bytes = archive_for("abc").to_bytes();
  bytes.push(0);
  assert_corrupt(&bytes);
}

#[test]
fn duplicate_symbol() {
  let bytes = vec![
    b'H', b'U', b'F', b'P', VERSION, INTERNAL, LEAF, 1, b'a', LEAF, 1, b'a', 2,
    0x07, 0x00,
  ];
  assert_corrupt(&bytes);
}

#[test]
fn zero_weight_leaf() {
  let bytes = vec![b'H', b'U', b'F', b'P', VERSION, LEAF, 0, b'a', 2, 0x07, 0];
  assert_corrupt(&bytes);
}

#[test]
fn invalid_symbol_scalar() {
  // 0xD800 is a surrogate and not a valid char.
  let bytes = vec![
    b'H', b'U', b'F', b'P', VERSION, LEAF, 1, 0x80, 0xb0, 0x03, 2, 0x07, 0,
  ];
  assert_corrupt(&bytes);
}

#[test]
fn overflowing_tree_weight() {
  let mut bytes = vec![b'H', b'U', b'F', b'P', VERSION, INTERNAL, LEAF];
  bytes.extend_from_slice(CodePoint::from(u64::MAX).bytes());
  bytes.extend_from_slice(&[b'a', LEAF, 1, b'b', 2, 0x07, 0x00]);
  match Archive::from_bytes(&bytes) {
    Err(Error::CorruptArchive(reason)) => {
      assert_eq!("tree weight overflow", reason)
    }
    other => panic!("expected corrupt archive, got {:?}", other),
  }
}

#[test]
fn overly_deep_tree() {
  let mut bytes = vec![b'H', b'U', b'F', b'P', VERSION];
  bytes.extend(std::iter::repeat(INTERNAL).take(MAX_DEPTH + 2));
  assert_corrupt(&bytes);
}

#[test]
fn corrupt_archive_file_roundtrip() {
  let codec = HuffmanCodec::new();
  let mut bytes = archive_for("abracadabra").to_bytes();
  // Drop the final content byte and fix up the payload length so only the
  // payload checks can catch it.
  bytes.pop();
  let len_index = bytes.len() - 4;
  bytes[len_index] = 3;
  let archive = Archive::from_bytes(&bytes).unwrap();
  let err = codec.decompress(&archive).unwrap_err();
  assert!(err.is_corruption());
}

proptest! {
  #[test]
  fn prop_archive_bytes_roundtrip(s in "\\PC{1,200}") {
    let codec = HuffmanCodec::new();
    let archive = codec.compress(&s).unwrap();
    let read = Archive::from_bytes(&archive.to_bytes()).unwrap();
    prop_assert_eq!(&archive, &read);
    prop_assert_eq!(s, codec.decompress(&read).unwrap());
  }
}
