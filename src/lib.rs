//! Lossless text compression with Huffman codes.
//!
//! ```
//! use hufpack::{Archive, HuffmanCodec};
//!
//! let codec = HuffmanCodec::new();
//! let archive = codec.compress("abracadabra")?;
//! let bytes = archive.to_bytes();
//!
//! let archive = Archive::from_bytes(&bytes)?;
//! assert_eq!("abracadabra", codec.decompress(&archive)?);
//! # Ok::<(), hufpack::Error>(())
//! ```

pub mod archive;
pub mod bit;
pub mod book;
pub mod codec;
pub mod config;
pub mod error;
pub mod freq;
pub mod math;
pub mod pack;
pub mod store;
pub mod tree;
pub mod vie;

pub use archive::Archive;
pub use codec::HuffmanCodec;
pub use error::{Error, Result};
