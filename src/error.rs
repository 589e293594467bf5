//! Error types shared by every stage of the compression pipeline.

use std::error;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;
use std::path::PathBuf;
use std::str::Utf8Error;

/// Result type returned by the compression pipeline.
pub type Result<T> = std::result::Result<T, Error>;

/// The ways in which compressing or decompressing can fail.
///
/// None of these are recovered from inside the pipeline. Corrupt or malformed
/// input is reported as-is rather than producing partial output.
#[derive(Debug)]
pub enum Error {
  /// There are no symbols to build a code from.
  EmptyAlphabet,

  /// Symbol counts add up to more than a `u64` can hold.
  WeightOverflow,

  /// The code book has no code for a symbol found in the text.
  UnknownSymbol(char),

  /// A packed payload is too short or carries an invalid padding count.
  MalformedPayload(&'static str),

  /// An archive could not be deserialized or its bits do not decode cleanly.
  CorruptArchive(&'static str),

  /// An input collaborator has nothing at the requested location.
  SourceNotFound(PathBuf),

  /// The input bytes are not valid UTF-8 text.
  InvalidText(Utf8Error),

  /// Any other I/O failure while reading or writing.
  Io(io::Error),
}

impl Error {
  /// True if this error was caused by damaged compressed data, as opposed to
  /// bad input text or an I/O problem.
  pub fn is_corruption(&self) -> bool {
    matches!(self, Error::MalformedPayload(_) | Error::CorruptArchive(_))
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    use Error::*;
    match self {
      EmptyAlphabet => write!(f, "cannot build a code for empty input"),
      WeightOverflow => write!(f, "symbol counts overflow a u64"),
      UnknownSymbol(c) => write!(f, "no code for symbol {:?}", c),
      MalformedPayload(reason) => write!(f, "malformed payload: {}", reason),
      CorruptArchive(reason) => write!(f, "corrupt archive: {}", reason),
      SourceNotFound(path) => write!(f, "{} was not found", path.display()),
      InvalidText(e) => write!(f, "input is not valid utf-8: {}", e),
      Io(e) => write!(f, "i/o error: {}", e),
    }
  }
}

impl error::Error for Error {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      Error::InvalidText(e) => Some(e),
      Error::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for Error {
  fn from(e: io::Error) -> Self {
    Error::Io(e)
  }
}

impl From<Utf8Error> for Error {
  fn from(e: Utf8Error) -> Self {
    Error::InvalidText(e)
  }
}
