//! Where compressor input comes from and where its output goes.

use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Supplies the complete input of an operation.
pub trait Source {
  /// Reads everything the source holds.
  ///
  /// Sources backed by a location report a missing location as
  /// [`Error::SourceNotFound`].
  fn read(&self) -> Result<Vec<u8>>;
}

/// Accepts the complete output of an operation.
pub trait Sink {
  fn write(&mut self, bytes: &[u8]) -> Result<()>;
}

impl Source for [u8] {
  fn read(&self) -> Result<Vec<u8>> {
    Ok(self.to_vec())
  }
}

impl Source for Vec<u8> {
  fn read(&self) -> Result<Vec<u8>> {
    Ok(self.clone())
  }
}

impl Source for str {
  fn read(&self) -> Result<Vec<u8>> {
    Ok(self.as_bytes().to_vec())
  }
}

/// Collects output in memory, replacing anything written before.
impl Sink for Vec<u8> {
  fn write(&mut self, bytes: &[u8]) -> Result<()> {
    self.clear();
    self.extend_from_slice(bytes);
    Ok(())
  }
}

/// A file on disk to read input from.
#[derive(Clone, Debug)]
pub struct FileSource {
  path: PathBuf,
}

impl FileSource {
  pub fn new<P: Into<PathBuf>>(path: P) -> Self {
    FileSource { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl Source for FileSource {
  fn read(&self) -> Result<Vec<u8>> {
    match fs::read(&self.path) {
      Ok(bytes) => {
        debug!("read {} bytes from {}", bytes.len(), self.path.display());
        Ok(bytes)
      }
      Err(e) if e.kind() == ErrorKind::NotFound => {
        Err(Error::SourceNotFound(self.path.clone()))
      }
      Err(e) => Err(e.into()),
    }
  }
}

/// A file on disk to write output to.
///
/// Missing parent directories are created on write and an existing file is
/// replaced.
#[derive(Clone, Debug)]
pub struct FileSink {
  path: PathBuf,
}

impl FileSink {
  pub fn new<P: Into<PathBuf>>(path: P) -> Self {
    FileSink { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl Sink for FileSink {
  fn write(&mut self, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = self.path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
      }
    }
    fs::write(&self.path, bytes)?;
    debug!("wrote {} bytes to {}", bytes.len(), self.path.display());
    Ok(())
  }
}
