//! Settings for the command line front end.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Where the front end puts the files it produces.
///
/// Loaded from YAML; any missing key takes its default.
///
/// ```yaml
/// output-dir: downloads
/// archive-name: compressed.huff
/// text-name: decompressed.txt
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
  /// Directory for compressed and decompressed output.
  pub output_dir: PathBuf,

  /// File name of compressed archives.
  pub archive_name: String,

  /// File name of decompressed text.
  pub text_name: String,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      output_dir: PathBuf::from("downloads"),
      archive_name: "compressed.huff".to_string(),
      text_name: "decompressed.txt".to_string(),
    }
  }
}

impl Config {
  /// Loads a configuration file.
  pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let file = File::open(path)
      .with_context(|| format!("failed to open config {}", path.display()))?;
    let config = serde_yaml::from_reader(file)
      .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
  }

  /// The default location for a compressed archive.
  pub fn archive_path(&self) -> PathBuf {
    self.output_dir.join(&self.archive_name)
  }

  /// The default location for decompressed text.
  pub fn text_path(&self) -> PathBuf {
    self.output_dir.join(&self.text_name)
  }
}
