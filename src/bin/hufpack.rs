use anyhow::{Context, Result};
use hufpack::config::Config;
use hufpack::store::{FileSink, FileSource, Sink};
use hufpack::{Archive, HuffmanCodec};
use log::info;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "hufpack", about = "A Huffman compression utility for text")]
struct Opt {
  /// Decompress an archive instead of compressing text
  #[structopt(short, long)]
  decompress: bool,

  /// Compress the file then decompress the result
  #[structopt(long, conflicts_with = "decompress")]
  roundtrip: bool,

  /// Print the Huffman tree of the archive as JSON
  #[structopt(long)]
  tree: bool,

  /// Log pipeline details
  #[structopt(short, long)]
  verbose: bool,

  /// Path to a YAML configuration file
  #[structopt(short, long)]
  config: Option<PathBuf>,

  /// Output file
  #[structopt(short)]
  out_file: Option<PathBuf>,

  /// Path to the input file
  file: PathBuf,
}

impl Opt {
  fn output_file_path(&self, default: PathBuf) -> PathBuf {
    self.out_file.clone().unwrap_or(default)
  }
}

fn print_tree(archive: &Archive) -> Result<()> {
  let json = serde_json::to_string_pretty(&archive.tree)?;
  println!("{}", json);
  Ok(())
}

fn compress(opt: &Opt, config: &Config) -> Result<PathBuf> {
  let source = FileSource::new(&opt.file);
  let mut sink = FileSink::new(opt.output_file_path(config.archive_path()));
  let archive = HuffmanCodec::new()
    .compress_from(&source, &mut sink)
    .with_context(|| {
      format!("failed to compress {}", source.path().display())
    })?;
  if opt.tree {
    print_tree(&archive)?;
  }
  info!("compressed file saved to {}", sink.path().display());
  Ok(sink.path().to_path_buf())
}

fn decompress_error(e: hufpack::Error, path: &Path) -> anyhow::Error {
  let what = if e.is_corruption() {
    "archive is damaged"
  } else {
    "failed to decompress"
  };
  anyhow::Error::new(e).context(format!("{} {}", what, path.display()))
}

fn decompress(opt: &Opt, config: &Config, input: &Path) -> Result<()> {
  let source = FileSource::new(input);
  let mut sink = FileSink::new(opt.output_file_path(config.text_path()));
  let codec = HuffmanCodec::new();

  let archive = codec
    .read_archive(&source)
    .map_err(|e| decompress_error(e, source.path()))?;
  // Printed before decoding so a damaged payload still shows its tree.
  if opt.tree {
    print_tree(&archive)?;
  }
  let text = codec
    .decompress(&archive)
    .map_err(|e| decompress_error(e, source.path()))?;

  sink.write(text.as_bytes())?;
  info!("decompressed file saved to {}", sink.path().display());
  Ok(())
}

fn main() -> Result<()> {
  let opt = Opt::from_args();

  let level = if opt.verbose { "debug" } else { "info" };
  let env = env_logger::Env::default().default_filter_or(level);
  env_logger::Builder::from_env(env).init();

  let config = match &opt.config {
    Some(path) => Config::from_path(path)?,
    None => Config::default(),
  };

  if opt.decompress {
    decompress(&opt, &config, &opt.file)
  } else if opt.roundtrip {
    let archive = compress(&opt, &config)?;
    // The text always goes to the configured location in this mode.
    let opt = Opt {
      out_file: None,
      tree: false,
      ..opt
    };
    decompress(&opt, &config, &archive)
  } else {
    compress(&opt, &config).map(|_| ())
  }
}
