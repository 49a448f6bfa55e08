//! Input and output helpers shared by the binaries.

use std::fs::File;
use std::io::prelude::*;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Create a byte-count progress bar in our standard style.
pub fn make_progress() -> ProgressBar {
  let pb = ProgressBar::new(0);
  let style = ProgressStyle::default_bar()
    .template("{prefix:16}: {bar:25} {bytes}/{total_bytes} (eta {eta})");
  pb.set_style(style);
  pb
}

fn is_gzip(path: &Path) -> bool {
  path.extension().map_or(false, |e| e == "gz")
}

/// Open a file for reading, decompressing it if it ends in `.gz`.
///
/// Progress is reported in compressed bytes.
pub fn open_gzin(path: &Path, pb: &ProgressBar) -> Result<Box<dyn BufRead>> {
  let file = File::open(path).with_context(|| format!("cannot open {:?}", path))?;
  pb.set_length(file.metadata()?.len());
  let pbr = pb.wrap_read(file);
  if is_gzip(path) {
    Ok(Box::new(BufReader::new(MultiGzDecoder::new(pbr))))
  } else {
    Ok(Box::new(BufReader::new(pbr)))
  }
}

/// An output file, possibly gzip-compressed.
///
/// Call [OutFile::finish] when done; dropping it discards write errors.
pub enum OutFile {
  Plain(BufWriter<File>),
  Gzip(GzEncoder<BufWriter<File>>)
}

impl OutFile {
  /// Complete the gzip stream, if any, and flush everything to the file.
  pub fn finish(self) -> io::Result<()> {
    match self {
      OutFile::Plain(mut out) => out.flush(),
      OutFile::Gzip(enc) => enc.finish()?.flush()
    }
  }
}

impl Write for OutFile {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    match self {
      OutFile::Plain(out) => out.write(buf),
      OutFile::Gzip(enc) => enc.write(buf)
    }
  }

  fn flush(&mut self) -> io::Result<()> {
    match self {
      OutFile::Plain(out) => out.flush(),
      OutFile::Gzip(enc) => enc.flush()
    }
  }
}

/// Open a file for writing, compressing it if it ends in `.gz`.
pub fn open_gzout(path: &Path) -> Result<OutFile> {
  let file = File::create(path).with_context(|| format!("cannot create {:?}", path))?;
  let out = BufWriter::new(file);
  if is_gzip(path) {
    Ok(OutFile::Gzip(GzEncoder::new(out, Compression::default())))
  } else {
    Ok(OutFile::Plain(out))
  }
}

/// Write a value as JSON indented by four spaces.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
  let mut out = open_gzout(path)?;
  let fmt = PrettyFormatter::with_indent(b"    ");
  let mut ser = serde_json::Serializer::with_formatter(&mut out, fmt);
  value.serialize(&mut ser)
    .with_context(|| format!("cannot write {:?}", path))?;
  out.finish().with_context(|| format!("cannot finish writing {:?}", path))?;
  info!("wrote {:?}", path);
  Ok(())
}

/// Expand input arguments into file paths.
///
/// Arguments naming an existing file are used as-is; anything else is a
/// glob pattern whose matches are taken in sorted order.  A pattern that
/// matches nothing is an error.
pub fn expand_inputs<S: AsRef<str>>(args: &[S]) -> Result<Vec<PathBuf>> {
  let mut files = Vec::new();
  for arg in args {
    let arg = arg.as_ref();
    let path = Path::new(arg);
    if path.is_file() {
      files.push(path.to_path_buf());
      continue;
    }

    let mut matched: Vec<PathBuf> = Vec::new();
    for entry in glob::glob(arg).with_context(|| format!("invalid input pattern {}", arg))? {
      matched.push(entry?);
    }
    if matched.is_empty() {
      return Err(anyhow!("no input files match {}", arg));
    }
    matched.sort();
    debug!("pattern {} matched {} files", arg, matched.len());
    files.extend(matched);
  }
  Ok(files)
}
