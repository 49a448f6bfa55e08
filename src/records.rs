/// This module contains logic for reading Scopus CSV exports.

use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Serialize, Deserialize};

use crate::io::{make_progress, open_gzin};

/// Header of the author list column.
pub const AUTHORS_COLUMN: &str = "Authors";
/// Header of the author-affiliation column.
pub const AFFILIATIONS_COLUMN: &str = "Authors with affiliations";

/// Publication record from a Scopus export.  Other columns are ignored.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Publication {
  #[serde(rename = "Authors")]
  pub authors: Option<String>,
  #[serde(rename = "Authors with affiliations")]
  pub authors_with_affiliations: Option<String>
}

/// Options for reading input tables.
#[derive(Debug, Clone)]
pub struct ReadOptions {
  pub delimiter: u8
}

impl Default for ReadOptions {
  fn default() -> ReadOptions {
    ReadOptions { delimiter: b',' }
  }
}

impl ReadOptions {
  /// Set the delimiter from a character, which must be ASCII.
  pub fn with_delimiter(delim: char) -> Result<ReadOptions> {
    if !delim.is_ascii() {
      return Err(anyhow!("delimiter {:?} is not an ASCII character", delim));
    }
    Ok(ReadOptions { delimiter: delim as u8 })
  }
}

impl Publication {
  /// Read publications from CSV data.
  ///
  /// Fails if either of the two required columns is absent.  Empty cells
  /// come through as `None`.
  pub fn read_from<R: Read>(src: R, opts: &ReadOptions) -> Result<Vec<Publication>> {
    let mut read = csv::ReaderBuilder::new()
      .delimiter(opts.delimiter)
      .from_reader(src);

    // exports from Windows tools often start with a byte-order mark
    let headers: csv::StringRecord = read.headers()?.iter()
      .map(|h| h.trim_start_matches('\u{feff}'))
      .collect();
    read.set_headers(headers.clone());
    for col in &[AUTHORS_COLUMN, AFFILIATIONS_COLUMN] {
      if !headers.iter().any(|h| h == *col) {
        return Err(anyhow!("missing column {:?}", col));
      }
    }

    let mut pubs = Vec::new();
    for line in read.deserialize() {
      let record: Publication = line?;
      pubs.push(record);
    }

    Ok(pubs)
  }

  /// Read in publications from a CSV file, which may be gzip-compressed.
  pub fn read_csv<P: AsRef<Path>>(path: P, opts: &ReadOptions) -> Result<Vec<Publication>> {
    let path = path.as_ref();
    let pb = make_progress();
    pb.set_prefix("publications");
    let src = open_gzin(path, &pb)?;
    let pubs = Publication::read_from(src, opts)
      .with_context(|| format!("cannot read publications from {:?}", path))?;
    pb.finish_and_clear();
    debug!("read {} publications from {:?}", pubs.len(), path);
    Ok(pubs)
  }

  /// Read and concatenate publications from several files, in order.
  pub fn read_all<P: AsRef<Path>>(paths: &[P], opts: &ReadOptions) -> Result<Vec<Publication>> {
    let mut pubs = Vec::new();
    for path in paths {
      info!("reading {:?}", path.as_ref());
      pubs.extend(Publication::read_csv(path, opts)?);
    }
    info!("loaded {} publications from {} files", pubs.len(), paths.len());
    Ok(pubs)
  }

  /// Get the trimmed, non-empty author names, splitting on `sep`.
  ///
  /// A name listed more than once is kept at its first position only.
  pub fn author_names(&self, sep: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    if let Some(ref authors) = self.authors {
      for name in authors.split(sep) {
        let name = name.trim();
        if !name.is_empty() && !names.contains(&name) {
          names.push(name);
        }
      }
    }
    names
  }
}
