/// Executable to build the co-authorship network from a Scopus export.

use std::path::PathBuf;

use structopt::StructOpt;
use anyhow::Result;
use log::{info, warn};

use scopus_network_tools::affil::{TrailingCountry, DEFAULT_COUNTRY_PATTERN};
use scopus_network_tools::io::{expand_inputs, write_json};
use scopus_network_tools::logging::init_logging;
use scopus_network_tools::network::{build_network, NetworkOptions};
use scopus_network_tools::records::{Publication, ReadOptions};

#[derive(Debug, StructOpt)]
#[structopt(name="author-network")]
struct NetworkCommand {
  /// Path to the output file.
  #[structopt(short="o", long="output-file", default_value="data/author_network.json")]
  output: PathBuf,

  /// Separator between names in the Authors column.
  #[structopt(long="author-separator", default_value=",")]
  author_separator: String,

  /// Regular expression matching the country at the end of an affiliation.
  #[structopt(long="country-pattern")]
  country_pattern: Option<String>,

  /// Drop links to authors with no known country.
  #[structopt(long="prune-orphans")]
  prune_orphans: bool,

  /// CSV field delimiter.
  #[structopt(short="d", long="delimiter", default_value=",")]
  delimiter: char,

  /// Enable debug logging.
  #[structopt(short="v", long="verbose")]
  verbose: bool,

  /// Input CSV files or glob patterns.
  inputs: Vec<String>
}

fn main() -> Result<()> {
  let cmd = NetworkCommand::from_args();
  init_logging(cmd.verbose);

  let parser = match cmd.country_pattern {
    Some(ref pat) => {
      info!("using country pattern {}", pat);
      TrailingCountry::with_pattern(pat)?
    },
    None => TrailingCountry::with_pattern(DEFAULT_COUNTRY_PATTERN)?
  };
  let read_opts = ReadOptions::with_delimiter(cmd.delimiter)?;
  let options = NetworkOptions::new(&cmd.author_separator, cmd.prune_orphans)?;
  let inputs = if cmd.inputs.is_empty() {
    vec!["data/data_scopus.csv".to_owned()]
  } else {
    cmd.inputs.clone()
  };
  let files = expand_inputs(&inputs)?;
  let pubs = Publication::read_all(&files, &read_opts)?;

  let (net, stats) = build_network(&pubs, &parser, options);
  if stats.skipped > 0 {
    warn!("skipped {} of {} records with no authors", stats.skipped, stats.records);
  }
  if cmd.prune_orphans {
    info!("pruned {} links to authors without a country", stats.pruned);
  }
  info!("network has {} nodes and {} links", stats.nodes, stats.links);

  write_json(&cmd.output, &net)?;
  Ok(())
}
