/// Executable to tabulate the most common affiliation countries.

use std::path::PathBuf;

use structopt::StructOpt;
use anyhow::Result;
use log::info;

use scopus_network_tools::affil::{TrailingCountry, DEFAULT_COUNTRY_PATTERN};
use scopus_network_tools::countries::{top_countries, DEFAULT_LIMIT};
use scopus_network_tools::io::{expand_inputs, write_json};
use scopus_network_tools::logging::init_logging;
use scopus_network_tools::records::{Publication, ReadOptions};

#[derive(Debug, StructOpt)]
#[structopt(name="top-countries")]
struct TopCommand {
  /// Path to the output file.
  #[structopt(short="o", long="output-file", default_value="data/top_countries.json")]
  output: PathBuf,

  /// Number of countries to keep.
  #[structopt(short="n", long="limit")]
  limit: Option<usize>,

  /// Regular expression matching the country at the end of an affiliation.
  #[structopt(long="country-pattern")]
  country_pattern: Option<String>,

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
  let cmd = TopCommand::from_args();
  init_logging(cmd.verbose);

  let pattern = cmd.country_pattern.as_deref().unwrap_or(DEFAULT_COUNTRY_PATTERN);
  let parser = TrailingCountry::with_pattern(pattern)?;
  let read_opts = ReadOptions::with_delimiter(cmd.delimiter)?;
  let inputs = if cmd.inputs.is_empty() {
    vec!["data/data_scopus.csv".to_owned()]
  } else {
    cmd.inputs.clone()
  };
  let files = expand_inputs(&inputs)?;
  let pubs = Publication::read_all(&files, &read_opts)?;

  let limit = cmd.limit.unwrap_or(DEFAULT_LIMIT);
  let top = top_countries(&pubs, &parser, limit);
  for (country, count) in &top.entries {
    info!("{:>24}: {}", country, count);
  }

  write_json(&cmd.output, &top)?;
  Ok(())
}
