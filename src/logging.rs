//! Logging setup for the command-line tools.

use env_logger::{Builder, Env};

/// Initialize logging to stderr.
///
/// The default level is `info`, or `debug` if `verbose` is set; `RUST_LOG`
/// overrides either.
pub fn init_logging(verbose: bool) {
  let level = if verbose { "debug" } else { "info" };
  Builder::from_env(Env::default().default_filter_or(level)).init();
}
