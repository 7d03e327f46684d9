//! Interactive command line front end for `citegrab`.
//!
//! Prompts for a search term, downloads the best arXiv match into a
//! `{timestamp}-{title}/` folder and follows the `arXiv:` citations in its abstract into a
//! `citations/` subfolder. Type `exit` to quit.
//!
//! # Usage
//!
//! ```bash
//! # Start the prompt, writing into the current directory
//! citegrab
//!
//! # Ask for a result count every time and write somewhere else
//! citegrab --ask-count --output-dir ~/papers
//!
//! # Only the papers themselves, with debug logs on stderr
//! citegrab --no-citations -vvv
//! ```

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{fmt::Display, path::PathBuf};

use citegrab::{
  error::CitegrabError, harvest::HarvestEvent, paper::SearchResult, Config, Harvester,
};
use clap::{builder::ArgAction, Parser};
use console::style;
use tracing::trace;
use tracing_subscriber::EnvFilter;

pub mod error;
pub mod interaction;
pub mod session;
pub mod terminal;

use crate::{error::*, interaction::*, terminal::Terminal};

/// Command line interface configuration and argument parsing
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Search arXiv, download the matching paper and the arXiv papers it cites"
)]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Configuration file. Defaults to `citegrab/config.toml` in the platform config
  /// directory, when present.
  #[arg(long, short)]
  config: Option<PathBuf>,

  /// Folder to create paper folders in
  #[arg(long, short)]
  output_dir: Option<PathBuf>,

  /// Number of results to download per query
  #[arg(long, short = 'n')]
  max_results: Option<usize>,

  /// Ask for the number of results after every query
  #[arg(long)]
  ask_count: bool,

  /// Only download the papers found, not the papers they cite
  #[arg(long)]
  no_citations: bool,

  /// arXiv API endpoint
  #[arg(long)]
  api_url: Option<String>,
}

impl Cli {
  /// Layers the flags that were given on top of `config`.
  fn apply(&self, mut config: Config) -> Config {
    if let Some(output_dir) = &self.output_dir {
      config = config.with_output_dir(output_dir);
    }
    if let Some(max_results) = self.max_results {
      config = config.with_max_results(max_results);
    }
    if let Some(api_url) = &self.api_url {
      config = config.with_api_url(api_url);
    }
    if self.ask_count {
      config = config.with_prompt_for_count(true);
    }
    if self.no_citations {
      config = config.with_follow_citations(false);
    }
    config
  }
}

/// Configures the logging system based on the verbosity level
///
/// # Arguments
///
/// * `verbosity` - Number of times the verbose flag was used
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// `RUST_LOG` takes precedence when set. Logs go to stderr so they never mix with the
/// prompt on stdout.
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Loads the configuration and builds the harvester the session runs with.
fn prepare(cli: &Cli) -> Result<(Config, Harvester)> {
  let config = cli.apply(Config::load(cli.config.as_deref())?);
  config.validate()?;
  trace!("Using configuration: {config:?}");
  let harvester = Harvester::from_config(&config)?;
  Ok((config, harvester))
}

/// Entry point for the citegrab CLI application
///
/// Sets up logging, loads the configuration and runs the prompt loop until the user
/// types `exit` or closes stdin. Only setup failures end the process with a non-zero
/// status; failures while handling a query are reported and the prompt continues.
#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let (config, harvester) = match prepare(&cli) {
    Ok(prepared) => prepared,
    Err(e) => {
      eprintln!("{} Failed to load configuration: {e}", style(ERROR_PREFIX).red());
      std::process::exit(1);
    },
  };

  let mut terminal = Terminal::new();
  if let Err(e) = session::run(&mut terminal, &harvester, &config).await {
    eprintln!("{} {e}", style(ERROR_PREFIX).red());
    std::process::exit(1);
  }
}
