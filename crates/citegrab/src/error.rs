//! Error types for the citegrab library.
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! [`CitegrabError`]. Failures while downloading a PDF are the one exception: those are
//! logged and surfaced as a plain `bool` by
//! [`Downloader::download_pdf`](crate::download::Downloader::download_pdf) so that one bad
//! file never interrupts a harvest.
//!
//! # Examples
//!
//! ```no_run
//! use citegrab::{arxiv::ArxivClient, error::CitegrabError};
//!
//! # async fn example() -> Result<(), CitegrabError> {
//! match ArxivClient::new().lookup("not-an-id").await {
//!   Err(CitegrabError::InvalidIdentifier(id)) => println!("Bad identifier: {id}"),
//!   Err(CitegrabError::Network(e)) => println!("Network error: {e}"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(paper) => println!("Found: {paper:?}"),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error type alias used for the [`citegrab`](crate) crate.
pub type Result<T> = core::result::Result<T, CitegrabError>;

/// Errors that can occur while searching, naming and downloading papers.
#[derive(Error, Debug)]
pub enum CitegrabError {
  /// The given string is not a new-style arXiv identifier (`NNNN.NNNNN`).
  #[error("Invalid arXiv identifier: {0}")]
  InvalidIdentifier(String),

  /// A network request failed or returned a non-success status.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The server is unreachable
  /// - The server answered with a 4xx/5xx status
  /// - TLS errors occur
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The arXiv API answered with an error entry instead of results.
  ///
  /// arXiv reports malformed queries and unknown identifiers inside the Atom feed
  /// itself, so the message here is the error entry's summary.
  #[error("API error: {0}")]
  ApiError(String),

  /// The Atom feed returned by the API could not be decoded.
  #[error("Failed to parse API response: {0}")]
  Xml(#[from] quick_xml::DeError),

  /// A file system operation failed.
  ///
  /// This occurs when:
  /// - Creating a paper folder fails
  /// - Writing a PDF fails
  /// - Reading a configuration file fails
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A configuration file was not valid TOML or had fields of the wrong type.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// A configuration value was rejected.
  #[error("{0}")]
  Config(String),
}
