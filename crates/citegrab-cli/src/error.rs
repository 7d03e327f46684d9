//! Errors surfaced by the `citegrab` binary.

use thiserror::Error;

use super::*;

/// Error type alias used throughout the binary.
pub type Result<T> = core::result::Result<T, CliError>;

/// Everything that can go wrong in one pass of the prompt loop.
#[derive(Error, Debug)]
pub enum CliError {
  /// Searching, naming or downloading failed.
  #[error(transparent)]
  Citegrab(#[from] CitegrabError),

  /// Reading from the interactive prompt failed.
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// Reading stdin or writing stdout failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The result count prompt got something that is not a positive number.
  #[error("Invalid result count {0:?}, expected a positive number")]
  InvalidCount(String),
}
