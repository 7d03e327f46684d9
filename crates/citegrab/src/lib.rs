//! Search arXiv, download a paper and the arXiv papers it cites.
//!
//! `citegrab` is a small library that drives one workflow:
//!
//! - Search the arXiv index for a query
//! - Create a `{timestamp}-{title}` folder for every result
//! - Download the result's PDF into it
//! - Find `arXiv:NNNN.NNNNN` citations in the title and abstract
//! - Download each cited paper into a `citations/` subfolder
//!
//! Everything runs sequentially: each request is awaited before the next one starts.
//!
//! # Getting Started
//!
//! ```no_run
//! use citegrab::{
//!   arxiv::{ArxivClient, SearchQuery},
//!   format, Config, Harvester,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let config = Config::default();
//!   let client = ArxivClient::from_config(&config)?;
//!   let harvester = Harvester::from_config(&config)?;
//!
//!   let results = client.search(&SearchQuery::new("quantum error correction")).await?;
//!   for result in &results {
//!     let report =
//!       harvester.harvest(result, &format::timestamp(), |event| println!("{event}")).await?;
//!     println!("Wrote {}", report.folder.path.display());
//!   }
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`arxiv`]: Search and identifier lookup against the arXiv Atom API
//! - [`paper`]: The [`SearchResult`](paper::SearchResult) record returned by searches
//! - [`format`]: Title sanitizing and folder/file naming
//! - [`download`]: Streaming PDF downloads
//! - [`citation`]: Citation extraction and citation downloads
//! - [`harvest`]: The per-result pipeline tying the above together
//! - [`configuration`]: Tunables loaded from TOML
//! - [`error`]: The crate's error type

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
  str::FromStr,
};

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod arxiv;
pub mod citation;
pub mod configuration;
pub mod download;
pub mod error;
pub mod format;
pub mod harvest;
pub mod paper;

pub use configuration::Config;
pub use harvest::Harvester;

use crate::{error::*, paper::SearchResult};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use citegrab::prelude::*;
///
/// async fn example() -> Result<(), CitegrabError> {
///   let client = ArxivClient::new();
///   let paper = client.lookup("2301.07041").await?;
///   println!("{paper:?}");
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    arxiv::{ArxivClient, SearchQuery, SortCriterion},
    citation::Citation,
    download::Downloader,
    error::CitegrabError,
    harvest::{HarvestEvent, HarvestReport, Harvester},
    paper::SearchResult,
    Config,
  };
}
