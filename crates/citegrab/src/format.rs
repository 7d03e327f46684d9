//! Title sanitizing and the on-disk naming scheme.
//!
//! Every search result gets its own folder named `{timestamp}-{title}`:
//!
//! ```text
//! 20240131_142501-Verifiable Fully Homomorphic Encryption/
//! ├── 2301.07041v2.pdf
//! └── citations/
//!     └── 2201.00001_Some Cited Paper Title.pdf
//! ```
//!
//! Titles are made filesystem safe by replacing each of `<>:"/\|?*` with `_` and are then
//! truncated to a fixed number of characters.

use super::*;

/// Default number of title characters kept in a paper folder name.
pub const FOLDER_TITLE_LEN: usize = 50;

/// Default number of title characters kept in a citation file name.
pub const CITATION_TITLE_LEN: usize = 30;

/// Name of the subfolder cited papers are stored in.
pub const CITATIONS_DIR: &str = "citations";

/// `strftime` format of the folder timestamp prefix.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

lazy_static! {
  /// Characters that are not allowed in a path component on at least one platform.
  static ref ILLEGAL: Regex = Regex::new(r#"[<>:"/\\|?*]"#).unwrap();
}

/// The directories created for one search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperFolder {
  /// The `{timestamp}-{title}` folder
  pub path:      PathBuf,
  /// Its `citations` subfolder, when citations are followed
  pub citations: Option<PathBuf>,
}

/// Replaces filesystem-illegal characters with `_` and keeps at most `max_len` characters.
///
/// Truncation counts characters rather than bytes, so multi-byte titles are never split
/// inside a code point.
///
/// # Examples
///
/// ```
/// use citegrab::format::sanitize_title;
///
/// assert_eq!(sanitize_title("What is a <b>Proof</b>?", 50), "What is a _b_Proof__b__");
/// assert_eq!(sanitize_title("Attention Is All You Need", 9), "Attention");
/// ```
pub fn sanitize_title(title: &str, max_len: usize) -> String {
  ILLEGAL.replace_all(title, "_").chars().take(max_len).collect()
}

/// The current local time in [`TIMESTAMP_FORMAT`].
pub fn timestamp() -> String { chrono::Local::now().format(TIMESTAMP_FORMAT).to_string() }

/// Builds `{timestamp}-{sanitized title}` without touching the filesystem.
pub fn folder_name(timestamp: &str, title: &str, max_len: usize) -> String {
  format!("{timestamp}-{}", sanitize_title(title, max_len))
}

/// File name for a downloaded citation: `{arxiv_id}_{sanitized title}.pdf`.
///
/// # Examples
///
/// ```
/// use citegrab::format::citation_filename;
///
/// let name = citation_filename("1909.01234", "Deep Learning: A Survey", 30);
/// assert_eq!(name.to_str(), Some("1909.01234_Deep Learning_ A Survey.pdf"));
/// ```
pub fn citation_filename(arxiv_id: &str, title: &str, max_len: usize) -> PathBuf {
  PathBuf::from(format!("{arxiv_id}_{}.pdf", sanitize_title(title, max_len)))
}

/// Creates the folder for a paper under `root`.
///
/// Creation is idempotent: asking for the same timestamp and title twice returns the same
/// folder without error. With `with_citations` set, the `citations` subfolder is created as
/// well.
pub fn create_paper_folder(
  root: &Path,
  title: &str,
  timestamp: &str,
  max_len: usize,
  with_citations: bool,
) -> Result<PaperFolder> {
  let path = root.join(folder_name(timestamp, title, max_len));
  debug!("Creating paper folder: {path:?}");
  std::fs::create_dir_all(&path)?;

  let citations = if with_citations {
    let citations = path.join(CITATIONS_DIR);
    std::fs::create_dir_all(&citations)?;
    Some(citations)
  } else {
    None
  };

  Ok(PaperFolder { path, citations })
}
