//! Tunables for a citegrab session, loaded from TOML.
//!
//! Every key is optional; anything left out keeps its default:
//!
//! ```toml
//! output_dir = "."
//! api_url = "http://export.arxiv.org/api/query"
//! max_results = 1
//! prompt_for_count = false
//! follow_citations = true
//! folder_title_len = 50
//! citation_title_len = 30
//! summary_preview_len = 200
//! request_timeout_secs = 60
//! user_agent = "citegrab/0.1.0"
//! ```

use super::*;
use crate::{arxiv::DEFAULT_API_URL, format};

/// Settings shared by the search client, the downloader and the prompt loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// Folder that paper folders are created in
  pub output_dir:           PathBuf,
  /// arXiv API endpoint
  pub api_url:              String,
  /// Number of results requested per query
  pub max_results:          usize,
  /// Whether to ask for a result count after every query
  pub prompt_for_count:     bool,
  /// Whether cited arXiv papers are downloaded too
  pub follow_citations:     bool,
  /// Title characters kept in a paper folder name
  pub folder_title_len:     usize,
  /// Title characters kept in a citation file name
  pub citation_title_len:   usize,
  /// Summary characters printed for each result
  pub summary_preview_len:  usize,
  /// Per-request timeout; unset keeps the HTTP client's default
  pub request_timeout_secs: Option<u64>,
  /// `User-Agent` header sent with every request
  pub user_agent:           String,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      output_dir:           PathBuf::from("."),
      api_url:              DEFAULT_API_URL.to_string(),
      max_results:          1,
      prompt_for_count:     false,
      follow_citations:     true,
      folder_title_len:     format::FOLDER_TITLE_LEN,
      citation_title_len:   format::CITATION_TITLE_LEN,
      summary_preview_len:  200,
      request_timeout_secs: None,
      user_agent:           concat!("citegrab/", env!("CARGO_PKG_VERSION")).to_string(),
    }
  }
}

impl Config {
  /// Where the configuration file is looked for when none is given explicitly.
  ///
  /// ```no_run
  /// let path = citegrab::Config::default_path();
  /// println!("Config is read from: {}", path.display());
  /// ```
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("citegrab").join("config.toml")
  }

  /// Reads and validates a configuration file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading configuration from {path:?}");
    let content = std::fs::read_to_string(path)?;
    Self::from_toml(&content)
  }

  /// Parses and validates a configuration from TOML text.
  pub fn from_toml(content: &str) -> Result<Self> {
    let config: Self = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Loads `path` if given, otherwise the file at [`Config::default_path`] if it exists,
  /// otherwise the defaults.
  ///
  /// An explicitly given path that does not exist is an error.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    match path {
      Some(path) => Self::from_path(path),
      None => {
        let default_path = Self::default_path();
        if default_path.exists() {
          Self::from_path(default_path)
        } else {
          trace!("No configuration at {default_path:?}, using defaults");
          Ok(Self::default())
        }
      },
    }
  }

  /// Sets the folder paper folders are created in.
  pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
    self.output_dir = output_dir.into();
    self
  }

  /// Sets the arXiv API endpoint.
  pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
    self.api_url = api_url.into();
    self
  }

  /// Sets the number of results requested per query.
  pub fn with_max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results;
    self
  }

  /// Enables or disables the per-query result count prompt.
  pub fn with_prompt_for_count(mut self, prompt_for_count: bool) -> Self {
    self.prompt_for_count = prompt_for_count;
    self
  }

  /// Enables or disables citation downloads.
  pub fn with_follow_citations(mut self, follow_citations: bool) -> Self {
    self.follow_citations = follow_citations;
    self
  }

  /// Rejects values that would make every request or file name useless.
  pub fn validate(&self) -> Result<()> {
    if self.max_results == 0 {
      return Err(CitegrabError::Config("max_results must be at least 1".into()));
    }
    if self.folder_title_len == 0 || self.citation_title_len == 0 {
      return Err(CitegrabError::Config("title lengths must be at least 1".into()));
    }
    let api_url = url::Url::parse(&self.api_url)
      .map_err(|e| CitegrabError::Config(format!("invalid api_url {:?}: {e}", self.api_url)))?;
    if !matches!(api_url.scheme(), "http" | "https") {
      return Err(CitegrabError::Config(format!("api_url must be http(s), got {:?}", self.api_url)));
    }
    Ok(())
  }
}
