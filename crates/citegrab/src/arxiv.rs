//! Client for the arXiv search API.
//!
//! arXiv answers both keyword searches and identifier lookups with an Atom feed served
//! from `http://export.arxiv.org/api/query`. This module builds those requests, decodes
//! the feed with `quick-xml`'s serde support and converts each `<entry>` into a
//! [`SearchResult`].
//!
//! # Examples
//!
//! ```no_run
//! use citegrab::arxiv::{ArxivClient, SearchQuery, SortCriterion};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArxivClient::new();
//!
//! let query =
//!   SearchQuery::new("zero knowledge").with_max_results(5).sort_by(SortCriterion::Relevance);
//! for result in client.search(&query).await? {
//!   println!("{}", result.title);
//! }
//!
//! if let Some(paper) = client.lookup("2301.07041").await? {
//!   println!("PDF at {}", paper.pdf_url);
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use quick_xml::de::from_str;

use super::*;
use crate::paper::Author;

/// Default endpoint of the arXiv API.
pub const DEFAULT_API_URL: &str = "http://export.arxiv.org/api/query";

lazy_static! {
  /// New-style arXiv identifier, optionally versioned.
  static ref ARXIV_ID: Regex = Regex::new(r"^\d{4}\.\d{4,5}(v\d+)?$").unwrap();
  /// Namespace prefixes used by the arXiv feed (`arxiv:`, `opensearch:`).
  static ref NAMESPACE_PREFIX: Regex = Regex::new(r"<(/?)(?:arxiv|opensearch):").unwrap();
  /// Runs of whitespace, arXiv titles are wrapped across lines.
  static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// How arXiv should order search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortCriterion {
  /// Best match first
  #[default]
  Relevance,
  /// Most recently updated first
  LastUpdatedDate,
  /// Most recently submitted first
  SubmittedDate,
}

/// Direction of the ordering picked by [`SortCriterion`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
  /// Largest first
  #[default]
  Descending,
  /// Smallest first
  Ascending,
}

/// A keyword search against the arXiv index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
  /// Free-text arXiv query, e.g. `quantum computing` or `ti:transformer AND au:vaswani`
  pub query:       String,
  /// Upper bound on the number of results returned
  pub max_results: usize,
  /// Result ordering
  pub sort_by:     SortCriterion,
  /// Ordering direction
  pub sort_order:  SortOrder,
}

impl SearchQuery {
  /// A relevance-ranked query returning a single result.
  pub fn new(query: impl Into<String>) -> Self {
    Self {
      query:       query.into(),
      max_results: 1,
      sort_by:     SortCriterion::Relevance,
      sort_order:  SortOrder::Descending,
    }
  }

  /// Sets the number of results to request.
  pub fn with_max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results;
    self
  }

  /// Sets the result ordering.
  pub fn sort_by(mut self, sort_by: SortCriterion) -> Self {
    self.sort_by = sort_by;
    self
  }

  /// Sets the ordering direction.
  pub fn sort_order(mut self, sort_order: SortOrder) -> Self {
    self.sort_order = sort_order;
    self
  }
}

/// Client for the arXiv Atom API.
///
/// Holds one [`reqwest::Client`] that is reused for every request. Cheap to create, so
/// callers are free to make a new one per search.
#[derive(Debug, Clone)]
pub struct ArxivClient {
  /// Internal web client used to connect to the API.
  client:  reqwest::Client,
  /// Endpoint the query parameters are appended to.
  api_url: String,
}

/// Internal representation of the arXiv API's Atom feed response.
#[derive(Debug, Deserialize)]
struct Feed {
  /// A feed may contain zero or more entries
  #[serde(rename = "entry", default)]
  entries: Vec<Entry>,
}

/// Internal representation of one `<entry>` of the feed.
///
/// Everything but `id` is optional here because arXiv reports errors as an entry that only
/// carries an id, a title and a summary.
#[derive(Debug, Deserialize)]
struct Entry {
  /// Versioned abstract URL, or an `/api/errors#...` URL for error entries
  id:               String,
  /// Paper title (may be wrapped across lines)
  #[serde(default)]
  title:            String,
  /// Paper abstract
  #[serde(default)]
  summary:          String,
  /// First version date
  published:        Option<DateTime<Utc>>,
  /// Latest version date
  updated:          Option<DateTime<Utc>>,
  /// Paper authors
  #[serde(rename = "author", default)]
  authors:          Vec<EntryAuthor>,
  /// Abstract page, PDF and DOI links
  #[serde(rename = "link", default)]
  links:            Vec<Link>,
  /// `<arxiv:journal_ref>`
  journal_ref:      Option<String>,
  /// `<arxiv:doi>`
  doi:              Option<String>,
  /// `<arxiv:comment>`
  comment:          Option<String>,
  /// `<arxiv:primary_category term="..."/>`
  primary_category: Option<Category>,
}

/// Internal representation of an author from the feed.
#[derive(Debug, Deserialize)]
struct EntryAuthor {
  /// Author's full name
  name: String,
}

/// Internal representation of a `<link>` element.
#[derive(Debug, Deserialize)]
struct Link {
  /// Link target
  #[serde(rename = "@href")]
  href:  String,
  /// `pdf` or `doi` for the related links
  #[serde(rename = "@title")]
  title: Option<String>,
}

/// Internal representation of a category element.
#[derive(Debug, Deserialize)]
struct Category {
  /// Category name, e.g. `cs.CR`
  #[serde(rename = "@term")]
  term: String,
}

impl ArxivClient {
  /// Creates a client for the public arXiv endpoint.
  pub fn new() -> Self { Self::with_api_url(DEFAULT_API_URL) }

  /// Creates a client for a different endpoint, e.g. a mirror or a test server.
  pub fn with_api_url(api_url: impl Into<String>) -> Self {
    Self { client: reqwest::Client::new(), api_url: api_url.into() }
  }

  /// Creates a client using the endpoint, user agent and timeout from `config`.
  pub fn from_config(config: &Config) -> Result<Self> {
    let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
    if let Some(secs) = config.request_timeout_secs {
      builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(Self { client: builder.build()?, api_url: config.api_url.clone() })
  }

  /// The endpoint this client talks to.
  pub fn api_url(&self) -> &str { &self.api_url }

  /// Runs a keyword search and returns at most `query.max_results` results.
  ///
  /// An empty result list is not an error.
  pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>> {
    let params = [
      ("search_query", query.query.clone()),
      ("start", "0".to_string()),
      ("max_results", query.max_results.to_string()),
      ("sortBy", query.sort_by.to_string()),
      ("sortOrder", query.sort_order.to_string()),
    ];
    let mut results = self.fetch(&params).await?;
    results.truncate(query.max_results);
    Ok(results)
  }

  /// Looks a paper up by its arXiv identifier.
  ///
  /// Accepts `2301.07041`, `2301.07041v2` or `arXiv:2301.07041`. Returns `Ok(None)` when
  /// arXiv knows no such paper. If the API ever returns more than one entry the first is
  /// used.
  pub async fn lookup(&self, identifier: &str) -> Result<Option<SearchResult>> {
    let identifier = normalize_identifier(identifier)?;
    let params = [("id_list", identifier.to_string()), ("max_results", "1".to_string())];
    let results = self.fetch(&params).await?;
    if results.len() > 1 {
      warn!("Lookup of {identifier} returned {} entries, using the first", results.len());
    }
    Ok(results.into_iter().next())
  }

  /// Sends one request to the API and decodes the feed.
  async fn fetch(&self, params: &[(&str, String)]) -> Result<Vec<SearchResult>> {
    debug!("Querying arXiv at {} with {params:?}", self.api_url);
    let response = self.client.get(&self.api_url).query(params).send().await?.error_for_status()?;
    let body = response.text().await?;
    trace!("arXiv response: {body}");
    parse_feed(&body)
  }
}

impl Default for ArxivClient {
  fn default() -> Self { Self::new() }
}

/// Strips an optional `arXiv:` prefix and checks the identifier's shape.
///
/// # Examples
///
/// ```
/// use citegrab::arxiv::normalize_identifier;
///
/// assert_eq!(normalize_identifier("arXiv:2301.07041").unwrap(), "2301.07041");
/// assert_eq!(normalize_identifier(" 1909.01234v3 ").unwrap(), "1909.01234v3");
/// assert!(normalize_identifier("math.AG/0601001").is_err());
/// ```
pub fn normalize_identifier(identifier: &str) -> Result<&str> {
  let trimmed = identifier.trim();
  let bare = match trimmed.get(..6) {
    Some(prefix) if prefix.eq_ignore_ascii_case("arxiv:") => &trimmed[6..],
    _ => trimmed,
  };
  if ARXIV_ID.is_match(bare) {
    Ok(bare)
  } else {
    Err(CitegrabError::InvalidIdentifier(identifier.to_string()))
  }
}

/// Decodes an arXiv Atom feed into search results.
///
/// An error entry (one whose id points at `/api/errors`) turns the whole response into
/// [`CitegrabError::ApiError`]. Partial entries, which arXiv returns for identifiers it does
/// not know, are logged and left out.
pub fn parse_feed(xml: &str) -> Result<Vec<SearchResult>> {
  let xml = NAMESPACE_PREFIX.replace_all(xml, "<$1");
  let feed: Feed = from_str(&xml)?;
  feed.entries.into_iter().filter_map(|entry| entry.into_search_result().transpose()).collect()
}

impl Entry {
  /// Converts the entry, returning `Ok(None)` for a partial entry without a publication
  /// date.
  fn into_search_result(self) -> Result<Option<SearchResult>> {
    if self.id.contains("/api/errors") {
      return Err(CitegrabError::ApiError(collapse_whitespace(&self.summary)));
    }

    let Some(published) = self.published else {
      warn!("Skipping partial result {}", self.id);
      return Ok(None);
    };

    // arXiv links the PDF as `<link title="pdf">`; older responses omit it, and the abstract
    // URL maps onto the PDF URL by swapping the path prefix.
    let pdf_url = self
      .links
      .iter()
      .find(|link| link.title.as_deref() == Some("pdf"))
      .map(|link| link.href.clone())
      .unwrap_or_else(|| self.id.replace("/abs/", "/pdf/"));

    Ok(Some(SearchResult {
      title: collapse_whitespace(&self.title),
      authors: self
        .authors
        .into_iter()
        .map(|author| Author { name: collapse_whitespace(&author.name) })
        .collect(),
      published,
      updated: self.updated.unwrap_or(published),
      summary: self.summary.trim().to_string(),
      pdf_url,
      entry_id: self.id,
      journal_ref: self.journal_ref.map(|s| collapse_whitespace(&s)),
      doi: self.doi,
      primary_category: self.primary_category.map(|category| category.term),
      comment: self.comment.map(|s| collapse_whitespace(&s)),
    }))
  }
}

/// Collapses runs of whitespace to one space and trims the ends.
fn collapse_whitespace(text: &str) -> String {
  WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

impl Display for SortCriterion {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SortCriterion::Relevance => write!(f, "relevance"),
      SortCriterion::LastUpdatedDate => write!(f, "lastUpdatedDate"),
      SortCriterion::SubmittedDate => write!(f, "submittedDate"),
    }
  }
}

impl FromStr for SortCriterion {
  type Err = CitegrabError;

  fn from_str(s: &str) -> Result<Self> {
    match &s.to_lowercase() as &str {
      "relevance" => Ok(SortCriterion::Relevance),
      "lastupdateddate" | "last_updated_date" | "updated" => Ok(SortCriterion::LastUpdatedDate),
      "submitteddate" | "submitted_date" | "submitted" => Ok(SortCriterion::SubmittedDate),
      s => Err(CitegrabError::Config(format!("Unknown sort criterion: {s}"))),
    }
  }
}

impl Display for SortOrder {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SortOrder::Descending => write!(f, "descending"),
      SortOrder::Ascending => write!(f, "ascending"),
    }
  }
}
