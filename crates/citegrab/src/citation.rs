//! Finding arXiv citations in free text and downloading the cited papers.
//!
//! Only the `arXiv:NNNN.NNNNN` form is recognised (case-insensitive, four digits, a
//! period, then four or five digits). DOIs, old-style identifiers like `math.AG/0601001`
//! and bare numbers without the `arXiv:` prefix are ignored.

use super::*;
use crate::{arxiv::ArxivClient, download::Downloader, harvest::HarvestEvent};

lazy_static! {
  /// `arXiv:` followed by a new-style identifier.
  static ref CITATION: Regex = Regex::new(r"(?i)arXiv:(\d{4}\.\d{4,5})").unwrap();
}

/// An arXiv identifier cited by a paper, displayed as `arXiv:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Citation {
  /// The bare identifier, e.g. `2301.12345`
  identifier: String,
}

/// What happened to one citation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CitationOutcome {
  /// The cited paper's PDF was written to this path
  Downloaded(PathBuf),
  /// The paper was found but its PDF could not be downloaded to this path
  Failed(PathBuf),
  /// arXiv has no paper with this identifier
  NotFound,
  /// The lookup itself failed
  Error(String),
}

impl Citation {
  /// The bare identifier, without the `arXiv:` prefix.
  pub fn identifier(&self) -> &str { &self.identifier }
}

impl Display for Citation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "arXiv:{}", self.identifier)
  }
}

impl FromStr for Citation {
  type Err = CitegrabError;

  fn from_str(s: &str) -> Result<Self> {
    match CITATION.captures(s.trim()) {
      Some(captures) if captures[0].len() == s.trim().len() =>
        Ok(Citation { identifier: captures[1].to_string() }),
      _ => Err(CitegrabError::InvalidIdentifier(s.to_string())),
    }
  }
}

/// Returns every `arXiv:` citation in `text`, in order of appearance.
///
/// Duplicates are kept. The prefix is normalised to `arXiv:` whatever case it was written
/// in.
///
/// # Examples
///
/// ```
/// use citegrab::citation::extract_citations;
///
/// let citations = extract_citations("arXiv:2301.12345 and arXiv:1909.01234");
/// let rendered: Vec<String> = citations.iter().map(ToString::to_string).collect();
/// assert_eq!(rendered, ["arXiv:2301.12345", "arXiv:1909.01234"]);
///
/// assert!(extract_citations("no identifiers here").is_empty());
/// ```
pub fn extract_citations(text: &str) -> Vec<Citation> {
  CITATION
    .captures_iter(text)
    .map(|captures| Citation { identifier: captures[1].to_string() })
    .collect()
}

/// Looks up and downloads every citation into `folder`.
///
/// Each cited paper is stored as `{identifier}_{title}.pdf` with the title sanitized and
/// cut to `title_len` characters. A failure on one citation is reported through
/// `on_event` and the loop moves on to the next. The returned outcomes line up with
/// `citations`.
pub async fn download_citations(
  client: &ArxivClient,
  downloader: &Downloader,
  citations: &[Citation],
  folder: &Path,
  title_len: usize,
  on_event: &mut impl FnMut(HarvestEvent),
) -> Vec<CitationOutcome> {
  let mut outcomes = Vec::with_capacity(citations.len());

  for citation in citations {
    let outcome = match client.lookup(citation.identifier()).await {
      Ok(Some(paper)) => {
        let filename = format::citation_filename(citation.identifier(), &paper.title, title_len);
        on_event(HarvestEvent::CitationStarted {
          citation: citation.clone(),
          title:    paper.title.clone(),
        });

        let path = folder.join(&filename);
        if downloader.download_pdf(&paper.pdf_url, &path).await {
          on_event(HarvestEvent::CitationDownloaded(filename));
          CitationOutcome::Downloaded(path)
        } else {
          on_event(HarvestEvent::CitationFailed(filename));
          CitationOutcome::Failed(path)
        }
      },
      Ok(None) => {
        debug!("{citation} is not known to arXiv");
        on_event(HarvestEvent::CitationNotFound(citation.clone()));
        CitationOutcome::NotFound
      },
      Err(e) => {
        warn!("Error looking up citation {citation}: {e}");
        let message = e.to_string();
        on_event(HarvestEvent::CitationError {
          citation: citation.clone(),
          message:  message.clone(),
        });
        CitationOutcome::Error(message)
      },
    };
    outcomes.push(outcome);
  }

  outcomes
}
