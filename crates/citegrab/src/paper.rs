//! The record returned by an arXiv search.
//!
//! A [`SearchResult`] is built from one Atom `<entry>` and is never mutated afterwards.
//! It carries just enough metadata to print a summary line, name a folder and find the
//! PDF.

use super::*;

/// One paper returned by the arXiv API.
///
/// # Examples
///
/// ```no_run
/// # use citegrab::arxiv::{ArxivClient, SearchQuery};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let results = ArxivClient::new().search(&SearchQuery::new("lattice cryptography")).await?;
/// for result in results {
///   println!("{} by {}", result.title, result.author_names());
///   println!("stored as {}.pdf", result.entry_stem());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
  /// The paper's title, with runs of whitespace collapsed to one space
  pub title:            String,
  /// Authors in the order the API lists them
  pub authors:          Vec<Author>,
  /// When the first version was published
  pub published:        DateTime<Utc>,
  /// When the most recent version was published
  pub updated:          DateTime<Utc>,
  /// The abstract
  pub summary:          String,
  /// Direct link to the PDF
  pub pdf_url:          String,
  /// URL-like entry id, e.g. `http://arxiv.org/abs/2301.07041v2`
  pub entry_id:         String,
  /// Journal reference, when the authors supplied one
  pub journal_ref:      Option<String>,
  /// DOI, when the authors supplied one
  pub doi:              Option<String>,
  /// Primary arXiv category, e.g. `cs.CR`
  pub primary_category: Option<String>,
  /// Free-form author comment (page counts, conference, ...)
  pub comment:          Option<String>,
}

/// A single author of a [`SearchResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
  /// Author's full name
  pub name: String,
}

impl SearchResult {
  /// The last path segment of [`entry_id`](Self::entry_id).
  ///
  /// This is used as the file stem of the main PDF, so
  /// `http://arxiv.org/abs/2301.07041v2` becomes `2301.07041v2`.
  pub fn entry_stem(&self) -> &str {
    self.entry_id.trim_end_matches('/').rsplit('/').next().unwrap_or(&self.entry_id)
  }

  /// The file name the main PDF is stored under.
  pub fn pdf_filename(&self) -> PathBuf { PathBuf::from(format!("{}.pdf", self.entry_stem())) }

  /// Comma separated author names.
  pub fn author_names(&self) -> String {
    self.authors.iter().map(|author| author.name.as_str()).collect::<Vec<_>>().join(", ")
  }

  /// The text citations are extracted from: the title, a space, then the abstract.
  pub fn citation_text(&self) -> String { format!("{} {}", self.title, self.summary) }
}

impl Display for Author {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.name) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn result(entry_id: &str) -> SearchResult {
    SearchResult {
      title:            "Verifiable Fully Homomorphic Encryption".into(),
      authors:          vec![
        Author { name: "Alexander Viand".into() },
        Author { name: "Christian Knabenhans".into() },
      ],
      published:        DateTime::parse_from_rfc3339("2023-01-17T18:35:37Z").unwrap().into(),
      updated:          DateTime::parse_from_rfc3339("2023-01-18T10:00:00Z").unwrap().into(),
      summary:          "We build on arXiv:2201.00001.".into(),
      pdf_url:          "http://arxiv.org/pdf/2301.07041v2".into(),
      entry_id:         entry_id.into(),
      journal_ref:      None,
      doi:              None,
      primary_category: Some("cs.CR".into()),
      comment:          None,
    }
  }

  #[test]
  fn test_entry_stem() {
    assert_eq!(result("http://arxiv.org/abs/2301.07041v2").entry_stem(), "2301.07041v2");
    assert_eq!(result("http://arxiv.org/abs/2301.07041v2/").entry_stem(), "2301.07041v2");
    assert_eq!(result("2301.07041").entry_stem(), "2301.07041");
  }

  #[test]
  fn test_pdf_filename() {
    let paper = result("http://arxiv.org/abs/2301.07041v2");
    assert_eq!(paper.pdf_filename(), PathBuf::from("2301.07041v2.pdf"));
  }

  #[test]
  fn test_author_names_and_citation_text() {
    let paper = result("http://arxiv.org/abs/2301.07041v2");
    assert_eq!(paper.author_names(), "Alexander Viand, Christian Knabenhans");
    assert_eq!(
      paper.citation_text(),
      "Verifiable Fully Homomorphic Encryption We build on arXiv:2201.00001."
    );
  }
}
