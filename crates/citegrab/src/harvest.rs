//! The per-result pipeline: folder, main PDF, then citations.
//!
//! A [`Harvester`] owns the search client and the downloader and runs the same three
//! steps for every [`SearchResult`] it is handed:
//!
//! 1. create `{timestamp}-{title}/` (and `citations/` inside it when citations are followed)
//! 2. download the paper's PDF as `{entry id stem}.pdf`
//! 3. if that worked, find `arXiv:` citations in the title and abstract and download each
//!
//! Progress is reported through [`HarvestEvent`]s as it happens, so a front end can print
//! a line before a slow download starts rather than after it finishes.
//!
//! # Examples
//!
//! ```no_run
//! use citegrab::{arxiv::SearchQuery, format, Config, Harvester};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let harvester = Harvester::from_config(&Config::default().with_output_dir("papers"))?;
//! let results = harvester.client().search(&SearchQuery::new("succinct arguments")).await?;
//!
//! for result in &results {
//!   let report =
//!     harvester.harvest(result, &format::timestamp(), |event| println!("{event}")).await?;
//!   println!("{} citations processed", report.citations.len());
//! }
//! # Ok(())
//! # }
//! ```

use super::*;
use crate::{
  arxiv::ArxivClient,
  citation::{self, Citation, CitationOutcome},
  download::Downloader,
  format::PaperFolder,
};

/// Runs the download pipeline for search results.
#[derive(Debug, Clone)]
pub struct Harvester {
  /// Client used for citation lookups
  client:             ArxivClient,
  /// Downloader shared by the main PDF and citations
  downloader:         Downloader,
  /// Folder paper folders are created in
  output_dir:         PathBuf,
  /// Title characters kept in folder names
  folder_title_len:   usize,
  /// Title characters kept in citation file names
  citation_title_len: usize,
  /// Whether citations are extracted and downloaded
  follow_citations:   bool,
}

/// Progress of a single [`Harvester::harvest`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestEvent {
  /// The paper folder exists (it may have existed before)
  FolderCreated(PathBuf),
  /// The main PDF is about to be downloaded
  MainStarted,
  /// The main PDF was saved under this file name
  MainDownloaded(PathBuf),
  /// The main PDF could not be downloaded to this file name
  MainFailed(PathBuf),
  /// These citations were found and will be downloaded into the given folder
  CitationsFound {
    /// Citations in order of appearance
    citations: Vec<Citation>,
    /// The `citations/` folder
    folder:    PathBuf,
  },
  /// The title and abstract contain no `arXiv:` citation
  NoCitations,
  /// A cited paper was found and its download is starting
  CitationStarted {
    /// The citation being fetched
    citation: Citation,
    /// Title of the cited paper
    title:    String,
  },
  /// A cited paper was saved under this file name
  CitationDownloaded(PathBuf),
  /// A cited paper could not be downloaded to this file name
  CitationFailed(PathBuf),
  /// arXiv does not know the cited identifier
  CitationNotFound(Citation),
  /// Looking the citation up failed
  CitationError {
    /// The citation that failed
    citation: Citation,
    /// Rendered error
    message:  String,
  },
}

/// What one [`Harvester::harvest`] call wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestReport {
  /// The folders that were created
  pub folder:    PaperFolder,
  /// Path of the main PDF, if its download succeeded
  pub main_pdf:  Option<PathBuf>,
  /// Each citation with what happened to it, in order of appearance
  pub citations: Vec<(Citation, CitationOutcome)>,
}

impl Harvester {
  /// Creates a harvester writing into the current directory with default naming limits.
  pub fn new(client: ArxivClient, downloader: Downloader) -> Self {
    Self {
      client,
      downloader,
      output_dir: PathBuf::from("."),
      folder_title_len: format::FOLDER_TITLE_LEN,
      citation_title_len: format::CITATION_TITLE_LEN,
      follow_citations: true,
    }
  }

  /// Creates a harvester with clients and settings taken from `config`.
  pub fn from_config(config: &Config) -> Result<Self> {
    config.validate()?;
    Ok(Self {
      client:             ArxivClient::from_config(config)?,
      downloader:         Downloader::from_config(config)?,
      output_dir:         config.output_dir.clone(),
      folder_title_len:   config.folder_title_len,
      citation_title_len: config.citation_title_len,
      follow_citations:   config.follow_citations,
    })
  }

  /// Sets the folder paper folders are created in.
  pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
    self.output_dir = output_dir.into();
    self
  }

  /// Enables or disables citation downloads.
  pub fn with_follow_citations(mut self, follow_citations: bool) -> Self {
    self.follow_citations = follow_citations;
    self
  }

  /// The search client, for running the searches that feed this harvester.
  pub fn client(&self) -> &ArxivClient { &self.client }

  /// Processes one search result.
  ///
  /// Only a failure to create the paper folder is returned as an error. Download failures,
  /// for the main PDF as well as for citations, are reported through `on_event` and in the
  /// returned [`HarvestReport`]. Citations are only looked at when the main PDF downloaded.
  pub async fn harvest(
    &self,
    result: &SearchResult,
    timestamp: &str,
    mut on_event: impl FnMut(HarvestEvent),
  ) -> Result<HarvestReport> {
    let folder = format::create_paper_folder(
      &self.output_dir,
      &result.title,
      timestamp,
      self.folder_title_len,
      self.follow_citations,
    )?;
    on_event(HarvestEvent::FolderCreated(folder.path.clone()));

    let filename = result.pdf_filename();
    let pdf_path = folder.path.join(&filename);
    on_event(HarvestEvent::MainStarted);
    if !self.downloader.download_pdf(&result.pdf_url, &pdf_path).await {
      on_event(HarvestEvent::MainFailed(filename));
      return Ok(HarvestReport { folder, main_pdf: None, citations: Vec::new() });
    }
    on_event(HarvestEvent::MainDownloaded(filename));

    let Some(citations_dir) = folder.citations.clone() else {
      return Ok(HarvestReport { folder, main_pdf: Some(pdf_path), citations: Vec::new() });
    };

    let citations = citation::extract_citations(&result.citation_text());
    if citations.is_empty() {
      on_event(HarvestEvent::NoCitations);
      return Ok(HarvestReport { folder, main_pdf: Some(pdf_path), citations: Vec::new() });
    }

    debug!("Found {} citation(s) in {}", citations.len(), result.entry_id);
    on_event(HarvestEvent::CitationsFound {
      citations: citations.clone(),
      folder:    citations_dir.clone(),
    });
    let outcomes = citation::download_citations(
      &self.client,
      &self.downloader,
      &citations,
      &citations_dir,
      self.citation_title_len,
      &mut on_event,
    )
    .await;

    Ok(HarvestReport {
      folder,
      main_pdf: Some(pdf_path),
      citations: citations.into_iter().zip(outcomes).collect(),
    })
  }
}

impl Display for HarvestEvent {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      HarvestEvent::FolderCreated(path) => write!(f, "Creating folder: {}", path.display()),
      HarvestEvent::MainStarted => write!(f, "Downloading main paper..."),
      HarvestEvent::MainDownloaded(name) => write!(f, "Downloaded: {}", name.display()),
      HarvestEvent::MainFailed(_) => write!(f, "Failed to download main paper"),
      HarvestEvent::CitationsFound { citations, folder } => {
        let rendered = citations.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        write!(
          f,
          "Found {} citation(s): [{rendered}], downloading to: {}",
          citations.len(),
          folder.display()
        )
      },
      HarvestEvent::NoCitations => write!(f, "No arXiv citations found in abstract/title"),
      HarvestEvent::CitationStarted { title, .. } => write!(f, "Downloading citation: {title}"),
      HarvestEvent::CitationDownloaded(name) => write!(f, "Downloaded: {}", name.display()),
      HarvestEvent::CitationFailed(name) => write!(f, "Failed to download: {}", name.display()),
      HarvestEvent::CitationNotFound(citation) => write!(f, "No arXiv paper found for {citation}"),
      HarvestEvent::CitationError { citation, message } =>
        write!(f, "Error downloading citation {citation}: {message}"),
    }
  }
}
