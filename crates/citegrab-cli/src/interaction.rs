//! How the prompt loop talks to the user.
//!
//! The loop only ever asks for a line of text and replies with [`ResponseContent`]. The
//! real terminal lives in [`crate::terminal`]; tests drive the loop with a script.

use console::style;

use super::*;

/// Marks informational lines.
pub static INFO_PREFIX: &str = "ℹ ";
/// Marks a step in progress.
pub static WORKING_PREFIX: &str = "» ";
/// Marks a completed step.
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Marks a failure.
pub static ERROR_PREFIX: &str = "✗ ";
/// Precedes a prompt for input.
pub static PROMPT_PREFIX: &str = "❯ ";
/// Indentation of lines that belong to a listed paper.
pub static PAPER_INDENT: &str = "   ";
/// Indentation of lines that belong to one of the paper's citations.
pub static CITATION_INDENT: &str = "     ";

/// Something the loop wants shown to the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// A numbered search result with a summary preview of `summary_len` characters
  Paper {
    /// 1-based position in the result list
    index:       usize,
    /// The result itself
    paper:       &'a SearchResult,
    /// Characters of the abstract to show
    summary_len: usize,
  },
  /// Progress while a result is harvested
  Harvest(&'a HarvestEvent),
  /// Plain information
  Info(&'a str),
  /// A failure that ended one pass of the loop
  Error(&'a CliError),
}

/// Line-based input and output for the prompt loop.
pub trait UserInteraction {
  /// Asks for one line of input. `Ok(None)` means the input is exhausted.
  fn prompt(&mut self, message: &str) -> Result<Option<String>>;

  /// Shows `content` to the user.
  fn reply(&mut self, content: ResponseContent) -> Result<()>;
}

impl Display for ResponseContent<'_> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ResponseContent::Paper { index, paper, summary_len } => {
        writeln!(f)?;
        writeln!(f, "{index}. {} by {}", style(&paper.title).bold(), paper.author_names())?;
        writeln!(f, "{PAPER_INDENT}Published on: {}", paper.published)?;
        let preview: String = paper.summary.chars().take(*summary_len).collect();
        writeln!(f, "{PAPER_INDENT}Summary: {preview}...")?;
        write!(f, "{PAPER_INDENT}PDF Link: {}", style(&paper.pdf_url).cyan())?;
        if let Some(journal_ref) = &paper.journal_ref {
          write!(f, "\n{PAPER_INDENT}Journal: {journal_ref}")?;
        }
        Ok(())
      },
      ResponseContent::Harvest(event) => {
        let (indent, prefix) = match event {
          HarvestEvent::MainDownloaded(_) => (PAPER_INDENT, style(SUCCESS_PREFIX).green()),
          HarvestEvent::MainFailed(_) => (PAPER_INDENT, style(ERROR_PREFIX).red()),
          HarvestEvent::FolderCreated(_)
          | HarvestEvent::MainStarted
          | HarvestEvent::CitationsFound { .. }
          | HarvestEvent::NoCitations => (PAPER_INDENT, style(WORKING_PREFIX).cyan()),
          HarvestEvent::CitationStarted { .. } => (CITATION_INDENT, style(WORKING_PREFIX).cyan()),
          HarvestEvent::CitationDownloaded(_) => (CITATION_INDENT, style(SUCCESS_PREFIX).green()),
          HarvestEvent::CitationNotFound(_) => (CITATION_INDENT, style(INFO_PREFIX).blue()),
          HarvestEvent::CitationFailed(_) | HarvestEvent::CitationError { .. } =>
            (CITATION_INDENT, style(ERROR_PREFIX).red()),
        };
        write!(f, "{indent}{prefix}{event}")
      },
      ResponseContent::Info(message) => write!(f, "{}{message}", style(INFO_PREFIX).blue()),
      ResponseContent::Error(error) =>
        write!(f, "{}An error occurred: {error}", style(ERROR_PREFIX).red()),
    }
  }
}
