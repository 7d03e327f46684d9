//! Streaming PDF downloads.
//!
//! The response body is written to disk as it arrives, in writes of at most
//! [`CHUNK_SIZE`] bytes, so large PDFs are never held in memory. The destination file is
//! only created once the server has answered with a success status. A connection that
//! drops mid-body leaves the partially written file behind.

use std::time::Duration;

use tokio::{fs::File, io::AsyncWriteExt};

use super::*;

/// Size of each write to the destination file.
pub const CHUNK_SIZE: usize = 8192;

/// Downloads files over HTTP(S).
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use citegrab::download::Downloader;
///
/// # async fn example() {
/// let downloader = Downloader::new();
/// let path = Path::new("2301.07041.pdf");
/// if downloader.download_pdf("https://arxiv.org/pdf/2301.07041", path).await {
///   println!("saved");
/// }
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Downloader {
  /// Internal web client used for every download.
  client: reqwest::Client,
}

impl Downloader {
  /// Creates a downloader with a default HTTP client.
  pub fn new() -> Self { Self::default() }

  /// Creates a downloader using the user agent and timeout from `config`.
  pub fn from_config(config: &Config) -> Result<Self> {
    let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
    if let Some(secs) = config.request_timeout_secs {
      builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(Self { client: builder.build()? })
  }

  /// Downloads `url` to `path`, returning whether it worked.
  ///
  /// Network errors, non-success statuses and write errors are logged and reported as
  /// `false`; they never propagate.
  pub async fn download_pdf(&self, url: &str, path: &Path) -> bool {
    match self.fetch_to_file(url, path).await {
      Ok(written) => {
        info!("Downloaded {written} bytes from {url} to {path:?}");
        true
      },
      Err(e) => {
        warn!("Error downloading PDF from {url}: {e}");
        false
      },
    }
  }

  /// Streams `url` into `path` and returns the number of bytes written.
  ///
  /// This is the fallible core of [`download_pdf`](Self::download_pdf) for callers that
  /// want the error itself.
  pub async fn fetch_to_file(&self, url: &str, path: &Path) -> Result<u64> {
    debug!("Fetching {url}");
    let mut response = self.client.get(url).send().await?.error_for_status()?;

    let mut file = File::create(path).await?;
    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
      for piece in chunk.chunks(CHUNK_SIZE) {
        file.write_all(piece).await?;
        written += piece.len() as u64;
      }
    }
    file.flush().await?;

    Ok(written)
  }
}
