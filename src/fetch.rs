//! Bounded concurrent fetching.
//!
//! [`fetch_all`] drives a batch of URLs through a [`Fetch`] implementation with a fixed
//! number of requests in flight. Failed URLs are dropped: callers only ever see the
//! `(content, url)` pairs that came back, in completion order.

use super::error::Result;
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};

/// Source of documents for the download pipeline.
///
/// [`Insider`](crate::Insider) implements this over HTTP. Anything else that can turn a
/// URL into text (a fixture map, a local mirror) can stand in for it.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Returns the body behind `url`, or an error if it could not be retrieved.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches every URL with at most `concurrency` requests in flight.
///
/// Each completed URL advances `progress` by one, whether it succeeded or not. Errors are
/// logged at debug level and the URL is left out of the result.
///
/// `concurrency` must be at least one; the pipeline rejects zero through
/// [`InsiderConfig::check_concurrency`](crate::InsiderConfig::check_concurrency).
pub async fn fetch_all<F>(
    fetcher: &F,
    urls: Vec<String>,
    concurrency: usize,
    progress: &ProgressBar,
) -> Vec<(String, String)>
where
    F: Fetch + ?Sized,
{
    let results: Vec<Option<(String, String)>> = stream::iter(urls)
        .map(|url| async move {
            let result = fetcher.fetch(&url).await;
            progress.inc(1);
            match result {
                Ok(content) => Some((content, url)),
                Err(e) => {
                    tracing::debug!("Dropping {}: {}", url, e);
                    None
                }
            }
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    results.into_iter().flatten().collect()
}

/// Builds the progress bar for a batch of `len` URLs; hidden unless `visible`.
pub(crate) fn progress_bar(len: usize, visible: bool, message: &'static str) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{msg} [{elapsed_precise}] |{bar:40.cyan/blue}| {human_pos}/{human_len} [ETA: {eta}]")
    {
        pb.set_style(style.progress_chars("##-"));
    }
    pb.set_message(message);
    pb
}
