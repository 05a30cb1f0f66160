//! The download pipeline.
//!
//! ```text
//! business dates ─► daily index URLs ─► fetch ─► parse ─► filter by form
//!                                                              │
//!        normalize ◄─ drop unqualified ◄─ extract ◄─ fetch ◄─ filing URLs
//! ```
//!
//! Every stage is generic over [`Fetch`], so the same pipeline runs against the SEC through
//! [`Insider`] or against in-memory documents in tests. [`Insider`] implements
//! [`InsiderOperations`] by calling these functions with its own configuration.
//!
//! # Examples
//!
//! ```ignore
//! use insiderkit::{DownloadRequest, Insider, InsiderOperations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let insider = Insider::new("MyApp contact@example.com")?;
//!
//!     let request = DownloadRequest::new().with_range("2023-08-14", "2023-08-15")?;
//!     let records = insider.download(request).await?;
//!
//!     for record in records {
//!         println!("{:?} {:?}", record.issuer_ticker, record.transaction_code);
//!     }
//!     Ok(())
//! }
//! ```

use super::Insider;
use super::calendar::business_dates;
use super::config::InsiderConfig;
use super::error::Result;
use super::fetch::{Fetch, fetch_all, progress_bar};
use super::index::{filing_url, index_url};
use super::options::DownloadRequest;
use super::parsing::form4::{FilingRecord, extract};
use super::parsing::index::{IndexRecord, parse_index};
use super::traits::InsiderOperations;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Runs the whole pipeline for `request`, resolving missing dates against the local clock.
pub async fn download_with<F>(
    fetcher: &F,
    config: &InsiderConfig,
    request: &DownloadRequest,
) -> Result<Vec<FilingRecord>>
where
    F: Fetch + ?Sized,
{
    let today = chrono::Local::now().date_naive();
    let (start, end) = request.date_range(today);

    let index = index_records_with(fetcher, config, start, end, request.form_filter()).await?;
    filings_with(fetcher, config, &index).await
}

/// Fetches and parses the daily indices for `[start, end]`, keeping rows whose form type
/// equals `form`. An empty or absent `form` keeps every row.
pub async fn index_records_with<F>(
    fetcher: &F,
    config: &InsiderConfig,
    start: NaiveDate,
    end: NaiveDate,
    form: Option<&str>,
) -> Result<Vec<IndexRecord>>
where
    F: Fetch + ?Sized,
{
    config.check_concurrency()?;

    let dates = business_dates(start, end, false, false);
    if dates.is_empty() {
        tracing::warn!("No business days between {} and {}", start, end);
    }

    let urls: Vec<String> = dates
        .into_iter()
        .map(|date| index_url(&config.base_urls.archives, date))
        .collect();
    let requested = urls.len();

    let progress = progress_bar(requested, config.show_progress, "daily indices");
    let pages = fetch_all(fetcher, urls, config.concurrency, &progress).await;
    progress.finish_and_clear();

    let mut records: Vec<IndexRecord> = pages
        .iter()
        .flat_map(|(content, url)| parse_index(content, url))
        .collect();
    let parsed = records.len();

    if let Some(form) = form.filter(|f| !f.is_empty()) {
        records.retain(|record| record.form_type == form);
    }

    tracing::info!(
        "Fetched {}/{} daily indices, {} rows, {} kept for form {}",
        pages.len(),
        requested,
        parsed,
        records.len(),
        form_label(form)
    );

    Ok(records)
}

/// Name of the form filter for log lines; `*` when every form is kept.
fn form_label(form: Option<&str>) -> &str {
    form.filter(|f| !f.is_empty()).unwrap_or("*")
}

/// Downloads the filing behind every index row and extracts the qualifying ones.
pub async fn filings_with<F>(
    fetcher: &F,
    config: &InsiderConfig,
    index: &[IndexRecord],
) -> Result<Vec<FilingRecord>>
where
    F: Fetch + ?Sized,
{
    config.check_concurrency()?;

    let urls: Vec<String> = index
        .iter()
        .map(|record| filing_url(&config.base_urls.archives, &record.file_name))
        .collect();
    let requested = urls.len();

    let progress = progress_bar(requested, config.show_progress, "filings");
    let documents = fetch_all(fetcher, urls, config.concurrency, &progress).await;
    progress.finish_and_clear();

    let mut records: Vec<FilingRecord> = documents
        .iter()
        .filter_map(|(content, url)| extract(content, url))
        .collect();
    normalize_flags(&mut records);

    tracing::info!(
        "Fetched {}/{} filings, {} qualified",
        documents.len(),
        requested,
        records.len()
    );

    Ok(records)
}

/// Fetches and extracts a single filing. Unlike the batch stages, fetch errors are returned.
pub async fn filing_with<F>(fetcher: &F, url: &str) -> Result<Option<FilingRecord>>
where
    F: Fetch + ?Sized,
{
    let content = fetcher.fetch(url).await?;
    Ok(extract(&content, url).map(|mut record| {
        normalize_flags(std::slice::from_mut(&mut record));
        record
    }))
}

/// Rewrites numeric `Director`/`Officer` flags as `"true"`/`"false"`.
///
/// Filers write these flags as `0`/`1` or as `true`/`false`. Other values pass through.
pub fn normalize_flags(records: &mut [FilingRecord]) {
    for record in records {
        normalize_flag(&mut record.director);
        normalize_flag(&mut record.officer);
    }
}

fn normalize_flag(value: &mut Option<String>) {
    let replacement = match value.as_deref() {
        Some("0") => "false",
        Some("1") => "true",
        _ => return,
    };
    *value = Some(replacement.to_string());
}

#[async_trait]
impl InsiderOperations for Insider {
    /// Downloads Form 4 transactions (or the requested form) for the request's date range.
    ///
    /// # Errors
    /// * `InsiderError::ConfigError` if the configured concurrency is zero
    async fn download(&self, request: DownloadRequest) -> Result<Vec<FilingRecord>> {
        download_with(self, &self.config, &request).await
    }

    async fn index_records(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        form: Option<&str>,
    ) -> Result<Vec<IndexRecord>> {
        index_records_with(self, &self.config, start, end, form).await
    }

    /// # Errors
    /// * `InsiderError::RequestError` for network issues
    /// * `InsiderError::AccessDenied` if the SEC refuses the document
    /// * `InsiderError::NotFound` if the document does not exist
    async fn filing(&self, url: &str) -> Result<Option<FilingRecord>> {
        filing_with(self, url).await
    }
}
