//! Operations the [`Insider`](crate::Insider) client exposes.
//!
//! The pipeline itself lives in [`download`](crate::download) as free functions generic
//! over [`Fetch`](crate::Fetch). This trait is the ergonomic surface for the HTTP client;
//! it binds those functions to the client's own configuration.

use super::error::Result;
use super::options::DownloadRequest;
use super::parsing::form4::FilingRecord;
use super::parsing::index::IndexRecord;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Operations for downloading insider transactions from EDGAR.
///
/// A download runs in two sequential batches: first the daily indices for every business
/// day in the range, then the filing documents those indices list. Within each batch up to
/// `concurrency` requests run at once. URLs that fail to download are skipped, as are filings
/// that do not pass the Form 4 qualification gate; neither case is reported as an error.
#[async_trait]
pub trait InsiderOperations {
    /// Downloads and extracts every qualifying filing in the request's date range.
    async fn download(&self, request: DownloadRequest) -> Result<Vec<FilingRecord>>;
    /// Fetches the daily indices for `[start, end]` and keeps rows of the given form type.
    async fn index_records(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        form: Option<&str>,
    ) -> Result<Vec<IndexRecord>>;
    /// Fetches one filing document and extracts it.
    async fn filing(&self, url: &str) -> Result<Option<FilingRecord>>;
}
