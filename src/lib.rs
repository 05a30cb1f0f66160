//! # InsiderKit - SEC Form 4 insider transactions from EDGAR
//!
//! InsiderKit downloads the EDGAR daily indices for a range of business days, picks out
//! the filings of one form type (Form 4 by default), downloads each filing and extracts a
//! flat record of the insider transaction it reports.
//!
//! ## Features
//!
//! - **Business-day calendar** - Skips weekends and US federal holidays, when EDGAR publishes nothing
//! - **Bounded bulk fetching** - At most 9 requests in flight, plus a 10 requests/second token bucket
//! - **Rate-limit courtesy** - Backs off when the SEC reports its request rate threshold was exceeded
//! - **Daily index parsing** - Company-sorted `company.YYYYMMDD.idx` files into [`IndexRecord`]s
//! - **Form 4 extraction** - Qualifies a filing and scans its tags into a [`FilingRecord`]
//!
//! ## Requirements
//!
//! InsiderKit is async and runs on [tokio](https://tokio.rs).
//!
//! ## Basic Usage
//!
//! ```ignore
//! use insiderkit::{DownloadRequest, Insider, InsiderOperations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Initialize with a proper user agent (required by SEC.gov)
//!     let insider = Insider::new("YourAppName contact@example.com")?;
//!
//!     // Yesterday's Form 4 filings
//!     let records = insider.download(DownloadRequest::new()).await?;
//!
//!     for record in records {
//!         println!(
//!             "{:?} {:?} {:?} shares at {:?}",
//!             record.issuer_ticker,
//!             record.transaction_code,
//!             record.number_of_shares,
//!             record.price_per_share
//!         );
//!     }
//!
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod options;
mod traits;

pub mod calendar;
pub mod download;
pub mod fetch;
pub mod index;
pub mod parsing;

pub use config::{InsiderConfig, InsiderUrls};
pub use self::core::Insider;
pub use error::{InsiderError, Result};
pub use fetch::{Fetch, fetch_all};
pub use options::{DEFAULT_FORM, DownloadRequest};
pub use parsing::form4::{Disqualified, Field, FilingRecord};
pub use parsing::index::IndexRecord;
pub use traits::InsiderOperations;

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
