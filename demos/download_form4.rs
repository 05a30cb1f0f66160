//! Form 4 download example
//!
//! Downloads the insider transactions filed over a range of business days and prints
//! one line per qualifying filing.
//!
//! Run with: `cargo run --example download_form4 -- 2023-08-14 2023-08-15`
//!
//! Set `RUST_LOG=insiderkit=debug` to see which filings were skipped and why.

use insiderkit::{DownloadRequest, Insider, InsiderConfig, InsiderOperations};
use std::error::Error;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let request = match (args.next(), args.next()) {
        (Some(start), Some(end)) => DownloadRequest::new().with_range(&start, &end)?,
        (Some(day), None) => DownloadRequest::new().with_range(&day, &day)?,
        _ => DownloadRequest::new(),
    };

    // SEC.gov requires a user agent in the format: "AppName contact@example.com"
    let config = InsiderConfig::new("InsiderKit Example user@example.com").with_show_progress(true);
    let insider = Insider::with_config(config)?;

    let records = insider.download(request).await?;

    println!("=== {} insider transactions ===\n", records.len());
    for record in &records {
        println!(
            "{:<8} {:<30} {:<2} {:>12} @ {:<10} {}",
            record.issuer_ticker.as_deref().unwrap_or("-"),
            record.owner_name.as_deref().unwrap_or("-"),
            record.transaction_code.as_deref().unwrap_or("-"),
            record.number_of_shares.as_deref().unwrap_or("-"),
            record.price_per_share.as_deref().unwrap_or("-"),
            record.transaction_date.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}
