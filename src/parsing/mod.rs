//! Text parsers for EDGAR documents.
//!
//! - [`index`] turns a company-sorted daily index into [`IndexRecord`](index::IndexRecord)s.
//! - [`form4`] qualifies a Form 4 filing and extracts a [`FilingRecord`](form4::FilingRecord).

pub mod form4;
pub mod index;
mod utils;
