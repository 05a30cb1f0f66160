//! Form 4 qualification and field extraction.
//!
//! A Form 4 filing arrives as a `.txt` submission: an SGML header followed by the
//! `ownershipDocument` XML. Rather than parse the XML, the extractor scans the document line
//! by line for a fixed set of tags, which tolerates the malformed markup that shows up in
//! real submissions.
//!
//! Only filings that are easy to interpret are kept. A filing *qualifies* when it has a
//! single reporting owner who is a director or an officer, exactly one non-derivative
//! transaction, an open-market purchase or sale (`P` or `S`), and every tag the extractor
//! reads. Everything else is dropped.
//!
//! Two tag shapes exist:
//!
//! ```text
//! <issuerCik>0000320193</issuerCik>        same line: value sits between the tags
//! <transactionShares>                      next line: value is on the following line
//!     <value>50000</value>
//! ```
//!
//! When a tag appears more than once (several transactions, footnotes), the first
//! occurrence wins and later ones are ignored.

use super::utils::strip_markup;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// At least one of these must be present: the owner is a director or an officer.
const INSIDER_ROLE_FLAGS: [&str; 6] = [
    "<isDirector>1</isDirector>",
    "<isOfficer>1</isOfficer>",
    "<isDirector>True</isDirector>",
    "<isOfficer>True</isOfficer>",
    "<isDirector>true</isDirector>",
    "<isOfficer>true</isOfficer>",
];

/// At least one of these must be present: an open-market sale or purchase.
const BUY_SELL_CODES: [&str; 2] = [
    "<transactionCode>S</transactionCode>",
    "<transactionCode>P</transactionCode>",
];

const REPORTING_OWNER: &str = "<reportingOwner>";
const NON_DERIVATIVE_TRANSACTION: &str = "<nonDerivativeTransaction>";

const REQUIRED_TAGS: [&str; 13] = [
    "<periodOfReport>",
    "<issuerCik>",
    "<issuerName>",
    "<issuerTradingSymbol>",
    "<rptOwnerCik>",
    "<rptOwnerName>",
    "<transactionDate>",
    "<transactionShares>",
    "<transactionPricePerShare>",
    "<sharesOwnedFollowingTransaction>",
    "<directOrIndirectOwnership>",
    "<officerTitle>",
    "<isTenPercentOwner>",
];

/// Where a field's value sits relative to its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagShape {
    SameLine,
    NextLine,
}

/// A column of [`FilingRecord`] that is read from the document.
///
/// [`Field::ALL`] is in column order, which is also the order tags are tried in when a
/// single line contains more than one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Date,
    IssuerCik,
    IssuerName,
    IssuerTicker,
    OwnerCik,
    OwnerName,
    Director,
    Officer,
    TenPercentOwner,
    OfficerTitle,
    TransactionDate,
    TransactionCode,
    NumberOfShares,
    PricePerShare,
    SharesOwnedFollowing,
    OwnershipNature,
}

impl Field {
    pub const ALL: [Field; 16] = [
        Field::Date,
        Field::IssuerCik,
        Field::IssuerName,
        Field::IssuerTicker,
        Field::OwnerCik,
        Field::OwnerName,
        Field::Director,
        Field::Officer,
        Field::TenPercentOwner,
        Field::OfficerTitle,
        Field::TransactionDate,
        Field::TransactionCode,
        Field::NumberOfShares,
        Field::PricePerShare,
        Field::SharesOwnedFollowing,
        Field::OwnershipNature,
    ];

    /// Opening tag that announces this field.
    pub fn tag(&self) -> &'static str {
        match self {
            Field::Date => "<periodOfReport>",
            Field::IssuerCik => "<issuerCik>",
            Field::IssuerName => "<issuerName>",
            Field::IssuerTicker => "<issuerTradingSymbol>",
            Field::OwnerCik => "<rptOwnerCik>",
            Field::OwnerName => "<rptOwnerName>",
            Field::Director => "<isDirector>",
            Field::Officer => "<isOfficer>",
            Field::TenPercentOwner => "<isTenPercentOwner>",
            Field::OfficerTitle => "<officerTitle>",
            Field::TransactionDate => "<transactionDate>",
            Field::TransactionCode => "<transactionCode>",
            Field::NumberOfShares => "<transactionShares>",
            Field::PricePerShare => "<transactionPricePerShare>",
            Field::SharesOwnedFollowing => "<sharesOwnedFollowingTransaction>",
            Field::OwnershipNature => "<directOrIndirectOwnership>",
        }
    }

    /// Column name in the result table.
    pub fn column(&self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::IssuerCik => "Issuer CIK",
            Field::IssuerName => "Issuer Name",
            Field::IssuerTicker => "Issuer Ticker",
            Field::OwnerCik => "Owner CIK",
            Field::OwnerName => "Owner Name",
            Field::Director => "Director",
            Field::Officer => "Officer",
            Field::TenPercentOwner => "Ten % Owner",
            Field::OfficerTitle => "Officer Title",
            Field::TransactionDate => "Transaction Date",
            Field::TransactionCode => "Transaction Code",
            Field::NumberOfShares => "Number of Shares",
            Field::PricePerShare => "Price per Share",
            Field::SharesOwnedFollowing => "Shares Owned Following Trans",
            Field::OwnershipNature => "Ownership Nature",
        }
    }

    pub fn shape(&self) -> TagShape {
        match self {
            Field::TransactionDate
            | Field::NumberOfShares
            | Field::PricePerShare
            | Field::SharesOwnedFollowing
            | Field::OwnershipNature => TagShape::NextLine,
            _ => TagShape::SameLine,
        }
    }
}

/// One insider transaction extracted from a Form 4 filing.
///
/// Serializes with the result table's column names (`"Issuer CIK"`, `"Ten % Owner"`, ...).
/// Fields whose tag never resolved to a value are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRecord {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Issuer CIK")]
    pub issuer_cik: Option<String>,
    #[serde(rename = "Issuer Name")]
    pub issuer_name: Option<String>,
    #[serde(rename = "Issuer Ticker")]
    pub issuer_ticker: Option<String>,
    #[serde(rename = "Owner CIK")]
    pub owner_cik: Option<String>,
    #[serde(rename = "Owner Name")]
    pub owner_name: Option<String>,
    #[serde(rename = "Director")]
    pub director: Option<String>,
    #[serde(rename = "Officer")]
    pub officer: Option<String>,
    #[serde(rename = "Ten % Owner")]
    pub ten_percent_owner: Option<String>,
    #[serde(rename = "Officer Title")]
    pub officer_title: Option<String>,
    #[serde(rename = "Transaction Date")]
    pub transaction_date: Option<String>,
    #[serde(rename = "Transaction Code")]
    pub transaction_code: Option<String>,
    #[serde(rename = "Number of Shares")]
    pub number_of_shares: Option<String>,
    #[serde(rename = "Price per Share")]
    pub price_per_share: Option<String>,
    #[serde(rename = "Shares Owned Following Trans")]
    pub shares_owned_following: Option<String>,
    #[serde(rename = "Ownership Nature")]
    pub ownership_nature: Option<String>,
}

impl FilingRecord {
    pub const COLUMNS: [&'static str; 17] = [
        "URL",
        "Date",
        "Issuer CIK",
        "Issuer Name",
        "Issuer Ticker",
        "Owner CIK",
        "Owner Name",
        "Director",
        "Officer",
        "Ten % Owner",
        "Officer Title",
        "Transaction Date",
        "Transaction Code",
        "Number of Shares",
        "Price per Share",
        "Shares Owned Following Trans",
        "Ownership Nature",
    ];

    /// Flattens a per-document field map into a row.
    pub fn from_fields(url: &str, mut fields: HashMap<Field, String>) -> Self {
        let mut record = FilingRecord {
            url: url.to_string(),
            ..Default::default()
        };
        for field in Field::ALL {
            *record.slot_mut(field) = fields.remove(&field);
        }
        record
    }

    pub fn field(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Date => &self.date,
            Field::IssuerCik => &self.issuer_cik,
            Field::IssuerName => &self.issuer_name,
            Field::IssuerTicker => &self.issuer_ticker,
            Field::OwnerCik => &self.owner_cik,
            Field::OwnerName => &self.owner_name,
            Field::Director => &self.director,
            Field::Officer => &self.officer,
            Field::TenPercentOwner => &self.ten_percent_owner,
            Field::OfficerTitle => &self.officer_title,
            Field::TransactionDate => &self.transaction_date,
            Field::TransactionCode => &self.transaction_code,
            Field::NumberOfShares => &self.number_of_shares,
            Field::PricePerShare => &self.price_per_share,
            Field::SharesOwnedFollowing => &self.shares_owned_following,
            Field::OwnershipNature => &self.ownership_nature,
        };
        value.as_deref()
    }

    pub(crate) fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Date => &mut self.date,
            Field::IssuerCik => &mut self.issuer_cik,
            Field::IssuerName => &mut self.issuer_name,
            Field::IssuerTicker => &mut self.issuer_ticker,
            Field::OwnerCik => &mut self.owner_cik,
            Field::OwnerName => &mut self.owner_name,
            Field::Director => &mut self.director,
            Field::Officer => &mut self.officer,
            Field::TenPercentOwner => &mut self.ten_percent_owner,
            Field::OfficerTitle => &mut self.officer_title,
            Field::TransactionDate => &mut self.transaction_date,
            Field::TransactionCode => &mut self.transaction_code,
            Field::NumberOfShares => &mut self.number_of_shares,
            Field::PricePerShare => &mut self.price_per_share,
            Field::SharesOwnedFollowing => &mut self.shares_owned_following,
            Field::OwnershipNature => &mut self.ownership_nature,
        }
    }

    /// Looks a column up by its table name, e.g. `record.get("Transaction Code")`.
    pub fn get(&self, column: &str) -> Option<&str> {
        if column == "URL" {
            return Some(self.url.as_str());
        }
        Field::ALL
            .iter()
            .find(|f| f.column() == column)
            .and_then(|f| self.field(*f))
    }
}

/// Why a filing did not qualify for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disqualified {
    /// Reporting owner is neither a director nor an officer.
    NoInsiderRole,
    /// No open-market purchase (`P`) or sale (`S`).
    NoBuyOrSell,
    /// Number of `<reportingOwner>` blocks, when it is not exactly one.
    ReportingOwnerCount(usize),
    /// Number of `<nonDerivativeTransaction>` blocks, when it is not exactly one.
    TransactionCount(usize),
    MissingTag(&'static str),
}

impl fmt::Display for Disqualified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disqualified::NoInsiderRole => write!(f, "owner is neither director nor officer"),
            Disqualified::NoBuyOrSell => write!(f, "no open-market purchase or sale"),
            Disqualified::ReportingOwnerCount(n) => write!(f, "{} reporting owners", n),
            Disqualified::TransactionCount(n) => {
                write!(f, "{} non-derivative transactions", n)
            }
            Disqualified::MissingTag(tag) => write!(f, "missing {}", tag),
        }
    }
}

/// Runs the qualification gate over the raw document.
pub fn qualifies(document: &str) -> Result<(), Disqualified> {
    if !INSIDER_ROLE_FLAGS.iter().any(|s| document.contains(s)) {
        return Err(Disqualified::NoInsiderRole);
    }
    if !BUY_SELL_CODES.iter().any(|s| document.contains(s)) {
        return Err(Disqualified::NoBuyOrSell);
    }

    let owners = document.matches(REPORTING_OWNER).count();
    if owners != 1 {
        return Err(Disqualified::ReportingOwnerCount(owners));
    }

    let transactions = document.matches(NON_DERIVATIVE_TRANSACTION).count();
    if transactions != 1 {
        return Err(Disqualified::TransactionCount(transactions));
    }

    match REQUIRED_TAGS.iter().copied().find(|tag| !document.contains(tag)) {
        Some(tag) => Err(Disqualified::MissingTag(tag)),
        None => Ok(()),
    }
}

/// Scanner state between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    AwaitingTag,
    AwaitingValue(Field),
}

/// Extracts a [`FilingRecord`] from a Form 4 submission, or `None` if it does not qualify.
///
/// # Example
///
/// ```rust
/// use insiderkit::parsing::form4::extract;
///
/// // Lacks almost everything the gate asks for.
/// assert!(extract("<ownershipDocument></ownershipDocument>", "https://example.test").is_none());
/// ```
pub fn extract(document: &str, source_url: &str) -> Option<FilingRecord> {
    if let Err(reason) = qualifies(document) {
        tracing::debug!("Skipping {}: {}", source_url, reason);
        return None;
    }

    Some(FilingRecord::from_fields(source_url, scan_fields(document)))
}

/// Collects the first value of every field, scanning the non-empty lines in order.
fn scan_fields(document: &str) -> HashMap<Field, String> {
    let mut fields = HashMap::new();
    let mut state = ScanState::AwaitingTag;

    for line in document.lines().filter(|l| !l.is_empty()) {
        if let ScanState::AwaitingValue(field) = state {
            fields.insert(field, strip_markup(line));
            state = ScanState::AwaitingTag;
            continue;
        }

        let matched = Field::ALL
            .into_iter()
            .find(|f| line.contains(f.tag()) && !fields.contains_key(f));

        if let Some(field) = matched {
            match field.shape() {
                TagShape::SameLine => {
                    fields.insert(field, strip_markup(line));
                }
                TagShape::NextLine => state = ScanState::AwaitingValue(field),
            }
        }
    }

    fields
}
