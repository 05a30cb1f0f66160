use serde::{Deserialize, Serialize};

/// One row of a daily index.
///
/// Every column is kept as the text that appeared in the index. `idx_name` records the
/// index URL the row came from. Rows are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub company_name: String,
    pub form_type: String,
    pub cik: String,
    pub date_filed: String,
    pub file_name: String,
    pub idx_name: String,
}

impl IndexRecord {
    pub const COLUMNS: [&'static str; 6] = [
        "company_name",
        "form_type",
        "cik",
        "date_filed",
        "file_name",
        "idx_name",
    ];

    /// Looks a column up by name.
    pub fn get(&self, column: &str) -> Option<&str> {
        let value = match column {
            "company_name" => &self.company_name,
            "form_type" => &self.form_type,
            "cik" => &self.cik,
            "date_filed" => &self.date_filed,
            "file_name" => &self.file_name,
            "idx_name" => &self.idx_name,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn from_tokens(tokens: &[&str], source_url: &str) -> Self {
        let token = |i: usize| tokens.get(i).map(|s| s.to_string()).unwrap_or_default();
        Self {
            company_name: token(0),
            form_type: token(1),
            cik: token(2),
            date_filed: token(3),
            file_name: token(4),
            idx_name: source_url.to_string(),
        }
    }
}

pub struct IndexConfig {
    /// Number of banner lines at the top of the index that are skipped unconditionally.
    pub header_lines: usize,
    /// Column separator. Columns are padded with spaces, so any run of this many spaces ends one.
    pub delimiter: &'static str,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            header_lines: 11,
            delimiter: "   ",
        }
    }
}

/// A parser for company-sorted EDGAR daily indices (`company.YYYYMMDD.idx`).
///
/// The index starts with a fixed banner (description, last data received, column titles and
/// a dashed separator) followed by one space-padded row per filing:
///
/// ```text
/// APPLE INC                                                     4           320193      20230815    edgar/data/320193/0000320193-23-000081.txt
/// ```
///
/// Rows are split on runs of the delimiter, empty tokens are dropped, and the surviving
/// tokens map positionally onto `company_name`, `form_type`, `cik`, `date_filed` and
/// `file_name`.
///
/// The token count is not validated. A company name containing the delimiter shifts every
/// later column, and a short row leaves its trailing columns empty. Both cases are logged
/// at warn level and the row is still returned.
///
/// # Examples
///
/// ```
/// use insiderkit::parsing::index::{IndexConfig, IndexParser};
///
/// let parser = IndexParser::new(IndexConfig::default());
/// let records = parser.parse("", "https://www.sec.gov/Archives/edgar/daily-index/x.idx");
/// assert!(records.is_empty());
/// ```
pub struct IndexParser {
    config: IndexConfig,
}

impl IndexParser {
    const EXPECTED_TOKENS: usize = 5;

    pub fn new(config: IndexConfig) -> Self {
        Self { config }
    }

    /// Parses a whole index document. `source_url` is copied into every record's `idx_name`.
    pub fn parse(&self, document: &str, source_url: &str) -> Vec<IndexRecord> {
        let mut records = Vec::new();
        let mut malformed = 0usize;

        for line in document.lines().skip(self.config.header_lines) {
            if Self::is_structural(line) {
                continue;
            }

            let tokens: Vec<&str> = line
                .split(self.config.delimiter)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect();

            if tokens.len() != Self::EXPECTED_TOKENS {
                malformed += 1;
                tracing::debug!("Index row with {} columns: {:?}", tokens.len(), line);
            }

            records.push(IndexRecord::from_tokens(&tokens, source_url));
        }

        if malformed > 0 {
            tracing::warn!(
                "{} of {} rows in {} did not have {} columns",
                malformed,
                records.len(),
                source_url,
                Self::EXPECTED_TOKENS
            );
        }

        records
    }

    /// Blank lines and dashed separators carry no filing.
    fn is_structural(line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with("---")
    }
}

/// Parses a daily index with the default layout (11 banner lines, three-space delimiter).
pub fn parse_index(document: &str, source_url: &str) -> Vec<IndexRecord> {
    IndexParser::new(IndexConfig::default()).parse(document, source_url)
}
