use super::calendar::parse_date;
use super::error::Result;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Form type downloaded when a request does not name one.
pub const DEFAULT_FORM: &str = "4";

/// Parameters of a download run.
///
/// Dates are inclusive. A missing date means "yesterday": EDGAR publishes a day's index
/// after the day is over, so the current day is never requested. Defaults are resolved by
/// [`DownloadRequest::date_range`] at the entry point, not by the parsers.
///
/// `form` keeps only index rows whose form type matches exactly. `None` or an empty string
/// keeps every form type.
///
/// The request deserializes from configuration with `serde`; a `form` that is not a string
/// is rejected there, before any request is made:
///
/// ```rust
/// use insiderkit::DownloadRequest;
///
/// let ok: DownloadRequest = serde_json::from_str(r#"{"start": "2023-08-14", "form": "4"}"#)?;
/// assert_eq!(ok.form.as_deref(), Some("4"));
///
/// let err = serde_json::from_str::<DownloadRequest>(r#"{"form": 123}"#).unwrap_err();
/// assert!(err.to_string().contains("invalid type"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadRequest {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub form: Option<String>,
}

impl Default for DownloadRequest {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            form: Some(DEFAULT_FORM.to_string()),
        }
    }
}

impl DownloadRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets both ends of the range from `YYYY-MM-DD` strings.
    pub fn with_range(mut self, start: &str, end: &str) -> Result<Self> {
        self.start = Some(parse_date(start)?);
        self.end = Some(parse_date(end)?);
        Ok(self)
    }

    pub fn with_form(mut self, form: impl Into<String>) -> Self {
        self.form = Some(form.into());
        self
    }

    /// Keeps every form type found in the indices.
    pub fn all_forms(mut self) -> Self {
        self.form = None;
        self
    }

    /// The form filter to apply, if any.
    pub fn form_filter(&self) -> Option<&str> {
        self.form.as_deref().filter(|f| !f.is_empty())
    }

    /// Resolves missing dates against `today`; both default to the day before.
    pub fn date_range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let yesterday = today - Duration::days(1);
        (
            self.start.unwrap_or(yesterday),
            self.end.unwrap_or(yesterday),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InsiderError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults() {
        let request = DownloadRequest::new();
        assert_eq!(request.form_filter(), Some("4"));
        assert_eq!(
            request.date_range(date(2023, 8, 16)),
            (date(2023, 8, 15), date(2023, 8, 15))
        );
    }

    #[test]
    fn test_explicit_dates_win() {
        let request = DownloadRequest::new()
            .with_start(date(2023, 8, 1))
            .with_end(date(2023, 8, 3));
        assert_eq!(
            request.date_range(date(2024, 1, 1)),
            (date(2023, 8, 1), date(2023, 8, 3))
        );
    }

    #[test]
    fn test_with_range_parses_strings() {
        let request = DownloadRequest::new()
            .with_range("2023-08-14", "2023-08-15")
            .unwrap();
        assert_eq!(request.start, Some(date(2023, 8, 14)));
        assert_eq!(request.end, Some(date(2023, 8, 15)));

        let err = DownloadRequest::new().with_range("yesterday", "2023-08-15");
        assert!(matches!(err, Err(InsiderError::InvalidDate(_))));
    }

    #[test]
    fn test_empty_form_keeps_everything() {
        assert_eq!(DownloadRequest::new().with_form("").form_filter(), None);
        assert_eq!(DownloadRequest::new().all_forms().form_filter(), None);
        assert_eq!(
            DownloadRequest::new().with_form("4/A").form_filter(),
            Some("4/A")
        );
    }

    #[test]
    fn test_deserialize_rejects_non_string_form() {
        let result = serde_json::from_value::<DownloadRequest>(serde_json::json!({ "form": 123 }));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("invalid type"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let request: DownloadRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, DownloadRequest::default());

        let request: DownloadRequest =
            serde_json::from_str(r#"{"start":"2023-08-14","end":"2023-08-15","form":null}"#)
                .unwrap();
        assert_eq!(request.start, Some(date(2023, 8, 14)));
        assert_eq!(request.form_filter(), None);
    }
}
