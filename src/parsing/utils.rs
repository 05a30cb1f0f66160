use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid markup regex"));

/// Removes every `<...>` tag from a line and trims the remainder.
pub fn strip_markup(line: &str) -> String {
    MARKUP.replace_all(line, "").trim().to_string()
}
