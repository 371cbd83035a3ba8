// Timestamp encodings understood by the series builder
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// How the time column of a row is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeType {
    /// Unix seconds (the default)
    Mysql,
    /// Free-form date string
    Date,
    /// Already epoch milliseconds
    Plain,
    /// Caller-registered conversion
    Custom(String),
}

impl TimeType {
    pub fn parse(tag: Option<&str>) -> Self {
        match tag {
            None | Some("mysql") => TimeType::Mysql,
            Some("date") => TimeType::Date,
            Some("plain") => TimeType::Plain,
            Some(other) => TimeType::Custom(other.to_string()),
        }
    }

    pub fn is_builtin(tag: &str) -> bool {
        matches!(tag, "mysql" | "date" | "plain")
    }
}

/// Name of the handler a custom tag dispatches to: "range" -> "processRange"
pub fn handler_name(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => format!("process{}{}", first.to_uppercase(), chars.as_str()),
        None => "process".to_string(),
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

/// Parse a date string into Unix seconds.
///
/// Zoned forms (RFC 3339, RFC 2822) keep their offset; naive forms are read as UTC.
/// `@<seconds>` is accepted as a raw Unix timestamp.
pub fn parse_date_seconds(input: &str) -> Option<i64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(raw) = input.strip_prefix('@') {
        return raw.parse().ok();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.timestamp());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt.and_utc().timestamp());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp());
        }
    }

    None
}
