use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Bucket key used for timestamps that cannot be interpreted as a date.
pub const INVALID_DATE: &str = "Invalid Date";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Interpret a textual timestamp the way a browser `Date` constructor would
/// for the shapes found in transaction dumps.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (optionally with `T` and
/// fractional seconds), `YYYY-MM-DD`, `YYYY-MM`, a bare four-digit year, and
/// US-style `M/D/YYYY` with an optional time. Naive values are taken as UTC.
/// Longer all-digit strings are read as epoch milliseconds.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(naive.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return start_of_day(date);
        }
    }

    if text.chars().all(|c| c.is_ascii_digit()) {
        if text.len() == 4 {
            let year = text.parse().ok()?;
            return NaiveDate::from_ymd_opt(year, 1, 1).and_then(start_of_day);
        }
        return text.parse::<f64>().ok().and_then(from_epoch_millis);
    }

    // `YYYY-MM` is the first of that month.
    NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d")
        .ok()
        .and_then(start_of_day)
}

fn start_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

/// Epoch milliseconds to an instant; fractional milliseconds are dropped.
pub fn from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64)
}

/// Day-granularity label for a bucket, in UTC.
pub fn format_day(at: Option<DateTime<Utc>>, format: &str) -> String {
    match at {
        Some(at) => at.date_naive().format(format).to_string(),
        None => INVALID_DATE.to_string(),
    }
}
