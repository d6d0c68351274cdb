//! Display formatting for timestamps, token counts and latencies.
//!
//! Missing values render as a `"-"` placeholder rather than an error so
//! table cells and detail panes can feed optional fields straight through.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Placeholder shown for absent values.
const MISSING: &str = "-";

/// Display shape for timestamps: 4-digit year, 2-digit month, day, hour
/// and minute.
const DATE_DISPLAY: &str = "%Y/%m/%d %H:%M";

/// Format a server timestamp as `YYYY/MM/DD HH:MM`.
///
/// Accepts RFC 3339 (the shape model timestamps arrive in) as well as the
/// `YYYY-MM-DD HH:MM:SS` shape used by the response envelope and bare
/// dates. `None` or an empty string yield `"-"`; anything unparseable
/// yields the textual placeholder `"Invalid Date"`, never an error.
pub fn format_date(value: Option<&str>) -> String {
    let raw = match value {
        Some(s) if !s.is_empty() => s,
        _ => return MISSING.to_string(),
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format(DATE_DISPLAY).to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return parsed.format(DATE_DISPLAY).to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.format("%Y/%m/%d 00:00").to_string();
    }

    "Invalid Date".to_string()
}

/// Format a token count with a thousands-separating comma every three
/// digits from the right.
///
/// `None` yields `"-"`; zero is a real count and renders as `"0"`. A
/// negative value keeps its sign and groups its digits the same way.
pub fn format_token_count(count: Option<i64>) -> String {
    let count = match count {
        Some(n) => n,
        None => return MISSING.to_string(),
    };

    let digits = count.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if count < 0 {
        grouped.push('-');
    }
    grouped.chars().rev().collect()
}

/// Format a latency in milliseconds.
///
/// Values under one second render as `"{ms}ms"`, everything else as
/// seconds fixed to two decimals. `None` yields `"-"`; zero is a valid
/// measurement.
pub fn format_latency(ms: Option<i64>) -> String {
    match ms {
        None => MISSING.to_string(),
        Some(ms) if ms < 1000 => format!("{}ms", ms),
        Some(ms) => format!("{:.2}s", ms as f64 / 1000.0),
    }
}
