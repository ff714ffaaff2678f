//! Small formatting helpers shared by the card components.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Timestamp layouts the backend is known to emit besides RFC 3339.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// Format a backend timestamp for display, e.g. `Mar 1, 2024`.
///
/// Unparseable input is shown as-is rather than dropped, so a timestamp in
/// a shape this never anticipated still tells the reader something.
#[must_use]
pub fn format_date(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%b %-d, %Y").to_string();
    }
    for layout in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, layout) {
            return parsed.format("%b %-d, %Y").to_string();
        }
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.format("%b %-d, %Y").to_string();
    }
    raw.to_string()
}

/// Group a count into thousands, e.g. `1234567` becomes `1,234,567`.
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// HTML-escape text outside a template, using maud's own escaper so the
/// result matches what rendered fragments contain.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    maud::Escaper::new(&mut escaped)
        .write_str(text)
        .expect("writing to a String cannot fail");
    escaped
}
