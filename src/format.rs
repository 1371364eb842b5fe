//! Display formatting for application rows

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::models::Application;

/// Format an amount as pounds sterling: `£` prefix, comma grouping and at
/// most two fraction digits, dropping trailing zeros (`£1,234`, `£1,234.5`).
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("£{}", amount);
    }

    // Above 2^53 pence an f64 no longer holds whole pence, so only pounds are shown
    let pence = (amount.abs() * 100.0).round();
    let (pounds, fraction) = if pence < MAX_EXACT_PENCE {
        let pence = pence as u64;
        ((pence / 100).to_string(), pence % 100)
    } else {
        (format!("{:.0}", amount.abs().round()), 0)
    };

    let mut out = String::new();
    if amount < 0.0 && (pounds != "0" || fraction != 0) {
        out.push('-');
    }
    out.push('£');
    out.push_str(&group_thousands(&pounds));

    if fraction != 0 {
        let digits = format!("{:02}", fraction);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }

    out
}

const MAX_EXACT_PENCE: f64 = 9_007_199_254_740_992.0;

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Parse the calendar date out of an ISO-8601 string.
///
/// Timestamps with an offset are resolved to UTC before the date is taken,
/// not to the local timezone, so the same input renders the same date on
/// every machine. Near midnight this can differ from what a browser in a
/// non-UTC zone shows.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// `DD-MM-YYYY`, or the input unchanged when it is not a date
pub fn format_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%d-%m-%Y").to_string(),
        None => value.to_string(),
    }
}

/// One labelled cell of an application row
#[derive(Debug, Clone, PartialEq)]
pub struct RowCell {
    pub label: &'static str,
    pub value: String,
}

pub const ROW_LABELS: [&str; 6] = [
    "Company",
    "Name",
    "Email",
    "Loan Amount",
    "Application Date",
    "Expiry date",
];

/// Formatted cells for one application, in display order
pub fn application_cells(app: &Application) -> Vec<RowCell> {
    let values = [
        app.company.clone().unwrap_or_default(),
        app.full_name(),
        app.email.clone().unwrap_or_default(),
        app.loan_amount.map(format_currency).unwrap_or_default(),
        app.date_created.as_deref().map(format_date).unwrap_or_default(),
        app.expiry_date.as_deref().map(format_date).unwrap_or_default(),
    ];

    ROW_LABELS
        .into_iter()
        .zip(values)
        .map(|(label, value)| RowCell { label, value })
        .collect()
}

/// Pad or truncate `s` to exactly `width` terminal columns
pub fn fit_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        let mut out = s.to_string();
        out.push_str(&" ".repeat(width - s.width()));
        return out;
    }

    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
