//! PDF report rendering.
//!
//! Reports are pure functions of the product rows and a generation timestamp:
//! the same input renders byte-identical documents.

mod full;
mod low_stock;
pub mod pdf;

use chrono::{DateTime, Utc};

pub use full::full_inventory;
pub use low_stock::low_stock;

pub const FULL_REPORT_PREFIX: &str = "product_list";
pub const LOW_STOCK_REPORT_PREFIX: &str = "low_stock_report";

pub const FOOTER: &str = "Report generated by Inventory Management System";

/// A rendered document ready to be served as an attachment
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// `<prefix>_YYYYMMDD_HHMMSS.pdf`
pub fn report_filename(prefix: &str, generated_at: DateTime<Utc>) -> String {
    format!("{prefix}_{}.pdf", generated_at.format("%Y%m%d_%H%M%S"))
}

pub fn generated_on(generated_at: DateTime<Utc>) -> String {
    format!("Generated on {}", generated_at.format("%B %d, %Y at %I:%M %p"))
}

/// `$1,234.56`
pub fn format_currency(value: f64) -> String {
    let cents = (value * 100.0).round() as i128;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();

    let digits = (cents / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// `$1234.56`, as used inside table cells
pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}

/// Cut to `max` characters and mark the cut with "...".
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_report_filename() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 16, 9, 5, 7).unwrap();
        assert_eq!(
            report_filename(FULL_REPORT_PREFIX, ts),
            "product_list_20261016_090507.pdf"
        );
    }

    #[test]
    fn test_generated_on() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 16, 21, 30, 0).unwrap();
        assert_eq!(generated_on(ts), "Generated on October 16, 2026 at 09:30 PM");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(115.0), "$115.00");
        assert_eq!(format_currency(1234.567), "$1,234.57");
        assert_eq!(format_currency(1_000_000.5), "$1,000,000.50");
        assert_eq!(format_currency(1e17), "$100,000,000,000,000,000.00");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 25), "short");
        let long = "A".repeat(31);
        assert_eq!(truncate(&long, 30), format!("{}...", "A".repeat(30)));
    }
}
