//! Cheap pre-filter for revenue rows.
//!
//! Monthly revenue tables print one row per month, led by a localized month
//! marker:
//!   4月   1,234,567  +5.3%  2,345,678  -1.2%  3,580,245  +2.1%
//! Only lines carrying a month or period marker reach the full parser.
//! Field counts and numbers are not checked here.

/// Month glyph, quarter and fiscal-year keywords.
const PERIOD_MARKERS: &[&str] = &["月", "Quarter", "四半期", "年度", "Fiscal Year", "FY"];

/// Period totals share the month markers but are not monthly rows.
const SUMMARY_MARKERS: &[&str] = &["合計"];

pub fn is_revenue_line(line: &str) -> bool {
    PERIOD_MARKERS.iter().any(|m| line.contains(m))
        && !SUMMARY_MARKERS.iter().any(|m| line.contains(m))
}
