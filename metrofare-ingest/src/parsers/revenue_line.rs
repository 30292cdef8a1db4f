//! Monthly revenue row parser.
//!
//! Expected whitespace-separated layout after text extraction:
//!   month  commuter  yoy%  non-commuter  yoy%  total  yoy%
//!   4月    1,234,567 +5.3% 2,345,678     -1.2% 3,580,245 +2.1%
//! Anything after the seventh token is ignored.

use metrofare_core::{RevenueFigures, RevenueRecord, map_to_fiscal};

use crate::types::LineError;

const MONTH: usize = 0;
const COMMUTER: usize = 1;
const COMMUTER_YOY: usize = 2;
const NON_COMMUTER: usize = 3;
const NON_COMMUTER_YOY: usize = 4;
const TOTAL: usize = 5;
const TOTAL_YOY: usize = 6;

/// Tokens needed to read up to and including `TOTAL_YOY`.
const MIN_TOKENS: usize = TOTAL_YOY + 1;

/// Parse one classified line from a report whose fiscal year starts in
/// `starting_year`.
pub fn parse_revenue_line(line: &str, starting_year: i32) -> Result<RevenueRecord, LineError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < MIN_TOKENS {
        return Err(LineError::TooFewTokens {
            expected: MIN_TOKENS,
            found: parts.len(),
        });
    }

    let month_index = month_index(parts[MONTH])?;

    let figures = RevenueFigures {
        commuter_revenue: parse_amount(parts[COMMUTER])?,
        commuter_yoy_pct: parse_percent(parts[COMMUTER_YOY])?,
        non_commuter_revenue: parse_amount(parts[NON_COMMUTER])?,
        non_commuter_yoy_pct: parse_percent(parts[NON_COMMUTER_YOY])?,
        total_revenue: parse_amount(parts[TOTAL])?,
        total_yoy_pct: parse_percent(parts[TOTAL_YOY])?,
    };

    let period =
        map_to_fiscal(starting_year, month_index).ok_or(LineError::UnmappedMonth(month_index))?;

    Ok(RevenueRecord::new(period, figures))
}

/// Leading ASCII digit run of the month marker ("4月" -> 4).
fn month_index(token: &str) -> Result<u32, LineError> {
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    token[..end]
        .parse()
        .map_err(|_| LineError::NoMonthDigits(token.to_string()))
}

/// "1,234,567" -> 1234567
fn parse_amount(token: &str) -> Result<u64, LineError> {
    let raw = token.replace(',', "");
    raw.parse()
        .map_err(|_| LineError::InvalidAmount(token.to_string()))
}

/// "+5.3%" -> 5.3, "-1.2%" -> -1.2
fn parse_percent(token: &str) -> Result<f64, LineError> {
    let raw = token.strip_suffix('%').unwrap_or(token);
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(LineError::InvalidPercent(token.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APRIL: &str = "4月 1,234,567 +5.3% 2,345,678 -1.2% 3,580,245 +2.1%";

    #[test]
    fn test_parses_april_row() {
        let r = parse_revenue_line(APRIL, 2020).unwrap();
        assert_eq!(r.fiscal_year(), 2021);
        assert_eq!(r.fiscal_month(), 1);
        let f = r.figures();
        assert_eq!(f.commuter_revenue, 1_234_567);
        assert_eq!(f.commuter_yoy_pct, 5.3);
        assert_eq!(f.non_commuter_revenue, 2_345_678);
        assert_eq!(f.non_commuter_yoy_pct, -1.2);
        assert_eq!(f.total_revenue, 3_580_245);
        assert_eq!(f.total_yoy_pct, 2.1);
        assert!(r.calendar_year().is_none());
    }

    #[test]
    fn test_january_row_is_fiscal_month_ten() {
        let r = parse_revenue_line("1月 10 +0.0% 20 0.5% 30 -3%", 2020).unwrap();
        assert_eq!(r.fiscal_year(), 2021);
        assert_eq!(r.fiscal_month(), 10);
        assert_eq!(r.figures().non_commuter_yoy_pct, 0.5);
        assert_eq!(r.figures().total_yoy_pct, -3.0);
    }

    #[test]
    fn test_ideographic_spaces_split() {
        let r = parse_revenue_line("10月\u{3000}1,000 +1.0% 2,000 +2.0% 3,000 +3.0%", 2020).unwrap();
        assert_eq!(r.fiscal_month(), 7);
    }

    #[test]
    fn test_too_few_tokens() {
        let err = parse_revenue_line("4月 1,234,567 +5.3% 2,345,678 -1.2%", 2020).unwrap_err();
        assert_eq!(err, LineError::TooFewTokens { expected: 7, found: 5 });
    }

    #[test]
    fn test_six_tokens_rejected_before_reading_last_field() {
        let err = parse_revenue_line("4月 1,234,567 +5.3% 2,345,678 -1.2% 3,580,245", 2020).unwrap_err();
        assert_eq!(err, LineError::TooFewTokens { expected: 7, found: 6 });
    }

    #[test]
    fn test_non_numeric_amount() {
        let err = parse_revenue_line("4月 abc +5.3% 2,345,678 -1.2% 3,580,245 +2.1%", 2020).unwrap_err();
        assert_eq!(err, LineError::InvalidAmount("abc".to_string()));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = parse_revenue_line("4月 -1,000 +5.3% 2,345,678 -1.2% 3,580,245 +2.1%", 2020).unwrap_err();
        assert_eq!(err, LineError::InvalidAmount("-1,000".to_string()));
    }

    #[test]
    fn test_bad_percent() {
        let err = parse_revenue_line("4月 1 +x% 2 -1.2% 3 +2.1%", 2020).unwrap_err();
        assert_eq!(err, LineError::InvalidPercent("+x%".to_string()));

        let err = parse_revenue_line("4月 1 +5% 2 -1.2% 3 NaN%", 2020).unwrap_err();
        assert_eq!(err, LineError::InvalidPercent("NaN%".to_string()));
    }

    #[test]
    fn test_month_marker_without_digits() {
        let err = parse_revenue_line("第1四半期 1 +5% 2 -1% 3 +2%", 2020).unwrap_err();
        assert_eq!(err, LineError::NoMonthDigits("第1四半期".to_string()));
    }

    #[test]
    fn test_unmapped_month() {
        let err = parse_revenue_line("13月 1 +5% 2 -1% 3 +2%", 2020).unwrap_err();
        assert_eq!(err, LineError::UnmappedMonth(13));

        let err = parse_revenue_line("0月 1 +5% 2 -1% 3 +2%", 2020).unwrap_err();
        assert_eq!(err, LineError::UnmappedMonth(0));
    }

    #[test]
    fn test_error_message_names_token() {
        let err = parse_revenue_line("4月 1,2x4 +5% 2 -1% 3 +2%", 2020).unwrap_err();
        assert!(err.to_string().contains("1,2x4"));
    }
}
