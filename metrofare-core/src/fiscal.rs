//! Fiscal calendar utilities: April-to-March fiscal years.
//!
//! A fiscal year is labelled by the calendar year in which it ends. Fiscal
//! month 1 is April of the starting year; fiscal months 10..=12 are
//! January..March of the following calendar year.

use chrono::Month;

/// Calendar months in fiscal order (fiscal month 1 = April).
const FISCAL_MONTH_TO_CALENDAR: [Month; 12] = [
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
    Month::January,
    Month::February,
    Month::March,
];

/// Fiscal months after this one fall in the next calendar year.
const LAST_MONTH_OF_STARTING_YEAR: u32 = 9;

/// A validated (fiscal year, fiscal month) pair.
///
/// Only [`map_to_fiscal`] builds one, and it refuses months outside 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FiscalPeriod {
    fiscal_year: i32,
    fiscal_month: u32,
}

impl FiscalPeriod {
    pub fn fiscal_year(&self) -> i32 {
        self.fiscal_year
    }

    pub fn fiscal_month(&self) -> u32 {
        self.fiscal_month
    }

    pub fn to_calendar(&self) -> Option<CalendarPeriod> {
        enrich(self.fiscal_year, self.fiscal_month)
    }
}

/// Calendar projection of a fiscal period, filled in by the enrichment pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarPeriod {
    pub year: i32,
    pub month: Month,
}

impl CalendarPeriod {
    /// Full English month name ("April").
    pub fn month_name(&self) -> &'static str {
        self.month.name()
    }
}

/// Map a calendar month index seen in a report whose fiscal year starts in
/// `starting_year` onto its fiscal period.
///
/// Returns `None` for indices outside 1..=12.
pub fn map_to_fiscal(starting_year: i32, month_index: u32) -> Option<FiscalPeriod> {
    match month_index {
        // April..December: first nine months of the fiscal year.
        4..=12 => Some(FiscalPeriod {
            fiscal_year: starting_year + 1,
            fiscal_month: month_index - 3,
        }),
        // January..March: final quarter, same fiscal-year label.
        1..=3 => Some(FiscalPeriod {
            fiscal_year: starting_year + 1,
            fiscal_month: month_index + 9,
        }),
        _ => None,
    }
}

/// Project a fiscal (year, month) back onto the ordinary calendar.
///
/// Takes raw integers so it can be run over untrusted data; months outside
/// 1..=12 yield `None`.
pub fn enrich(fiscal_year: i32, fiscal_month: u32) -> Option<CalendarPeriod> {
    if !(1..=12).contains(&fiscal_month) {
        return None;
    }
    let month = FISCAL_MONTH_TO_CALENDAR[(fiscal_month - 1) as usize];
    let year = if fiscal_month > LAST_MONTH_OF_STARTING_YEAR {
        fiscal_year
    } else {
        fiscal_year - 1
    };
    Some(CalendarPeriod { year, month })
}
