//! Monthly revenue record types.

use serde::{Deserialize, Serialize};

use crate::fiscal::{CalendarPeriod, FiscalPeriod};

/// The six figures printed on one monthly revenue row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueFigures {
    pub commuter_revenue: u64,
    /// Signed, in percentage points
    pub commuter_yoy_pct: f64,
    pub non_commuter_revenue: u64,
    pub non_commuter_yoy_pct: f64,
    /// Reported independently; not checked against the other two
    pub total_revenue: u64,
    pub total_yoy_pct: f64,
}

/// One parsed monthly revenue row.
///
/// The fiscal period is validated at construction. The calendar projection
/// is absent until [`RevenueRecord::enriched`] runs, after which the record
/// is not changed again.
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueRecord {
    period: FiscalPeriod,
    figures: RevenueFigures,
    calendar: Option<CalendarPeriod>,
}

impl RevenueRecord {
    pub fn new(period: FiscalPeriod, figures: RevenueFigures) -> Self {
        Self {
            period,
            figures,
            calendar: None,
        }
    }

    pub fn period(&self) -> FiscalPeriod {
        self.period
    }

    pub fn fiscal_year(&self) -> i32 {
        self.period.fiscal_year()
    }

    pub fn fiscal_month(&self) -> u32 {
        self.period.fiscal_month()
    }

    pub fn figures(&self) -> &RevenueFigures {
        &self.figures
    }

    pub fn calendar(&self) -> Option<CalendarPeriod> {
        self.calendar
    }

    pub fn calendar_year(&self) -> Option<i32> {
        self.calendar.map(|c| c.year)
    }

    pub fn calendar_month(&self) -> Option<&'static str> {
        self.calendar.map(|c| c.month_name())
    }

    /// Attach the calendar projection. A record that already carries one is
    /// returned unchanged.
    pub fn enriched(self) -> Self {
        if self.calendar.is_some() {
            return self;
        }
        let calendar = self.period.to_calendar();
        Self { calendar, ..self }
    }
}

/// Flat, serializable view of a record: the ten output columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRow {
    pub fiscal_year: i32,
    pub fiscal_month: u32,
    pub commuter_revenue: u64,
    pub commuter_yoy_pct: f64,
    pub non_commuter_revenue: u64,
    pub non_commuter_yoy_pct: f64,
    pub total_revenue: u64,
    pub total_yoy_pct: f64,
    pub calendar_year: Option<i32>,
    pub calendar_month: Option<String>,
}

impl From<&RevenueRecord> for RevenueRow {
    fn from(r: &RevenueRecord) -> Self {
        let f = r.figures();
        Self {
            fiscal_year: r.fiscal_year(),
            fiscal_month: r.fiscal_month(),
            commuter_revenue: f.commuter_revenue,
            commuter_yoy_pct: f.commuter_yoy_pct,
            non_commuter_revenue: f.non_commuter_revenue,
            non_commuter_yoy_pct: f.non_commuter_yoy_pct,
            total_revenue: f.total_revenue,
            total_yoy_pct: f.total_yoy_pct,
            calendar_year: r.calendar_year(),
            calendar_month: r.calendar_month().map(str::to_string),
        }
    }
}
