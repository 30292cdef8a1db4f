//! Record accumulation across files, then a single enrichment pass.
//!
//! Lifecycle: append, enrich once, freeze. The finished [`RevenueTable`]
//! only exists if every row carries its calendar projection.

use thiserror::Error;

use crate::diagnostics::{Diagnostics, SourceLocation};
use crate::record::{RevenueRecord, RevenueRow};

/// Location used for table-wide diagnostics.
pub const TABLE_SOURCE: &str = "revenue table";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("row {index} (fiscal {fiscal_year}/{fiscal_month}) has no calendar year after enrichment")]
    MissingCalendar {
        index: usize,
        fiscal_year: i32,
        fiscal_month: u32,
    },
}

/// Collects records in file-then-page-then-line order.
#[derive(Debug, Default)]
pub struct RecordAccumulator {
    records: Vec<RevenueRecord>,
}

impl RecordAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: RevenueRecord) {
        self.records.push(record);
    }

    pub fn append(&mut self, records: Vec<RevenueRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Run the enrichment pass over the whole table and validate it.
    ///
    /// An integrity failure is also recorded as an Error diagnostic.
    pub fn finish(self, diagnostics: &mut Diagnostics) -> Result<RevenueTable, IntegrityError> {
        let records: Vec<RevenueRecord> = self
            .records
            .into_iter()
            .map(RevenueRecord::enriched)
            .collect();
        validate(&records, diagnostics)?;
        Ok(RevenueTable { records })
    }
}

fn validate(records: &[RevenueRecord], diagnostics: &mut Diagnostics) -> Result<(), IntegrityError> {
    let Some(index) = records.iter().position(|r| r.calendar_year().is_none()) else {
        return Ok(());
    };
    let r = &records[index];
    let err = IntegrityError::MissingCalendar {
        index,
        fiscal_year: r.fiscal_year(),
        fiscal_month: r.fiscal_month(),
    };
    diagnostics.error(SourceLocation::file(TABLE_SOURCE), err.to_string());
    Err(err)
}

/// Enriched, validated revenue table ready for an output sink.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevenueTable {
    records: Vec<RevenueRecord>,
}

impl RevenueTable {
    pub fn records(&self) -> &[RevenueRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = RevenueRow> + '_ {
        self.records.iter().map(RevenueRow::from)
    }
}
