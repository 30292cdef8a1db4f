//! metrofare-core: revenue record types, fiscal calendar mapping and accumulation

pub mod accumulator;
pub mod diagnostics;
pub mod fiscal;
pub mod record;

pub use accumulator::{IntegrityError, RecordAccumulator, RevenueTable, TABLE_SOURCE};
pub use diagnostics::{Diagnostic, Diagnostics, Severity, SourceLocation};
pub use fiscal::{CalendarPeriod, FiscalPeriod, enrich, map_to_fiscal};
pub use record::{RevenueFigures, RevenueRecord, RevenueRow};
