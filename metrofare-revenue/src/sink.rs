//! Delimited UTF-8 output for downstream relational import.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

use metrofare_core::RevenueTable;

/// Column order of [`metrofare_core::RevenueRow`].
pub const COLUMNS: [&str; 10] = [
    "fiscal_year",
    "fiscal_month",
    "commuter_revenue",
    "commuter_yoy_pct",
    "non_commuter_revenue",
    "non_commuter_yoy_pct",
    "total_revenue",
    "total_yoy_pct",
    "calendar_year",
    "calendar_month",
];

/// Write the table with a header row, one line per record. The header is
/// written even when the table is empty.
pub fn write_revenue<W: Write>(writer: W, table: &RevenueTable, delimiter: u8) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(COLUMNS)?;
    for row in table.rows() {
        wtr.serialize(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the table to `path`, creating parent directories.
pub fn write_revenue_csv(path: impl AsRef<Path>, table: &RevenueTable, delimiter: u8) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_revenue(file, table, delimiter).with_context(|| format!("write {}", path.display()))
}
