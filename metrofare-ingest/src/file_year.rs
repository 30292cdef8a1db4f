//! Fiscal starting year from a report's file name.
//!
//! Report files carry the fiscal-year label somewhere in the name
//! (`revenue_2021_report.txt`). The label is the year the fiscal year ends,
//! so the starting year is one less.

use anyhow::Result;
use regex::Regex;

pub struct FileYearResolver {
    year_re: Regex,
}

impl FileYearResolver {
    pub fn new() -> Result<Self> {
        // Exactly four ASCII digits, not part of a longer digit run.
        let year_re = Regex::new(r"(?:^|[^0-9])(?P<year>[0-9]{4})(?:[^0-9]|$)")?;
        Ok(Self { year_re })
    }

    /// Fiscal-year label printed in the file name, if any.
    pub fn label(&self, file_name: &str) -> Option<i32> {
        let caps = self.year_re.captures(file_name)?;
        caps["year"].parse().ok()
    }

    /// Calendar year in which the report's fiscal year begins.
    ///
    /// `None` means the file is not a revenue report and should be skipped.
    pub fn starting_year(&self, file_name: &str) -> Option<i32> {
        self.label(file_name).map(|label| label - 1)
    }
}
