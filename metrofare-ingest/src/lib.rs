//! metrofare-ingest: filename year resolution, line classification and
//! revenue-line parsing over text extracted from monthly revenue reports.

pub mod file_year;
pub mod parsers;
pub mod types;

pub use file_year::FileYearResolver;
pub use parsers::classifier::is_revenue_line;
pub use parsers::revenue_line::parse_revenue_line;
pub use types::LineError;
