//! metrofare-revenue: report text loading, per-document extraction and the CSV sink

pub mod document;
pub mod extract;
pub mod sink;

pub use document::{FORM_FEED, LoadedDocuments, SourceDocument, load_documents};
pub use extract::{FileExtraction, RunOutput, extract_all, extract_document, extract_loaded};
pub use sink::{COLUMNS, write_revenue, write_revenue_csv};
