//! Per-document extraction and the run-level merge.
//!
//! Each document is processed independently into a [`FileExtraction`];
//! extractions are merged in document order, so sequential and parallel
//! runs produce identical tables and diagnostics.

use anyhow::Result;
use rayon::prelude::*;

use metrofare_core::{Diagnostics, RecordAccumulator, RevenueRecord, RevenueTable, SourceLocation};
use metrofare_ingest::{FileYearResolver, is_revenue_line, parse_revenue_line};

use crate::document::{LoadedDocuments, SourceDocument, is_blank};

/// What one document contributed.
#[derive(Debug)]
pub struct FileExtraction {
    pub file_name: String,
    /// `None` when the file name carries no year and the file was skipped.
    pub starting_year: Option<i32>,
    pub records: Vec<RevenueRecord>,
    pub diagnostics: Diagnostics,
}

impl FileExtraction {
    pub fn skipped(&self) -> bool {
        self.starting_year.is_none()
    }
}

/// Outcome of a whole run.
#[derive(Debug)]
pub struct RunOutput {
    pub table: RevenueTable,
    pub diagnostics: Diagnostics,
    pub files_seen: usize,
    pub files_skipped: usize,
}

pub fn extract_document(resolver: &FileYearResolver, doc: &SourceDocument) -> FileExtraction {
    let mut diagnostics = Diagnostics::new();
    let mut records = Vec::new();

    let Some(starting_year) = resolver.starting_year(&doc.file_name) else {
        diagnostics.warn(
            SourceLocation::file(&doc.file_name),
            "no four-digit year in file name; skipping file",
        );
        return FileExtraction {
            file_name: doc.file_name.clone(),
            starting_year: None,
            records,
            diagnostics,
        };
    };

    for (page_idx, page) in doc.pages.iter().enumerate() {
        let page_no = page_idx + 1;
        if is_blank(page) {
            diagnostics.info(
                SourceLocation::page(&doc.file_name, page_no),
                "no extractable text; skipping page",
            );
            continue;
        }

        for (line_idx, line) in page.iter().enumerate() {
            if !is_revenue_line(line) {
                tracing::trace!(file = %doc.file_name, page = page_no, "not a revenue row: {line}");
                continue;
            }
            match parse_revenue_line(line, starting_year) {
                Ok(record) => records.push(record),
                Err(e) => diagnostics.warn(
                    SourceLocation::line(&doc.file_name, page_no, line_idx + 1),
                    format!("skipping line ({e}): {}", line.trim()),
                ),
            }
        }
    }

    tracing::debug!(
        file = %doc.file_name,
        starting_year,
        records = records.len(),
        "extracted document"
    );

    FileExtraction {
        file_name: doc.file_name.clone(),
        starting_year: Some(starting_year),
        records,
        diagnostics,
    }
}

/// Extract every document, merge in input order, enrich and validate.
///
/// Fails only on the post-enrichment integrity check; in that case no table
/// is returned.
pub fn extract_all(docs: &[SourceDocument], parallel: bool) -> Result<RunOutput> {
    let resolver = FileYearResolver::new()?;

    let extractions: Vec<FileExtraction> = if parallel {
        docs.par_iter()
            .map(|doc| extract_document(&resolver, doc))
            .collect()
    } else {
        docs.iter()
            .map(|doc| extract_document(&resolver, doc))
            .collect()
    };

    let mut acc = RecordAccumulator::new();
    let mut diagnostics = Diagnostics::new();
    let mut files_skipped = 0;
    for ex in extractions {
        if ex.skipped() {
            files_skipped += 1;
        }
        acc.append(ex.records);
        diagnostics.extend(ex.diagnostics);
    }

    let table = acc.finish(&mut diagnostics)?;
    tracing::info!(
        files = docs.len(),
        skipped = files_skipped,
        records = table.len(),
        "revenue table complete"
    );

    Ok(RunOutput {
        table,
        diagnostics,
        files_seen: docs.len(),
        files_skipped,
    })
}

/// [`extract_all`] over a directory load. Files the loader could not decode
/// count as seen and skipped, and their diagnostics come first.
pub fn extract_loaded(loaded: LoadedDocuments, parallel: bool) -> Result<RunOutput> {
    let mut out = extract_all(&loaded.documents, parallel)?;
    let mut diagnostics = loaded.diagnostics;
    diagnostics.extend(out.diagnostics);
    out.diagnostics = diagnostics;
    out.files_seen += loaded.undecodable;
    out.files_skipped += loaded.undecodable;
    Ok(out)
}
