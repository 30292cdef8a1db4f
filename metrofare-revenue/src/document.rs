//! Source documents: extracted report text, one file per reporting year.
//!
//! Text files follow pdftotext conventions: pages are separated by a form
//! feed, lines by newlines.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use metrofare_core::{Diagnostics, SourceLocation};

pub const FORM_FEED: char = '\u{0C}';

/// One report's extracted text, split into pages of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub file_name: String,
    pub pages: Vec<Vec<String>>,
}

impl SourceDocument {
    /// Build a single-page document from in-memory lines.
    pub fn from_lines<S: AsRef<str>>(file_name: impl Into<String>, lines: &[S]) -> Self {
        Self {
            file_name: file_name.into(),
            pages: vec![lines.iter().map(|l| l.as_ref().to_string()).collect()],
        }
    }

    pub fn from_text(file_name: impl Into<String>, text: &str, page_separator: char) -> Self {
        let mut pages: Vec<Vec<String>> = text
            .split(page_separator)
            .map(|page| page.lines().map(str::to_string).collect())
            .collect();
        // pdftotext terminates the last page with a separator too.
        if pages.len() > 1 && pages.last().is_some_and(|p| is_blank(p)) {
            pages.pop();
        }
        Self {
            file_name: file_name.into(),
            pages,
        }
    }
}

pub(crate) fn is_blank(page: &[String]) -> bool {
    page.iter().all(|l| l.trim().is_empty())
}

/// Documents read from a directory, plus the files that had to be skipped.
#[derive(Debug, Default)]
pub struct LoadedDocuments {
    pub documents: Vec<SourceDocument>,
    /// Matching files whose contents are not UTF-8 text
    pub undecodable: usize,
    pub diagnostics: Diagnostics,
}

/// Load every file in `dir` with the given extension (case-insensitive),
/// sorted by file name.
///
/// A file that is not valid UTF-8 is skipped with a warning; I/O errors
/// fail the load.
pub fn load_documents(
    dir: impl AsRef<Path>,
    extension: &str,
    page_separator: char,
) -> Result<LoadedDocuments> {
    let dir = dir.as_ref();
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches {
            paths.push(path);
        }
    }
    paths.sort();

    let mut loaded = LoadedDocuments::default();
    for path in paths {
        let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match String::from_utf8(bytes) {
            Ok(text) => loaded
                .documents
                .push(SourceDocument::from_text(file_name, &text, page_separator)),
            Err(e) => {
                loaded.undecodable += 1;
                loaded.diagnostics.warn(
                    SourceLocation::file(file_name),
                    format!("not valid UTF-8 ({}); skipping file", e.utf8_error()),
                );
            }
        }
    }
    Ok(loaded)
}
