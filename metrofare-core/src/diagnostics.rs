//! Structured diagnostics for skipped files, pages and lines.
//!
//! Diagnostics are collected in order so callers (and tests) can inspect
//! them; each push is also forwarded to `tracing`.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Where a diagnostic came from. Page and line are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub page: Option<usize>,
    pub line: Option<usize>,
}

impl SourceLocation {
    pub fn file(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            page: None,
            line: None,
        }
    }

    pub fn page(file: impl Into<String>, page: usize) -> Self {
        Self {
            page: Some(page),
            ..Self::file(file)
        }
    }

    pub fn line(file: impl Into<String>, page: usize, line: usize) -> Self {
        Self {
            line: Some(line),
            ..Self::page(file, page)
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file)?;
        if let Some(p) = self.page {
            write!(f, " p{p}")?;
        }
        if let Some(l) = self.line {
            write!(f, ":{l}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}: {}", self.severity, self.location, self.message)
    }
}

/// Append-only diagnostic channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, location: SourceLocation, message: impl Into<String>) {
        let d = Diagnostic {
            severity,
            message: message.into(),
            location,
        };
        emit(&d);
        self.items.push(d);
    }

    pub fn info(&mut self, location: SourceLocation, message: impl Into<String>) {
        self.push(Severity::Info, location, message);
    }

    pub fn warn(&mut self, location: SourceLocation, message: impl Into<String>) {
        self.push(Severity::Warning, location, message);
    }

    pub fn error(&mut self, location: SourceLocation, message: impl Into<String>) {
        self.push(Severity::Error, location, message);
    }

    /// Append already-emitted diagnostics (e.g. from a per-file worker)
    /// without logging them twice.
    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.items.iter().filter(|d| d.severity == severity).count()
    }
}

fn emit(d: &Diagnostic) {
    let file = d.location.file.as_str();
    let page = d.location.page;
    let line = d.location.line;
    match d.severity {
        Severity::Info => tracing::info!(file, ?page, ?line, "{}", d.message),
        Severity::Warning => tracing::warn!(file, ?page, ?line, "{}", d.message),
        Severity::Error => tracing::error!(file, ?page, ?line, "{}", d.message),
    }
}
