use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use metrofare_core::{Diagnostics, Severity};
use metrofare_revenue::RunOutput;

/// Write diagnostics as a pretty-printed JSON array.
pub fn write_diagnostics_json(path: &Path, diagnostics: &Diagnostics) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(diagnostics)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn summary(out: &RunOutput, output_path: &Path) -> String {
    let d = &out.diagnostics;
    format!(
        "Files: {} seen, {} skipped\nRecords: {} written to {}\nDiagnostics: {} info, {} warning, {} error",
        out.files_seen,
        out.files_skipped,
        out.table.len(),
        output_path.display(),
        d.count(Severity::Info),
        d.count(Severity::Warning),
        d.count(Severity::Error),
    )
}
