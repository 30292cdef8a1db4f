use metrofare_core::Severity;
use metrofare_revenue::{
    FORM_FEED, SourceDocument, extract_all, extract_loaded, load_documents, write_revenue_csv,
};
use std::fs;

const APRIL: &str = "4月 1,234,567 +5.3% 2,345,678 -1.2% 3,580,245 +2.1%";
const JANUARY: &str = "1月 1,100,000 -0.4% 2,200,000 +3.0% 3,300,000 +1.9%";

fn two_reports() -> Vec<SourceDocument> {
    vec![
        SourceDocument::from_lines("2021.ext", &[APRIL, JANUARY]),
        SourceDocument::from_lines("2022.ext", &[APRIL, JANUARY]),
    ]
}

/// Two yearly reports, one April and one January row each.
#[test]
fn test_two_reports_make_four_rows() {
    let out = extract_all(&two_reports(), false).unwrap();
    let rows = out.table.records();
    assert_eq!(rows.len(), 4);
    assert_eq!(out.files_seen, 2);
    assert_eq!(out.files_skipped, 0);
    assert!(out.diagnostics.is_empty());

    // 2021.ext, April
    assert_eq!(rows[0].fiscal_year(), 2021);
    assert_eq!(rows[0].fiscal_month(), 1);
    assert_eq!(rows[0].calendar_year(), Some(2020));
    assert_eq!(rows[0].calendar_month(), Some("April"));

    // 2021.ext, January
    assert_eq!(rows[1].fiscal_year(), 2021);
    assert_eq!(rows[1].fiscal_month(), 10);
    assert_eq!(rows[1].calendar_year(), Some(2021));
    assert_eq!(rows[1].calendar_month(), Some("January"));

    // 2022.ext rows follow in file order
    assert_eq!(rows[2].fiscal_year(), 2022);
    assert_eq!(rows[2].calendar_year(), Some(2021));
    assert_eq!(rows[3].fiscal_year(), 2022);
    assert_eq!(rows[3].calendar_year(), Some(2022));
}

/// Unrelated files in the same directory are skipped, not fatal.
#[test]
fn test_directory_run_skips_unrelated_files() {
    let dir = tempfile::tempdir().unwrap();
    let report = format!("旅客運輸収入\n{APRIL}\n{FORM_FEED}{JANUARY}\n{FORM_FEED}");
    fs::write(dir.path().join("revenue_2021_report.txt"), report).unwrap();
    fs::write(dir.path().join("notes.txt"), "4月 nothing here\n").unwrap();
    fs::write(dir.path().join("revenue_2022.pdf"), "binary-ish").unwrap();
    fs::create_dir(dir.path().join("2023.txt")).unwrap();

    let loaded = load_documents(dir.path(), "txt", FORM_FEED).unwrap();
    let names: Vec<&str> = loaded.documents.iter().map(|d| d.file_name.as_str()).collect();
    assert_eq!(names, vec!["notes.txt", "revenue_2021_report.txt"]);
    assert_eq!(loaded.undecodable, 0);

    let out = extract_loaded(loaded, true).unwrap();
    assert_eq!(out.files_seen, 2);
    assert_eq!(out.files_skipped, 1);
    assert_eq!(out.table.len(), 2);
    assert_eq!(out.diagnostics.count(Severity::Warning), 1);
    assert_eq!(out.diagnostics.iter().next().unwrap().location.file, "notes.txt");

    let jan = &out.table.records()[1];
    assert_eq!(jan.fiscal_month(), 10);
    assert_eq!(jan.calendar_year(), Some(2021));

    let csv_path = dir.path().join("processed").join("revenue_data.csv");
    write_revenue_csv(&csv_path, &out.table, b',').unwrap();
    let written = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(written.lines().count(), 3);
    assert!(written.lines().nth(2).unwrap().ends_with(",2021,January"));
}

/// A binary file sitting next to the reports is skipped; the reports still load.
#[test]
fn test_non_utf8_file_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("2021.txt"), format!("{APRIL}\n")).unwrap();
    fs::write(dir.path().join("notes.txt"), [0xff, 0xfe, 0x00, 0x41]).unwrap();

    let loaded = load_documents(dir.path(), "txt", FORM_FEED).unwrap();
    assert_eq!(loaded.documents.len(), 1);
    assert_eq!(loaded.undecodable, 1);

    let out = extract_loaded(loaded, false).unwrap();
    assert_eq!(out.files_seen, 2);
    assert_eq!(out.files_skipped, 1);
    assert_eq!(out.table.len(), 1);
    assert_eq!(out.table.records()[0].fiscal_month(), 1);

    let first = out.diagnostics.iter().next().unwrap();
    assert_eq!(first.severity, Severity::Warning);
    assert_eq!(first.location.file, "notes.txt");
    assert!(first.message.contains("UTF-8"));
}
