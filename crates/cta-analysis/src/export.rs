//! Downloadable artifacts: the timestamped summary text and the clause report.

use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use cta_core::defaults::CLAUSE_REPORT_COLUMNS;
use cta_core::{ClauseRow, Error, Result};

const CLAUSE_SHEET_NAME: &str = "Clauses";

/// Plain-text summary artifact.
///
/// ```text
/// LLM Summary - Generated on 2026-10-19 14:05
///
/// <summary>
/// ```
pub fn summary_artifact(summary: &str, generated_at: DateTime<Utc>) -> String {
    format!(
        "LLM Summary - Generated on {}\n\n{}",
        generated_at.format("%Y-%m-%d %H:%M"),
        summary
    )
}

/// XLSX workbook holding the clause table under the fixed
/// `Clause` / `Extracted Info` columns.
pub fn clause_workbook(rows: &[ClauseRow]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    write_clause_sheet(workbook.add_worksheet(), rows)
        .map_err(|e| Error::Export(format!("Failed to write clause sheet: {}", e)))?;
    workbook
        .save_to_buffer()
        .map_err(|e| Error::Export(format!("Failed to serialize workbook: {}", e)))
}

fn write_clause_sheet(
    sheet: &mut Worksheet,
    rows: &[ClauseRow],
) -> std::result::Result<(), XlsxError> {
    let header = Format::new().set_bold();
    sheet.set_name(CLAUSE_SHEET_NAME)?;

    for (col, title) in CLAUSE_REPORT_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }
    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, &row.clause)?;
        sheet.write_string(r, 1, &row.extracted_info)?;
    }

    sheet.set_column_width(0, 28)?;
    sheet.set_column_width(1, 80)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_summary_artifact_format() {
        let at = Utc.with_ymd_and_hms(2026, 3, 9, 7, 5, 42).unwrap();
        assert_eq!(
            summary_artifact("Acme sponsors the study.", at),
            "LLM Summary - Generated on 2026-03-09 07:05\n\nAcme sponsors the study."
        );
    }

    #[test]
    fn test_clause_workbook_is_xlsx_archive() {
        let rows = vec![
            ClauseRow {
                clause: "Sponsor".into(),
                extracted_info: "Sponsor: Acme Pharma".into(),
            },
            ClauseRow {
                clause: "Termination Rights".into(),
                extracted_info: "Yes".into(),
            },
        ];
        let bytes = clause_workbook(&rows).unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let bytes = clause_workbook(&[]).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
