//! End-to-end merge run: extract, reconcile, apply.

use crate::apply::apply_scores;
use crate::batch::extract_batches;
use crate::config::MergeConfig;
use crate::error::MergeError;
use crate::model::{MergeMeta, MergeReport, MergeResult, MergeSummary};
use crate::reconcile::reconcile;
use crate::scores::extract_scores;
use crate::sheet::WorkbookData;

/// Run one merge over a pair of workbooks.
///
/// `overwrite` carries the attendance sheet and the scores sheet; `extract`
/// carries the test-takers sheet. The stages run strictly in sequence and
/// are pure over the loaded values: a run either returns a complete merged
/// workbook or fails with no partial output.
pub fn run(
    config: &MergeConfig,
    overwrite: &WorkbookData,
    extract: &WorkbookData,
    column: &str,
) -> Result<MergeResult, MergeError> {
    let attendance = overwrite
        .sheet(&config.attendance.sheet)
        .ok_or_else(|| MergeError::MissingSheet {
            workbook: "overwrite".into(),
            sheet: config.attendance.sheet.clone(),
        })?;
    let takers = extract
        .sheet(&config.extract.sheet)
        .ok_or_else(|| MergeError::MissingSheet {
            workbook: "extract".into(),
            sheet: config.extract.sheet.clone(),
        })?;

    let batches = extract_batches(attendance, &config.attendance, &config.scan);
    let entries = extract_scores(takers, &config.extract, &config.scan);
    let reconciled = reconcile(&batches, &entries, &config.matching);
    let (workbook, stats) = apply_scores(overwrite, &reconciled, column, &config.scores)?;

    let members = batches.member_count();
    let matched = reconciled.records().filter(|r| r.score.is_some()).count();
    let summary = MergeSummary {
        batches: reconciled.len(),
        members,
        score_entries: entries.len(),
        matched,
        unmatched: members - matched,
        rows_updated: stats.rows_updated,
        rows_cleared: stats.rows_cleared,
    };

    Ok(MergeResult {
        report: MergeReport {
            meta: MergeMeta {
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                run_at: chrono::Utc::now().to_rfc3339(),
                target_column: column.to_string(),
            },
            summary,
            batches: reconciled,
        },
        workbook,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{CellValue, SheetGrid};

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.into())
    }

    /// Overwrite workbook in the default layout: Attendance (emails in H
    /// from row 6, names in B) plus Test Scores (names in B from row 7).
    fn overwrite_workbook() -> WorkbookData {
        let mut attendance = SheetGrid::new("Attendance");
        let people = [
            (6, "Alice A", "alice@test.com"),
            (7, "Bob B", "bob@test.com"),
            // row 8 blank: batch separator
            (9, "Cara C", "cara@test.com"),
            (10, "Dan D", "dan@test.com"),
        ];
        for (row, name, email) in people {
            attendance.set_cell(row, 2, text(name));
            attendance.set_cell(row, 8, text(email));
        }

        let mut scores = SheetGrid::new("Test Scores");
        scores.set_cell(6, 2, text("Full Name"));
        for (row, name) in [(7, "Alice A"), (8, "Bob B"), (9, "Cara C"), (10, "Dan D")] {
            scores.set_cell(row, 2, text(name));
        }
        // Dan has a stale score that nothing matches.
        scores.set_cell(10, 4, CellValue::Number(33.0));

        let mut wb = WorkbookData::new();
        wb.push_sheet(attendance);
        wb.push_sheet(scores);
        wb
    }

    /// Extract workbook: Test Takers with emails in C from row 5, names in
    /// B, scores in G.
    fn extract_workbook() -> WorkbookData {
        let mut takers = SheetGrid::new("Test Takers");
        let rows = [
            (5, "Alice A", "alice@tst.com", 92.0), // typo'd email, ~93 similar
            (6, "Cara C", "cara@test.com", 71.0),  // exact
            (7, "Eve E", "eve@test.com", 55.0),    // not in attendance
        ];
        for (row, name, email, score) in rows {
            takers.set_cell(row, 2, text(name));
            takers.set_cell(row, 3, text(email));
            takers.set_cell(row, 7, CellValue::Number(score));
        }
        let mut wb = WorkbookData::new();
        wb.push_sheet(takers);
        wb
    }

    #[test]
    fn end_to_end_two_batches() {
        let config = MergeConfig::default();
        let result = run(&config, &overwrite_workbook(), &extract_workbook(), "D").unwrap();

        let s = &result.report.summary;
        assert_eq!(s.batches, 2);
        assert_eq!(s.members, 4);
        assert_eq!(s.score_entries, 3);
        assert_eq!(s.matched, 2); // alice (fuzzy) + cara (exact)
        assert_eq!(s.unmatched, 2); // bob + dan
        assert_eq!(s.rows_updated, 2);
        assert_eq!(s.rows_cleared, 2); // bob's and dan's cells explicitly cleared

        let sheet = result.workbook.sheet("Test Scores").unwrap();
        assert_eq!(sheet.cell(7, 4), &CellValue::Number(92.0)); // Alice
        assert_eq!(sheet.cell(8, 4), &CellValue::Empty); // Bob: cleared
        assert_eq!(sheet.cell(9, 4), &CellValue::Number(71.0)); // Cara
        // Dan is an attendance member with no match, so his stale cell is
        // cleared (he has a record with a null score).
        assert_eq!(sheet.cell(10, 4), &CellValue::Empty);

        // The attendance sheet is copied through untouched.
        assert_eq!(
            result.workbook.sheet("Attendance"),
            overwrite_workbook().sheet("Attendance")
        );
    }

    #[test]
    fn row_without_any_record_keeps_its_stale_value() {
        let mut overwrite = overwrite_workbook();
        let sheet = overwrite.sheet_mut("Test Scores").unwrap();
        sheet.set_cell(11, 2, text("Zoe Z")); // not in any batch
        sheet.set_cell(11, 4, CellValue::Number(99.0));

        let result = run(&MergeConfig::default(), &overwrite, &extract_workbook(), "D").unwrap();
        let out = result.workbook.sheet("Test Scores").unwrap();
        assert_eq!(out.cell(11, 4), &CellValue::Number(99.0));
    }

    #[test]
    fn missing_attendance_sheet_is_fatal() {
        let err = run(
            &MergeConfig::default(),
            &WorkbookData::new(),
            &extract_workbook(),
            "D",
        )
        .unwrap_err();
        assert!(matches!(err, MergeError::MissingSheet { ref sheet, .. } if sheet == "Attendance"));
    }

    #[test]
    fn missing_extract_sheet_is_fatal() {
        let err = run(
            &MergeConfig::default(),
            &overwrite_workbook(),
            &WorkbookData::new(),
            "D",
        )
        .unwrap_err();
        assert!(matches!(err, MergeError::MissingSheet { ref sheet, .. } if sheet == "Test Takers"));
    }

    #[test]
    fn invalid_column_is_fatal() {
        let err = run(
            &MergeConfig::default(),
            &overwrite_workbook(),
            &extract_workbook(),
            "4D",
        )
        .unwrap_err();
        assert!(matches!(err, MergeError::InvalidColumn(_)));
    }

    #[test]
    fn runs_are_idempotent_at_the_value_level() {
        let config = MergeConfig::default();
        let overwrite = overwrite_workbook();
        let extract = extract_workbook();
        let a = run(&config, &overwrite, &extract, "D").unwrap();
        let b = run(&config, &overwrite, &extract, "D").unwrap();
        assert_eq!(a.workbook, b.workbook);
    }
}
