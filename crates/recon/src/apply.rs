//! Score propagation into the output workbook.

use serde::Serialize;

use crate::column::column_index;
use crate::config::ScoresLayout;
use crate::error::MergeError;
use crate::model::ReconciledBatchSet;
use crate::sheet::{CellValue, WorkbookData};

/// Counts of target cells touched while applying scores.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct ApplyStats {
    pub rows_updated: usize,
    pub rows_cleared: usize,
}

/// Copy the overwrite workbook (values only) and rewrite the target column
/// of the scores sheet by full-name lookup.
///
/// Per row, the first record across all batches (batch order, then member
/// order) whose full name equals the row's trimmed, case-folded name decides
/// the cell: a present score is written, a null score CLEARS the cell. Rows
/// whose name matches no record are left exactly as they were.
pub fn apply_scores(
    source: &WorkbookData,
    batches: &ReconciledBatchSet,
    column: &str,
    layout: &ScoresLayout,
) -> Result<(WorkbookData, ApplyStats), MergeError> {
    let target_col = column_index(column)?;

    let mut output = source.clone();
    let sheet = output
        .sheet_mut(&layout.sheet)
        .ok_or_else(|| MergeError::MissingSheet {
            workbook: "overwrite".into(),
            sheet: layout.sheet.clone(),
        })?;

    let mut stats = ApplyStats::default();
    for row in layout.start_row..=sheet.n_rows() {
        let Some(name) = sheet.cell(row, layout.name_col).display_text() else {
            continue;
        };
        let key = normalize_name(&name);
        let hit = batches
            .records()
            .find(|r| r.full_name.as_deref().is_some_and(|n| normalize_name(n) == key));
        let Some(record) = hit else {
            continue; // no reconciled record anywhere: leave the cell untouched
        };
        match record.score {
            Some(score) => {
                sheet.set_cell(row, target_col, CellValue::Number(score));
                stats.rows_updated += 1;
            }
            None => {
                sheet.set_cell(row, target_col, CellValue::Empty);
                stats.rows_cleared += 1;
            }
        }
    }

    Ok((output, stats))
}

/// Trim + casefold, the equality used for the name lookup.
fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ReconciledBatch, ReconciledRecord};
    use crate::sheet::SheetGrid;

    fn layout() -> ScoresLayout {
        ScoresLayout {
            sheet: "Test Scores".into(),
            name_col: 2,
            start_row: 2,
        }
    }

    fn record(name: &str, score: Option<f64>) -> ReconciledRecord {
        ReconciledRecord {
            email: format!("{}@test.com", name.to_lowercase()),
            full_name: Some(name.into()),
            score,
        }
    }

    fn one_batch(records: Vec<ReconciledRecord>) -> ReconciledBatchSet {
        let mut set = ReconciledBatchSet::new();
        set.push(ReconciledBatch {
            name: "batch_1".into(),
            members: records,
        });
        set
    }

    fn workbook(names: &[&str], old_scores: &[Option<f64>]) -> WorkbookData {
        let mut sheet = SheetGrid::new("Test Scores");
        sheet.set_cell(1, 2, CellValue::Text("Full Name".into()));
        for (i, name) in names.iter().enumerate() {
            let row = i as u32 + 2;
            sheet.set_cell(row, 2, CellValue::Text(name.to_string()));
            if let Some(s) = old_scores[i] {
                sheet.set_cell(row, 4, CellValue::Number(s));
            }
        }
        let mut wb = WorkbookData::new();
        wb.push_sheet(sheet);
        wb
    }

    #[test]
    fn matched_score_is_written_to_the_target_column() {
        let wb = workbook(&["Alice"], &[None]);
        let batches = one_batch(vec![record("Alice", Some(95.0))]);
        let (out, stats) = apply_scores(&wb, &batches, "D", &layout()).unwrap();

        assert_eq!(out.sheet("Test Scores").unwrap().cell(2, 4), &CellValue::Number(95.0));
        assert_eq!(stats.rows_updated, 1);
        assert_eq!(stats.rows_cleared, 0);
    }

    #[test]
    fn null_score_clears_a_previously_filled_cell() {
        let wb = workbook(&["Alice"], &[Some(50.0)]);
        let batches = one_batch(vec![record("Alice", None)]);
        let (out, stats) = apply_scores(&wb, &batches, "D", &layout()).unwrap();

        assert_eq!(out.sheet("Test Scores").unwrap().cell(2, 4), &CellValue::Empty);
        assert_eq!(stats.rows_cleared, 1);
    }

    #[test]
    fn unmatched_row_is_left_untouched() {
        // Clearing and not-touching must be observably different.
        let wb = workbook(&["Stranger"], &[Some(50.0)]);
        let batches = one_batch(vec![record("Alice", None)]);
        let (out, stats) = apply_scores(&wb, &batches, "D", &layout()).unwrap();

        assert_eq!(out.sheet("Test Scores").unwrap().cell(2, 4), &CellValue::Number(50.0));
        assert_eq!(stats.rows_updated, 0);
        assert_eq!(stats.rows_cleared, 0);
    }

    #[test]
    fn name_lookup_trims_and_folds_case() {
        let wb = workbook(&["  ALICE  "], &[None]);
        let batches = one_batch(vec![record("alice", Some(7.0))]);
        let (out, _) = apply_scores(&wb, &batches, "D", &layout()).unwrap();
        assert_eq!(out.sheet("Test Scores").unwrap().cell(2, 4), &CellValue::Number(7.0));
    }

    #[test]
    fn earlier_batch_wins_the_name_lookup() {
        let mut batches = ReconciledBatchSet::new();
        batches.push(ReconciledBatch {
            name: "batch_1".into(),
            members: vec![record("Alice", Some(1.0))],
        });
        batches.push(ReconciledBatch {
            name: "batch_2".into(),
            members: vec![record("Alice", Some(2.0))],
        });
        let wb = workbook(&["Alice"], &[None]);
        let (out, _) = apply_scores(&wb, &batches, "D", &layout()).unwrap();
        assert_eq!(out.sheet("Test Scores").unwrap().cell(2, 4), &CellValue::Number(1.0));
    }

    #[test]
    fn rows_outside_the_sheet_are_not_grown() {
        let wb = workbook(&[], &[]);
        let batches = one_batch(vec![record("Alice", Some(1.0))]);
        let (out, stats) = apply_scores(&wb, &batches, "D", &layout()).unwrap();
        assert_eq!(out, wb);
        assert_eq!(stats.rows_updated, 0);
    }

    #[test]
    fn other_sheets_and_cells_are_copied_verbatim() {
        let mut wb = workbook(&["Alice"], &[None]);
        let mut extra = SheetGrid::new("Notes");
        extra.set_cell(1, 1, CellValue::Text("keep me".into()));
        wb.push_sheet(extra);

        let batches = one_batch(vec![record("Alice", Some(3.0))]);
        let (out, _) = apply_scores(&wb, &batches, "D", &layout()).unwrap();

        assert_eq!(out.sheet("Notes"), wb.sheet("Notes"));
        assert_eq!(
            out.sheet("Test Scores").unwrap().cell(1, 2),
            &CellValue::Text("Full Name".into())
        );
    }

    #[test]
    fn missing_scores_sheet_is_fatal() {
        let wb = WorkbookData::new();
        let batches = one_batch(vec![]);
        let err = apply_scores(&wb, &batches, "D", &layout()).unwrap_err();
        assert!(matches!(err, MergeError::MissingSheet { .. }));
    }

    #[test]
    fn bad_column_letters_are_fatal() {
        let wb = workbook(&["Alice"], &[None]);
        let batches = one_batch(vec![record("Alice", Some(1.0))]);
        assert!(matches!(
            apply_scores(&wb, &batches, "D4", &layout()),
            Err(MergeError::InvalidColumn(_))
        ));
        assert!(matches!(
            apply_scores(&wb, &batches, "XFE", &layout()),
            Err(MergeError::InvalidColumn(_))
        ));
    }

    #[test]
    fn record_without_a_name_never_matches() {
        let wb = workbook(&["Alice"], &[Some(9.0)]);
        let batches = one_batch(vec![ReconciledRecord {
            email: "x@y.com".into(),
            full_name: None,
            score: Some(1.0),
        }]);
        let (out, _) = apply_scores(&wb, &batches, "D", &layout()).unwrap();
        assert_eq!(out.sheet("Test Scores").unwrap().cell(2, 4), &CellValue::Number(9.0));
    }
}
