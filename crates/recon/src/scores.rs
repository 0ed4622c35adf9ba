//! Extract-sheet extraction: flat, ordered list of scored people.

use crate::config::{ExtractLayout, ScanConfig};
use crate::model::{normalize_email, ScoreEntry};
use crate::scan::{RowScan, ScanEvent};
use crate::sheet::SheetGrid;

/// Walk the extract sheet from `layout.start_row` downward. A row qualifies
/// iff both its email and its score are present. Rows with an email but no
/// score are skipped outright; they neither produce an entry nor touch the
/// blank run. Only email-blank rows count toward the termination limit.
pub fn extract_scores(sheet: &SheetGrid, layout: &ExtractLayout, scan: &ScanConfig) -> Vec<ScoreEntry> {
    let mut entries = Vec::new();
    let mut gaps = RowScan::new(scan.max_blank_rows);

    for row in layout.start_row..=sheet.n_rows() {
        match sheet.cell(row, layout.email_col).display_text() {
            Some(email) => {
                if let Some(score) = sheet.cell(row, layout.score_col).as_number() {
                    gaps.on_data();
                    entries.push(ScoreEntry {
                        email: normalize_email(&email),
                        full_name: sheet.cell(row, layout.name_col).display_text(),
                        score,
                    });
                }
            }
            None => {
                if gaps.on_blank() == ScanEvent::Terminated {
                    break;
                }
            }
        }
    }

    entries
}
