//! Attendance-sheet extraction: ordered batches split on blank rows.

use std::mem;

use crate::config::{AttendanceLayout, ScanConfig};
use crate::model::{normalize_email, Batch, BatchSet, Person};
use crate::scan::{RowScan, ScanEvent};
use crate::sheet::SheetGrid;

/// Walk the attendance sheet from `layout.start_row` downward and cut the
/// rows into ordered batches. A row belongs to the current batch iff its
/// email cell is non-empty; the first blank row closes the batch, and a run
/// longer than `scan.max_blank_rows` ends extraction altogether. Empty
/// batches are never emitted.
pub fn extract_batches(sheet: &SheetGrid, layout: &AttendanceLayout, scan: &ScanConfig) -> BatchSet {
    let mut batches = BatchSet::new();
    let mut current: Vec<Person> = Vec::new();
    let mut index = 1;
    let mut gaps = RowScan::new(scan.max_blank_rows);

    for row in layout.start_row..=sheet.n_rows() {
        match sheet.cell(row, layout.email_col).display_text() {
            Some(email) => {
                gaps.on_data();
                current.push(Person {
                    email: normalize_email(&email),
                    full_name: sheet.cell(row, layout.name_col).display_text(),
                });
            }
            None => match gaps.on_blank() {
                ScanEvent::Separator => {
                    if !current.is_empty() {
                        batches.push(Batch {
                            name: format!("batch_{index}"),
                            members: mem::take(&mut current),
                        });
                        index += 1;
                    }
                }
                ScanEvent::Continue => {}
                ScanEvent::Terminated => break,
            },
        }
    }

    // Sheet ended while still collecting: close the trailing batch.
    if !current.is_empty() {
        batches.push(Batch {
            name: format!("batch_{index}"),
            members: current,
        });
    }

    batches
}
