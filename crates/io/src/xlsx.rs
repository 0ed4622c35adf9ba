// Excel value import (xlsx, xls, xlsb, ods) and export (xlsx only)
//
// Import: values only. Formula cells arrive as their cached results, dates
// as their serial numbers.
// Export: value snapshot for the merged workbook. Formatting and formulas
// are not preserved; that is the engine's stated contract.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook as XlsxWorkbook};
use scoremerge_recon::column::column_letters;
use scoremerge_recon::sheet::{CellValue, SheetGrid, WorkbookData};

/// Load every sheet of a workbook into the engine's value model, preserving
/// sheet order and absolute cell positions.
pub fn import_values(path: &Path) -> Result<WorkbookData, String> {
    let mut sheets = open_workbook_auto(path)
        .map_err(|e| format!("cannot open {}: {e}", path.display()))?;

    let mut workbook = WorkbookData::new();
    for name in sheets.sheet_names().to_owned() {
        let range = sheets
            .worksheet_range(&name)
            .map_err(|e| format!("cannot read sheet '{name}': {e}"))?;

        let mut grid = SheetGrid::new(&name);
        if let Some((start_row, start_col)) = range.start() {
            for (r, row) in range.rows().enumerate() {
                for (c, cell) in row.iter().enumerate() {
                    let value = convert_cell(cell);
                    if value != CellValue::Empty {
                        grid.set_cell(start_row + r as u32 + 1, start_col + c as u32 + 1, value);
                    }
                }
            }
        }
        workbook.push_sheet(grid);
    }
    Ok(workbook)
}

fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // Dates keep their serial value; the engine treats them as numbers.
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

/// Write the value model to an xlsx file, one worksheet per sheet.
///
/// The creation stamp is pinned, so identical value grids export to
/// byte-identical files no matter when they are written.
pub fn export_values(workbook: &WorkbookData, path: &Path) -> Result<(), String> {
    let mut xlsx = XlsxWorkbook::new();

    let created = ExcelDateTime::from_ymd(2000, 1, 1)
        .map_err(|e| format!("Failed to build creation stamp: {e}"))?;
    xlsx.set_properties(&DocProperties::new().set_creation_datetime(&created));

    for sheet in workbook.sheets() {
        let worksheet = xlsx
            .add_worksheet()
            .set_name(sheet.name())
            .map_err(|e| format!("Failed to create sheet '{}': {e}", sheet.name()))?;

        for (r, row) in sheet.rows().iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let write = match cell {
                    CellValue::Empty => continue,
                    CellValue::Text(s) => worksheet.write_string(r as u32, c as u16, s.as_str()),
                    CellValue::Number(n) => worksheet.write_number(r as u32, c as u16, *n),
                    CellValue::Bool(b) => worksheet.write_boolean(r as u32, c as u16, *b),
                };
                write.map_err(|e| {
                    format!(
                        "Failed to write cell {} on '{}': {e}",
                        cell_address(r, c),
                        sheet.name()
                    )
                })?;
            }
        }
    }

    xlsx.save(path)
        .map_err(|e| format!("Failed to save XLSX file: {e}"))?;
    Ok(())
}

/// 0-based row/col to an Excel cell address (e.g. "B5") for error messages.
fn cell_address(row: usize, col: usize) -> String {
    format!("{}{}", column_letters(col as u32 + 1), row + 1)
}
