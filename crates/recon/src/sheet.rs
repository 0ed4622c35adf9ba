//! Workbook value model.
//!
//! The engine never touches files: the io layer loads each worksheet into a
//! [`SheetGrid`] and the engine reads and writes plain cell values. Addresses
//! are 1-based (row 1, column A = 1), matching the layout config.

/// A single cell value. Formatting and formulas are out of scope; formula
/// cells arrive as their cached results.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

const EMPTY: CellValue = CellValue::Empty;

impl CellValue {
    /// The cell's textual content, or `None` for blank cells.
    /// Numbers and booleans render the way a spreadsheet displays them.
    pub fn display_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) if s.is_empty() => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// One worksheet's values, stored row-major with ragged rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    name: String,
    rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows with any stored cell (trailing blanks excluded).
    pub fn n_rows(&self) -> u32 {
        self.rows.len() as u32
    }

    /// 1-based cell access. Out-of-range reads are blank, never an error.
    pub fn cell(&self, row: u32, col: u32) -> &CellValue {
        if row == 0 || col == 0 {
            return &EMPTY;
        }
        self.rows
            .get(row as usize - 1)
            .and_then(|r| r.get(col as usize - 1))
            .unwrap_or(&EMPTY)
    }

    /// 1-based cell write; the grid grows as needed.
    pub fn set_cell(&mut self, row: u32, col: u32, value: CellValue) {
        debug_assert!(row >= 1 && col >= 1, "cell addresses are 1-based");
        let (r, c) = (row as usize - 1, col as usize - 1);
        if self.rows.len() <= r {
            self.rows.resize_with(r + 1, Vec::new);
        }
        let cells = &mut self.rows[r];
        if cells.len() <= c {
            cells.resize(c + 1, CellValue::Empty);
        }
        cells[c] = value;
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }
}

/// An ordered collection of sheets; order follows the source workbook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookData {
    sheets: Vec<SheetGrid>,
}

impl WorkbookData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_sheet(&mut self, sheet: SheetGrid) {
        self.sheets.push(sheet);
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetGrid> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut SheetGrid> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }

    pub fn sheets(&self) -> &[SheetGrid] {
        &self.sheets
    }
}
