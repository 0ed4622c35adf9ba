//! Spreadsheet column-letter arithmetic.

use crate::error::MergeError;

/// Highest addressable column ("XFD"), the xlsx format's ceiling.
pub const MAX_COLUMN: u32 = 16_384;

/// Convert column letters to a 1-based index: A=1, Z=26, AA=27, …
/// Lowercase is accepted; anything else is a structural error.
pub fn column_index(letters: &str) -> Result<u32, MergeError> {
    if letters.is_empty() {
        return Err(MergeError::InvalidColumn("empty column reference".into()));
    }

    let mut index: u32 = 0;
    for ch in letters.chars() {
        let up = ch.to_ascii_uppercase();
        if !up.is_ascii_uppercase() {
            return Err(MergeError::InvalidColumn(format!(
                "'{letters}' is not a column reference (letters only)"
            )));
        }
        index = index * 26 + (up as u32 - 'A' as u32 + 1);
        if index > MAX_COLUMN {
            return Err(MergeError::InvalidColumn(format!(
                "'{letters}' is beyond the last column {}",
                column_letters(MAX_COLUMN)
            )));
        }
    }
    Ok(index)
}

/// Convert a 1-based column index back to letters (27 = "AA").
pub fn column_letters(index: u32) -> String {
    let mut out = String::new();
    let mut n = index;
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        out.insert(0, (b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    out
}
