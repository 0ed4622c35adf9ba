use std::fmt;

#[derive(Debug)]
pub enum MergeError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (zero column, zero row, empty sheet name).
    ConfigValidation(String),
    /// A required sheet is absent from an input workbook.
    MissingSheet { workbook: String, sheet: String },
    /// Target column letters are malformed or beyond the xlsx column ceiling.
    InvalidColumn(String),
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingSheet { workbook, sheet } => {
                write!(f, "{workbook} workbook: missing sheet '{sheet}'")
            }
            Self::InvalidColumn(msg) => write!(f, "invalid column: {msg}"),
        }
    }
}

impl std::error::Error for MergeError {}
