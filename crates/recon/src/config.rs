use serde::Deserialize;

use crate::error::MergeError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Where each sheet lives and how to walk it. Every field has a default that
/// reproduces the standard workbook layout, so an empty config is valid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MergeConfig {
    #[serde(default)]
    pub attendance: AttendanceLayout,
    #[serde(default)]
    pub extract: ExtractLayout,
    #[serde(default)]
    pub scores: ScoresLayout,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

// ---------------------------------------------------------------------------
// Sheet layouts
// ---------------------------------------------------------------------------

/// Attendance sheet: ordered batches separated by blank rows.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceLayout {
    #[serde(default = "default_attendance_sheet")]
    pub sheet: String,
    /// Column holding emails (1-based; 8 = H).
    #[serde(default = "default_attendance_email_col")]
    pub email_col: u32,
    #[serde(default = "default_name_col")]
    pub name_col: u32,
    #[serde(default = "default_attendance_start_row")]
    pub start_row: u32,
}

impl Default for AttendanceLayout {
    fn default() -> Self {
        Self {
            sheet: default_attendance_sheet(),
            email_col: default_attendance_email_col(),
            name_col: default_name_col(),
            start_row: default_attendance_start_row(),
        }
    }
}

/// Extract sheet: flat list of scored test takers.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractLayout {
    #[serde(default = "default_extract_sheet")]
    pub sheet: String,
    #[serde(default = "default_extract_email_col")]
    pub email_col: u32,
    #[serde(default = "default_name_col")]
    pub name_col: u32,
    #[serde(default = "default_extract_score_col")]
    pub score_col: u32,
    #[serde(default = "default_extract_start_row")]
    pub start_row: u32,
}

impl Default for ExtractLayout {
    fn default() -> Self {
        Self {
            sheet: default_extract_sheet(),
            email_col: default_extract_email_col(),
            name_col: default_name_col(),
            score_col: default_extract_score_col(),
            start_row: default_extract_start_row(),
        }
    }
}

/// Output sheet: rows are looked up by full name and the target column is
/// overwritten in place.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoresLayout {
    #[serde(default = "default_scores_sheet")]
    pub sheet: String,
    #[serde(default = "default_name_col")]
    pub name_col: u32,
    #[serde(default = "default_scores_start_row")]
    pub start_row: u32,
}

impl Default for ScoresLayout {
    fn default() -> Self {
        Self {
            sheet: default_scores_sheet(),
            name_col: default_name_col(),
            start_row: default_scores_start_row(),
        }
    }
}

// ---------------------------------------------------------------------------
// Matching + scanning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    /// Minimum similarity ratio (inclusive) for an email match, 1..=100.
    #[serde(default = "default_threshold")]
    pub threshold: u8,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Consecutive blank rows tolerated before extraction stops. The first
    /// blank of a run still acts as a batch separator.
    #[serde(default = "default_max_blank_rows")]
    pub max_blank_rows: u8,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_blank_rows: default_max_blank_rows(),
        }
    }
}

fn default_attendance_sheet() -> String {
    "Attendance".into()
}
fn default_attendance_email_col() -> u32 {
    8
}
fn default_attendance_start_row() -> u32 {
    6
}
fn default_extract_sheet() -> String {
    "Test Takers".into()
}
fn default_extract_email_col() -> u32 {
    3
}
fn default_extract_score_col() -> u32 {
    7
}
fn default_extract_start_row() -> u32 {
    5
}
fn default_scores_sheet() -> String {
    "Test Scores".into()
}
fn default_scores_start_row() -> u32 {
    7
}
fn default_name_col() -> u32 {
    2
}
fn default_threshold() -> u8 {
    90
}
fn default_max_blank_rows() -> u8 {
    2
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl MergeConfig {
    pub fn from_toml(input: &str) -> Result<Self, MergeError> {
        let config: MergeConfig =
            toml::from_str(input).map_err(|e| MergeError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MergeError> {
        for (section, sheet) in [
            ("attendance", &self.attendance.sheet),
            ("extract", &self.extract.sheet),
            ("scores", &self.scores.sheet),
        ] {
            if sheet.is_empty() {
                return Err(MergeError::ConfigValidation(format!(
                    "[{section}] sheet name must not be empty"
                )));
            }
        }

        for (field, value) in [
            ("attendance.email_col", self.attendance.email_col),
            ("attendance.name_col", self.attendance.name_col),
            ("attendance.start_row", self.attendance.start_row),
            ("extract.email_col", self.extract.email_col),
            ("extract.name_col", self.extract.name_col),
            ("extract.score_col", self.extract.score_col),
            ("extract.start_row", self.extract.start_row),
            ("scores.name_col", self.scores.name_col),
            ("scores.start_row", self.scores.start_row),
        ] {
            if value < 1 {
                return Err(MergeError::ConfigValidation(format!(
                    "{field} must be at least 1 (rows and columns are 1-based)"
                )));
            }
        }

        if self.matching.threshold < 1 || self.matching.threshold > 100 {
            return Err(MergeError::ConfigValidation(format!(
                "matching.threshold must be in 1..=100, got {}",
                self.matching.threshold
            )));
        }

        if self.scan.max_blank_rows < 1 {
            return Err(MergeError::ConfigValidation(
                "scan.max_blank_rows must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
