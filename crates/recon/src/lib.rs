//! `scoremerge-recon`: batch/score reconciliation engine for paired workbooks.
//!
//! Pure engine crate: receives pre-loaded workbook values, returns the merged
//! workbook plus a run report. No CLI or IO dependencies.

pub mod apply;
pub mod batch;
pub mod column;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod reconcile;
mod scan;
pub mod scores;
pub mod sheet;
pub mod similarity;

pub use config::MergeConfig;
pub use engine::run;
pub use error::MergeError;
pub use model::{BatchSet, MergeReport, MergeResult, ReconciledBatchSet};
pub use sheet::{CellValue, SheetGrid, WorkbookData};
