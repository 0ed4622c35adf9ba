use serde::Serialize;

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// One attendance row: email plus an optional display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    pub email: String,
    pub full_name: Option<String>,
}

/// An ordered group of people cut out of the attendance sheet by blank-row
/// boundaries. Immutable once closed.
#[derive(Debug, Clone, Serialize)]
pub struct Batch {
    pub name: String,
    pub members: Vec<Person>,
}

/// Insertion-ordered batch container. Batch order is a contract (it mirrors
/// the sheet top to bottom), so this is a plain vector, not a keyed map.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct BatchSet {
    batches: Vec<Batch>,
}

impl BatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, batch: Batch) {
        self.batches.push(batch);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Batch> {
        self.batches.iter()
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Batch> {
        self.batches.iter().find(|b| b.name == name)
    }

    pub fn member_count(&self) -> usize {
        self.batches.iter().map(|b| b.members.len()).sum()
    }
}

/// One scored row from the extract sheet. Flat sequence, no batching.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub email: String,
    pub full_name: Option<String>,
    pub score: f64,
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// A batch member with its matched score, or `None` when nothing reached
/// the similarity threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledRecord {
    pub email: String,
    pub full_name: Option<String>,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconciledBatch {
    pub name: String,
    pub members: Vec<ReconciledRecord>,
}

/// Same ordered shape as [`BatchSet`], members replaced by their records.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ReconciledBatchSet {
    batches: Vec<ReconciledBatch>,
}

impl ReconciledBatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, batch: ReconciledBatch) {
        self.batches.push(batch);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReconciledBatch> {
        self.batches.iter()
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// All records in batch order, then member order, the lookup order the
    /// sheet writer is contracted to use.
    pub fn records(&self) -> impl Iterator<Item = &ReconciledRecord> {
        self.batches.iter().flat_map(|b| b.members.iter())
    }
}

/// Emails are compared and stored with every whitespace character removed.
pub fn normalize_email(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

// ---------------------------------------------------------------------------
// Run output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct MergeMeta {
    pub engine_version: String,
    pub run_at: String,
    pub target_column: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeSummary {
    pub batches: usize,
    pub members: usize,
    pub score_entries: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub rows_updated: usize,
    pub rows_cleared: usize,
}

/// Machine-readable half of a run: everything except the workbook itself.
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    pub meta: MergeMeta,
    pub summary: MergeSummary,
    pub batches: ReconciledBatchSet,
}

#[derive(Debug)]
pub struct MergeResult {
    pub report: MergeReport,
    pub workbook: crate::sheet::WorkbookData,
}
