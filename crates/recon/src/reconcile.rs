//! Fuzzy matching of batch members against extracted score entries.

use crate::config::MatchingConfig;
use crate::model::{BatchSet, ReconciledBatch, ReconciledBatchSet, ReconciledRecord, ScoreEntry};
use crate::similarity;

/// Attach a score (or `None`) to every batch member.
///
/// For each member the score entries are scanned in their original order and
/// the FIRST entry whose email reaches the similarity threshold wins; there
/// is no best-of-all-candidates search, and entries are not consumed: one
/// scored person may satisfy several members. Emails are compared
/// case-insensitively. Batch order and member order pass through unchanged,
/// and every member yields exactly one record.
pub fn reconcile(
    batches: &BatchSet,
    entries: &[ScoreEntry],
    matching: &MatchingConfig,
) -> ReconciledBatchSet {
    let lowered: Vec<String> = entries.iter().map(|e| e.email.to_lowercase()).collect();

    let mut out = ReconciledBatchSet::new();
    for batch in batches.iter() {
        let mut members = Vec::with_capacity(batch.members.len());
        for person in &batch.members {
            let needle = person.email.to_lowercase();
            let score = lowered
                .iter()
                .position(|email| similarity::ratio(email, &needle) >= matching.threshold)
                .map(|i| entries[i].score);
            members.push(ReconciledRecord {
                email: person.email.clone(),
                full_name: person.full_name.clone(),
                score,
            });
        }
        out.push(ReconciledBatch {
            name: batch.name.clone(),
            members,
        });
    }
    out
}
