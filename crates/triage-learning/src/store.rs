//! CorrectionStore: append-only correction log with relevance retrieval.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::{debug, info, warn};
use triage_core::constants::CORRECTIONS_NAMESPACE;
use triage_core::errors::StorageError;
use triage_core::models::Correction;
use triage_core::text::token_set;
use triage_core::traits::IRecordStore;

use crate::similarity::jaccard;

/// A retrieved correction and its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCorrection {
    pub correction: Correction,
    pub similarity: f64,
}

/// Append-only log of misclassification feedback.
///
/// Readers take an `Arc` snapshot of the log and score it without holding
/// the lock. Appends swap in a new snapshot under the write lock, so a reader
/// sees either all of an append or none of it. Appends are serialized by
/// `append_lock`; the write lock is held only for the in-memory push.
pub struct CorrectionStore {
    entries: RwLock<Arc<Vec<Correction>>>,
    append_lock: Mutex<()>,
    relevance_threshold: f64,
    backing: Option<Arc<dyn IRecordStore>>,
}

impl CorrectionStore {
    /// In-memory store with no durable backing.
    pub fn new(relevance_threshold: f64) -> Self {
        Self {
            entries: RwLock::new(Arc::new(Vec::new())),
            append_lock: Mutex::new(()),
            relevance_threshold,
            backing: None,
        }
    }

    /// Load the persisted log and append through to `backing` from now on.
    ///
    /// Records that fail to deserialize are skipped with a warning.
    pub fn with_backing(
        relevance_threshold: f64,
        backing: Arc<dyn IRecordStore>,
    ) -> Result<Self, StorageError> {
        let records = backing.read_all(CORRECTIONS_NAMESPACE)?;
        let mut loaded = Vec::with_capacity(records.len());
        for record in records {
            match serde_json::from_str::<Correction>(&record.payload) {
                Ok(correction) => loaded.push(correction),
                Err(e) => warn!(key = %record.key, error = %e, "skipping malformed correction record"),
            }
        }
        info!(corrections = loaded.len(), "correction log loaded");

        Ok(Self {
            entries: RwLock::new(Arc::new(loaded)),
            append_lock: Mutex::new(()),
            relevance_threshold,
            backing: Some(backing),
        })
    }

    /// Append a correction. Never deduplicates or reorders.
    ///
    /// When backed, the record is persisted before it becomes visible; a
    /// persistence failure leaves the in-memory log unchanged. Readers are
    /// not blocked while the record store write is in flight.
    pub fn add(&self, correction: Correction) -> Result<(), StorageError> {
        let _append = self.append_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(backing) = &self.backing {
            let payload = serde_json::to_string(&correction).map_err(|e| {
                StorageError::Serialization {
                    reason: e.to_string(),
                }
            })?;
            let key = uuid::Uuid::new_v4().to_string();
            backing.append(CORRECTIONS_NAMESPACE, &key, &payload)?;
        }

        debug!(
            original = %correction.original_category,
            corrected = %correction.corrected_category,
            "correction appended"
        );
        let mut guard = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Arc::make_mut(&mut *guard).push(correction);
        Ok(())
    }

    /// Corrections whose original text overlaps `text` by at least the
    /// relevance threshold, most similar first, at most `top_n`.
    pub fn find_relevant(&self, text: &str, top_n: usize) -> Vec<Correction> {
        self.find_relevant_scored(text, top_n)
            .into_iter()
            .map(|s| s.correction)
            .collect()
    }

    /// Like `find_relevant`, keeping the similarity of each hit.
    ///
    /// Equal similarities keep log order (older first).
    pub fn find_relevant_scored(&self, text: &str, top_n: usize) -> Vec<ScoredCorrection> {
        if top_n == 0 {
            return Vec::new();
        }
        let query = token_set(text);
        let snapshot = self.snapshot();

        let mut hits: Vec<ScoredCorrection> = snapshot
            .iter()
            .filter_map(|c| {
                let similarity = jaccard(&query, &token_set(&c.original_text));
                (similarity >= self.relevance_threshold).then(|| ScoredCorrection {
                    correction: c.clone(),
                    similarity,
                })
            })
            .collect();

        hits.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        hits.truncate(top_n);
        hits
    }

    /// Consistent view of the log at this instant.
    pub fn snapshot(&self) -> Arc<Vec<Correction>> {
        Arc::clone(&*self.entries.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn relevance_threshold(&self) -> f64 {
        self.relevance_threshold
    }
}
