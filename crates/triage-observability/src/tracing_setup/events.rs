//! Structured log events for key engine operations.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

/// Log a completed classification.
pub fn classification_completed(category: &str, source: &str, confidence: f64, agreement: bool) {
    tracing::info!(
        event = "classification_completed",
        category = %category,
        source = %source,
        confidence = confidence,
        agreement = agreement,
        "classification completed"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log a recorded correction.
pub fn correction_recorded(original: &str, corrected: &str) {
    tracing::info!(
        event = "correction_recorded",
        original = %original,
        corrected = %corrected,
        "correction recorded"
    );
}

pub fn collection_indexed(collection: &str, items: usize) {
    tracing::info!(
        event = "collection_indexed",
        collection = %collection,
        items = items,
        "collection indexed"
    );
}

pub fn collection_cleared(collection: &str, removed: usize) {
    tracing::info!(
        event = "collection_cleared",
        collection = %collection,
        removed = removed,
        "collection cleared"
    );
}

/// Log probable duplicates found before a record is created.
pub fn duplicates_flagged(collections: usize, flagged: usize, top_score: f64) {
    tracing::warn!(
        event = "duplicates_flagged",
        collections = collections,
        flagged = flagged,
        top_score = top_score,
        "probable duplicates flagged"
    );
}

/// Log a request rejected before processing.
pub fn input_rejected(operation: &str, reason: &str) {
    tracing::debug!(
        event = "input_rejected",
        operation = %operation,
        reason = %reason,
        "input rejected"
    );
}
