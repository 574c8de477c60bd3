//! Token-set Jaccard similarity.

use std::collections::BTreeSet;

/// |A ∩ B| / |A ∪ B|. Two empty sets score 0.0.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    shared as f64 / union as f64
}
