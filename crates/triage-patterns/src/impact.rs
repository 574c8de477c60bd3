//! Business impact assessment from free text.

use triage_core::BusinessImpact;

use crate::lexicon::{IMPACT_CRITICAL, IMPACT_HIGH, IMPACT_MEDIUM};
use crate::matcher::TokenText;

/// Most severe tier with at least one matching term; `Low` otherwise.
pub fn assess(text: &TokenText) -> BusinessImpact {
    let tiers: [(&[&str], BusinessImpact); 3] = [
        (IMPACT_CRITICAL, BusinessImpact::Critical),
        (IMPACT_HIGH, BusinessImpact::High),
        (IMPACT_MEDIUM, BusinessImpact::Medium),
    ];
    tiers
        .into_iter()
        .find(|(terms, _)| text.count_terms(terms) > 0)
        .map(|(_, impact)| impact)
        .unwrap_or(BusinessImpact::Low)
}
