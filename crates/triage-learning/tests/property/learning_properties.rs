use proptest::prelude::*;
use triage_core::models::Correction;
use triage_core::text::token_set;
use triage_core::Category;
use triage_learning::{jaccard, CorrectionStore};

const WORDS: &[&str] = &[
    "sql", "mi", "west", "europe", "quota", "tpm", "gdpr", "audit", "pricing", "roadmap",
    "azure", "openai", "east", "us",
];

fn phrase() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..8).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn returned_iff_jaccard_meets_threshold(query in phrase(), stored in phrase()) {
        let store = CorrectionStore::new(0.2);
        store
            .add(Correction::new(stored.clone(), Category::General, Category::CostBilling, ""))
            .unwrap();
        let similarity = jaccard(&token_set(&query), &token_set(&stored));
        let returned = !store.find_relevant(&query, 3).is_empty();
        prop_assert_eq!(returned, similarity >= 0.2);
    }

    #[test]
    fn jaccard_is_symmetric_and_bounded(a in phrase(), b in phrase()) {
        let (sa, sb) = (token_set(&a), token_set(&b));
        let ab = jaccard(&sa, &sb);
        prop_assert_eq!(ab, jaccard(&sb, &sa));
        prop_assert!((0.0..=1.0).contains(&ab));
    }

    #[test]
    fn results_sorted_descending(query in phrase(), stored in prop::collection::vec(phrase(), 0..12)) {
        let store = CorrectionStore::new(0.2);
        for s in stored {
            store.add(Correction::new(s, Category::General, Category::General, "")).unwrap();
        }
        let hits = store.find_relevant_scored(&query, 5);
        prop_assert!(hits.len() <= 5);
        for pair in hits.windows(2) {
            prop_assert!(pair[0].similarity >= pair[1].similarity);
        }
    }
}
