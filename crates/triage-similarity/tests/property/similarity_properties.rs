use std::sync::Arc;

use proptest::prelude::*;
use triage_core::config::SimilarityConfig;
use triage_core::models::IndexItem;
use triage_embeddings::HashedEmbedder;
use triage_similarity::{cosine_similarity, SimilarityIndex};

fn vector() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-100.0f32..100.0, 8)
}

fn non_zero_vector() -> impl Strategy<Value = Vec<f32>> {
    vector().prop_filter("non-zero", |v| v.iter().any(|x| x.abs() > 1e-3))
}

const WORDS: &[&str] = &[
    "azure", "openai", "quota", "west", "europe", "sql", "mi", "gdpr", "pricing", "outage",
    "roadmap", "cosmos",
];

fn phrase() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..6).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn cosine_is_symmetric(a in vector(), b in vector()) {
        prop_assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn cosine_is_bounded(a in vector(), b in vector()) {
        let s = cosine_similarity(&a, &b);
        prop_assert!((-1.0..=1.0).contains(&s));
    }

    #[test]
    fn self_similarity_is_one(v in non_zero_vector()) {
        prop_assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn search_ignores_insertion_order(texts in prop::collection::vec(phrase(), 1..10), query in phrase()) {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let items: Vec<IndexItem> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| IndexItem::new(format!("id-{i}"), t.clone(), Default::default()))
            .collect();
        let mut reversed = items.clone();
        reversed.reverse();

        let (a, b) = rt.block_on(async {
            let forward = SimilarityIndex::new(Arc::new(HashedEmbedder::new(64)), SimilarityConfig::default());
            let backward = SimilarityIndex::new(Arc::new(HashedEmbedder::new(64)), SimilarityConfig::default());
            forward.index("c", items).await.unwrap();
            backward.index("c", reversed).await.unwrap();
            (
                forward.search("c", &query, 5, -1.0).await.unwrap(),
                backward.search("c", &query, 5, -1.0).await.unwrap(),
            )
        });
        prop_assert_eq!(a, b);
    }
}
