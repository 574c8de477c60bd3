use proptest::prelude::*;
use triage_core::text::{canonicalize, normalize, tokenize};

proptest! {
    #[test]
    fn normalize_is_idempotent(s in "[a-zA-Z0-9à-ÿ \\t\\n]{0,64}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn canonical_text_has_no_whitespace_runs(a in "[ a-zA-Z\t\n]{0,32}", b in "[ a-zA-Z\t\n]{0,32}") {
        let canonical = canonicalize(&[&a, &b]);
        prop_assert!(!canonical.contains("  "));
        prop_assert!(!canonical.starts_with(' '));
        prop_assert!(!canonical.ends_with(' '));
        prop_assert!(!canonical.contains('\n'));
    }

    #[test]
    fn tokens_are_never_empty(s in "\\PC{0,64}") {
        for tok in tokenize(&s) {
            prop_assert!(!tok.is_empty());
        }
    }

    #[test]
    fn tokenize_ignores_case(s in "[a-zA-Z0-9 ]{0,48}") {
        prop_assert_eq!(tokenize(&s), tokenize(&s.to_uppercase()));
    }
}
