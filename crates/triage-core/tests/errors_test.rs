use triage_core::errors::*;

#[test]
fn provider_error_converts_into_triage_error() {
    let err: TriageError = ProviderError::Timeout {
        provider: "mock".to_string(),
        elapsed_ms: 1500,
    }
    .into();
    assert!(err.is_provider());
    assert!(!err.is_input());
    assert_eq!(
        err.to_string(),
        "provider error: mock timed out after 1500ms"
    );
}

#[test]
fn input_error_converts_into_triage_error() {
    let err: TriageError = InputError::EmptyText {
        field: "text".to_string(),
    }
    .into();
    assert!(err.is_input());
    assert_eq!(err.to_string(), "input error: required text is empty: text");
}

#[test]
fn provider_name_is_exposed() {
    let err = ProviderError::QuotaExhausted {
        provider: "embeddings-api".to_string(),
    };
    assert_eq!(err.provider(), Some("embeddings-api"));
    let err = ProviderError::DimensionMismatch {
        expected: 3,
        actual: 4,
    };
    assert_eq!(err.provider(), None);
}

#[test]
fn cache_and_config_errors_display() {
    let err = CacheError::Corrupted {
        key: "abc".to_string(),
        reason: "bad json".to_string(),
    };
    assert_eq!(err.to_string(), "corrupted cache entry abc: bad json");

    let err = ConfigError::ValidationFailed {
        field: "cache.ttl_secs".to_string(),
        message: "must be greater than 0".to_string(),
    };
    let triage: TriageError = err.into();
    assert!(triage.to_string().contains("cache.ttl_secs"));
}

#[test]
fn serde_errors_convert() {
    let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: TriageError = parse.into();
    assert!(matches!(err, TriageError::SerializationError(_)));
}
