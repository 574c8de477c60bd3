//! Mock semantic-classification providers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use triage_core::errors::ProviderError;
use triage_core::traits::ISemanticProvider;

/// A well-formed provider answer.
pub fn semantic_response(category: &str, intent: &str, confidence: f64, reasoning: &str) -> Value {
    json!({
        "category": category,
        "intent": intent,
        "confidence": confidence,
        "reasoning": reasoning,
    })
}

/// Returns scripted answers in order, repeating the last one.
/// Records every prompt it receives.
pub struct ScriptedProvider {
    responses: Vec<Value>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<Value>) -> Self {
        Self {
            responses,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn always(response: Value) -> Self {
        Self::new(vec![response])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ISemanticProvider for ScriptedProvider {
    async fn complete(&self, prompt: &str, _output_schema: &Value) -> Result<Value, ProviderError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        let idx = n.min(self.responses.len().saturating_sub(1));
        self.responses
            .get(idx)
            .cloned()
            .ok_or_else(|| ProviderError::Unavailable {
                provider: self.name().to_string(),
                reason: "no scripted responses".to_string(),
            })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Always fails with the given error.
pub struct FailingProvider {
    error: ProviderError,
    calls: AtomicUsize,
}

impl FailingProvider {
    pub fn new(error: ProviderError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self::new(ProviderError::Unavailable {
            provider: "failing".to_string(),
            reason: "backend down".to_string(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ISemanticProvider for FailingProvider {
    async fn complete(&self, _prompt: &str, _output_schema: &Value) -> Result<Value, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Answers after a fixed delay.
pub struct SlowProvider {
    delay: Duration,
    response: Value,
}

impl SlowProvider {
    pub fn new(delay: Duration, response: Value) -> Self {
        Self { delay, response }
    }
}

#[async_trait]
impl ISemanticProvider for SlowProvider {
    async fn complete(&self, _prompt: &str, _output_schema: &Value) -> Result<Value, ProviderError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.response.clone())
    }

    fn name(&self) -> &str {
        "slow"
    }
}

/// Counts calls to any inner provider.
pub struct CountingProvider {
    inner: Arc<dyn ISemanticProvider>,
    calls: AtomicUsize,
}

impl CountingProvider {
    pub fn new(inner: Arc<dyn ISemanticProvider>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ISemanticProvider for CountingProvider {
    async fn complete(&self, prompt: &str, output_schema: &Value) -> Result<Value, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.complete(prompt, output_schema).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
