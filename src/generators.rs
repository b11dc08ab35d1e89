//! Answer generation backends

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

/// Prompt-in, text-out generation service
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, model: &str, prompt: &str) -> Result<String>;
}

/// Canned generator for tests and offline runs; records every call
pub struct MockGenerator {
    answer: String,
    fail_with: Option<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockGenerator {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            fail_with: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Generator whose every call fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            answer: String::new(),
            fail_with: Some(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(model, prompt)` pairs received so far
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl AnswerGenerator for MockGenerator {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((model.to_string(), prompt.to_string()));
        }
        match &self.fail_with {
            Some(message) => anyhow::bail!("{}", message),
            None => Ok(self.answer.clone()),
        }
    }
}
