//! LLM analysis: a resume matched against a job description by the local model.
//!
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>`; `LlmAnalyzer` is the
//! Ollama-backed default and tests swap in stubs.

pub mod handlers;
pub mod validation;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::prompts::build_analyze_prompt;
use crate::llm_client::{LlmError, OllamaClient};

pub use validation::{parse_model_output, AnalyzeResult};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// `message` and `details` are both absent when the output was not JSON.
    #[error("Invalid model output")]
    InvalidModelOutput {
        message: Option<String>,
        details: Option<Value>,
    },
}

impl AnalysisError {
    pub(crate) fn invalid(message: &str, details: Option<Value>) -> Self {
        AnalysisError::InvalidModelOutput {
            message: Some(message.to_string()),
            details,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, cv_text: &str, job_text: &str) -> Result<AnalyzeResult, AnalysisError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmAnalyzer
// ────────────────────────────────────────────────────────────────────────────

/// Builds the prompt, calls Ollama and validates the answer.
pub struct LlmAnalyzer(pub OllamaClient);

#[async_trait]
impl ResumeAnalyzer for LlmAnalyzer {
    async fn analyze(&self, cv_text: &str, job_text: &str) -> Result<AnalyzeResult, AnalysisError> {
        let prompt = build_analyze_prompt(cv_text, job_text);
        let raw = self.0.generate(&prompt).await?;
        debug!(model = self.0.model(), chars = raw.len(), "model answered");
        parse_model_output(&raw)
    }
}
