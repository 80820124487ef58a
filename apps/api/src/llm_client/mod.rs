/// LLM Client: the single point of entry for calls to the local Ollama server.
///
/// Pure transport. Given a prompt it returns the model's raw text; parsing and
/// validation of that text belong to `analysis`.
use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const DEFAULT_OLLAMA_URL: &str = "http://host.docker.internal:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "html-model:latest";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const TEMPERATURE: f32 = 0.1;
/// Only 429 and 5xx answers are retried; a timeout already cost two minutes.
const MAX_ATTEMPTS: u32 = 2;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Ollama returned HTTP {status}")]
    HttpStatus { status: u16, body: String },

    #[error("Ollama unreachable: {0}")]
    Unreachable(String),

    #[error("Ollama request failed: {0}")]
    RequestFailed(String),
}

impl LlmError {
    pub fn code(&self) -> &'static str {
        match self {
            LlmError::HttpStatus { .. } => "OLLAMA_HTTP_ERROR",
            LlmError::Unreachable(_) => "OLLAMA_UNREACHABLE",
            LlmError::RequestFailed(_) => "OLLAMA_REQUEST_FAILED",
        }
    }

    /// Transport detail for the error envelope. An empty HTTP body falls back
    /// to the status line.
    pub fn details(&self) -> String {
        match self {
            LlmError::HttpStatus { status, body } if body.trim().is_empty() => {
                format!("HTTP Error {status}")
            }
            LlmError::HttpStatus { body, .. } => body.clone(),
            LlmError::Unreachable(detail) | LlmError::RequestFailed(detail) => detail.clone(),
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            LlmError::Unreachable(e.to_string())
        } else {
            LlmError::RequestFailed(e.to_string())
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    /// Calls `/api/generate` without streaming and returns the raw model text.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: TEMPERATURE,
            },
        };
        let url = self.generate_url();

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Ollama attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self.client.post(&url).json(&request_body).send().await?;
            let status = response.status();
            let body = response.text().await?;

            if status.as_u16() == 429 || status.is_server_error() {
                warn!("Ollama returned {}: {}", status, body);
                last_error = Some(LlmError::HttpStatus {
                    status: status.as_u16(),
                    body,
                });
                continue;
            }

            if !status.is_success() {
                return Err(LlmError::HttpStatus {
                    status: status.as_u16(),
                    body,
                });
            }

            debug!(model = %self.model, bytes = body.len(), "Ollama call succeeded");
            return Ok(response_text(body));
        }

        Err(last_error.unwrap_or_else(|| {
            LlmError::RequestFailed(format!("no response after {MAX_ATTEMPTS} attempts"))
        }))
    }
}

/// The `response` string of an Ollama JSON body, or the body itself when it
/// has none.
fn response_text(body: String) -> String {
    match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(mut map)) => match map.remove("response") {
            Some(Value::String(text)) => text,
            _ => body,
        },
        _ => body,
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_field_is_unwrapped() {
        let body = r#"{"model":"m","response":"{\"score\": 10}","done":true}"#;
        assert_eq!(response_text(body.to_string()), "{\"score\": 10}");
    }

    #[test]
    fn test_body_without_response_string_is_returned_raw() {
        assert_eq!(response_text("plain text".to_string()), "plain text");
        let body = r#"{"response": 42}"#;
        assert_eq!(response_text(body.to_string()), body);
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = OllamaClient::new("http://localhost:11434/", "m").unwrap();
        assert_eq!(client.generate_url(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn test_error_codes_and_details() {
        let err = LlmError::HttpStatus {
            status: 500,
            body: String::new(),
        };
        assert_eq!(err.code(), "OLLAMA_HTTP_ERROR");
        assert_eq!(err.details(), "HTTP Error 500");
        assert_eq!(
            LlmError::Unreachable("refused".into()).code(),
            "OLLAMA_UNREACHABLE"
        );
        assert_eq!(
            LlmError::RequestFailed("boom".into()).details(),
            "boom"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_reported() {
        // Nothing listens on the discard port.
        let client = OllamaClient::new("http://127.0.0.1:9", "m").unwrap();
        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err, LlmError::Unreachable(_)), "{err:?}");
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }
}
