// ============================================================
// Layer 5 — Model Client
// ============================================================
// One blocking reqwest client, configured once and shared by
// the QA and summarization collaborators.
//
// Every request carries the configured timeout, so a backend
// that never answers turns into a CollaboratorError::Timeout
// instead of hanging the chat loop.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::CollaboratorError;

pub const DEFAULT_QA_URL: &str =
    "https://api-inference.huggingface.co/models/deepset/roberta-base-squad2";

pub const DEFAULT_SUMMARIZE_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";

/// Where the models live and how to reach them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Endpoint of the extractive QA model
    pub qa_url: String,

    /// Endpoint of the summarization model
    pub summarize_url: String,

    /// Bearer token sent with every request, if set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Upper bound for a single model call, in seconds
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            qa_url:        DEFAULT_QA_URL.to_string(),
            summarize_url: DEFAULT_SUMMARIZE_URL.to_string(),
            api_token:     None,
            timeout_secs:  60,
        }
    }
}

impl ModelConfig {
    /// A zero timeout would fail every call before it starts.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.timeout_secs > 0, "timeout_secs must be at least 1");
        anyhow::ensure!(!self.qa_url.trim().is_empty(), "qa_url must not be empty");
        anyhow::ensure!(!self.summarize_url.trim().is_empty(), "summarize_url must not be empty");
        Ok(())
    }
}

/// Blocking JSON-over-HTTP client for model endpoints.
#[derive(Debug, Clone)]
pub struct ModelClient {
    http:         Client,
    api_token:    Option<String>,
    timeout_secs: u64,
}

impl ModelClient {
    pub fn new(config: &ModelConfig) -> Result<Self, CollaboratorError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CollaboratorError::Http(e.to_string()))?;

        Ok(Self {
            http,
            api_token:    config.api_token.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// POST `body` as JSON to `url` and decode the JSON reply.
    pub fn post_json(&self, url: &str, body: &Value) -> Result<Value, CollaboratorError> {
        let mut request = self.http.post(url).json(body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        tracing::debug!("Model request to {}", url);

        let response = request.send().map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CollaboratorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<Value>().map_err(|e| {
            if e.is_timeout() {
                self.timeout_error()
            } else {
                CollaboratorError::Parse(e.to_string())
            }
        })
    }

    fn map_transport_error(&self, e: reqwest::Error) -> CollaboratorError {
        if e.is_timeout() {
            self.timeout_error()
        } else {
            CollaboratorError::Http(e.to_string())
        }
    }

    fn timeout_error(&self) -> CollaboratorError {
        CollaboratorError::Timeout {
            after_secs: self.timeout_secs,
        }
    }
}

/// Some inference servers wrap single results in a one-element
/// array; unwrap it so callers see the object either way.
pub(crate) fn first_result(value: &Value) -> &Value {
    match value {
        Value::Array(items) if !items.is_empty() => &items[0],
        other => other,
    }
}
