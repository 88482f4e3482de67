// ============================================================
// Layer 5 — Summarization Collaborator
// ============================================================
// Sends text plus a target length band to an abstractive
// summarization model. Sampling is always disabled so the same
// chunk gives the same summary.
//
// Wire format (Hugging Face summarization pipeline):
//   request:  {"inputs": "...",
//              "parameters": {"max_length": 300, "min_length": 100,
//                             "do_sample": false}}
//   response: [{"summary_text": "..."}]
//             (a bare object is also accepted)

use serde_json::{json, Value};

use crate::domain::error::CollaboratorError;
use crate::domain::traits::Summarizer;
use crate::ml::client::{first_result, ModelClient};

pub struct HttpSummarizer {
    client: ModelClient,
    url:    String,
}

impl HttpSummarizer {
    pub fn new(client: ModelClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl Summarizer for HttpSummarizer {
    fn summarize(
        &self,
        text:       &str,
        max_length: u32,
        min_length: u32,
    ) -> Result<String, CollaboratorError> {
        let body     = request_body(text, max_length, min_length);
        let response = self.client.post_json(&self.url, &body)?;
        let summary  = parse_response(&response)?;

        tracing::debug!(
            "Summarized {} chars into {} chars",
            text.chars().count(),
            summary.chars().count()
        );
        Ok(summary)
    }
}

fn request_body(text: &str, max_length: u32, min_length: u32) -> Value {
    json!({
        "inputs": text,
        "parameters": {
            "max_length": max_length,
            "min_length": min_length,
            "do_sample":  false,
        }
    })
}

fn parse_response(response: &Value) -> Result<String, CollaboratorError> {
    first_result(response)["summary_text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CollaboratorError::Parse("missing 'summary_text' in response".into()))
}
