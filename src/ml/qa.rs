// ============================================================
// Layer 5 — Extractive QA Collaborator
// ============================================================
// Sends (question, context) to a question-answering model and
// returns the best span it found.
//
// Wire format (Hugging Face question-answering pipeline):
//   request:  {"inputs": {"question": "...", "context": "..."}}
//   response: {"answer": "...", "score": 0.93, "start": 10, "end": 22}
//             (a one-element array of that object is also accepted)

use serde_json::{json, Value};

use crate::domain::error::CollaboratorError;
use crate::domain::traits::{ExtractiveAnswerer, QaAnswer};
use crate::ml::client::{first_result, ModelClient};

pub struct HttpQuestionAnswerer {
    client: ModelClient,
    url:    String,
}

impl HttpQuestionAnswerer {
    pub fn new(client: ModelClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl ExtractiveAnswerer for HttpQuestionAnswerer {
    fn answer(&self, question: &str, context: &str) -> Result<QaAnswer, CollaboratorError> {
        let body     = request_body(question, context);
        let response = self.client.post_json(&self.url, &body)?;
        let answer   = parse_response(&response)?;

        tracing::debug!("QA answer '{}' (score {:.4})", answer.answer, answer.score);
        Ok(answer)
    }
}

fn request_body(question: &str, context: &str) -> Value {
    json!({
        "inputs": {
            "question": question,
            "context":  context,
        }
    })
}

fn parse_response(response: &Value) -> Result<QaAnswer, CollaboratorError> {
    let best = first_result(response).clone();

    serde_json::from_value::<QaAnswer>(best)
        .map_err(|e| CollaboratorError::Parse(format!("invalid QA response: {e}")))
}
