// ============================================================
// Layer 3 — Collaborator Traits
// ============================================================
// The two pre-trained models are treated as black boxes behind
// these traits. Layer 5 (ml) implements them over HTTP; tests
// implement them with mockall mocks.
//
// Use cases hold `&dyn` references to collaborators, which are
// built once in the CLI layer and passed down explicitly.

use serde::Deserialize;

use crate::domain::error::CollaboratorError;

/// The best span an extractive QA model found in the context
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QaAnswer {
    /// The answer text, a verbatim span of the context
    pub answer: String,

    /// Model confidence — logged, never used for decisions
    #[serde(default)]
    pub score: f32,
}

// ─── ExtractiveAnswerer ───────────────────────────────────────────────────────
/// A model that answers a question with a span of the given context.
#[cfg_attr(test, mockall::automock)]
pub trait ExtractiveAnswerer {
    fn answer(&self, question: &str, context: &str) -> Result<QaAnswer, CollaboratorError>;
}

// ─── Summarizer ───────────────────────────────────────────────────────────────
/// A model that writes an abstractive summary of the text.
///
/// `max_length` and `min_length` are the model's target length
/// band in tokens.
#[cfg_attr(test, mockall::automock)]
pub trait Summarizer {
    fn summarize(
        &self,
        text:       &str,
        max_length: u32,
        min_length: u32,
    ) -> Result<String, CollaboratorError>;
}
