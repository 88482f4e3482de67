// ============================================================
// Layer 2 — Ask Use Case
// ============================================================
// Answers one question about a loaded document:
//   1. Classify the question (short / medium / long)
//   2. Chunk the document at answer_chunk_chars (1500) and pick
//      the context chunk with the selector
//   3. Dispatch on the class:
//        short  → extractive QA model, answer returned verbatim
//        long   → summarization model, long band  (500 / 150)
//        medium → summarization model, short band (300 / 100)
//
// Model failures come back as DocError::Collaborator; the chat
// loop decides what to do with them.

use std::fmt;

use crate::application::chat_use_case::{ChatConfig, LengthBand};
use crate::data::{chunker::Chunker, selector::find_best_chunk};
use crate::domain::document::Document;
use crate::domain::error::DocError;
use crate::domain::question::QuestionClass;
use crate::domain::traits::{ExtractiveAnswerer, Summarizer};

/// A model-produced answer and the style it was produced in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub class: QuestionClass,
    pub text:  String,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Answer ({}): {}", self.class.label(), self.text)
    }
}

pub struct AskUseCase<'a> {
    answerer:    &'a dyn ExtractiveAnswerer,
    summarizer:  &'a dyn Summarizer,
    chunker:     Chunker,
    medium_band: LengthBand,
    long_band:   LengthBand,
}

impl<'a> AskUseCase<'a> {
    pub fn new(
        answerer:   &'a dyn ExtractiveAnswerer,
        summarizer: &'a dyn Summarizer,
        config:     &ChatConfig,
    ) -> Self {
        Self {
            answerer,
            summarizer,
            chunker:     Chunker::new(config.answer_chunk_chars),
            medium_band: config.medium_band,
            long_band:   config.long_band,
        }
    }

    /// Classify `question` and answer it from `document`.
    pub fn answer(&self, document: &Document, question: &str) -> Result<Answer, DocError> {
        self.answer_as(document, question, QuestionClass::classify(question))
    }

    /// Answer `question` in the style of an already-known class.
    pub fn answer_as(
        &self,
        document: &Document,
        question: &str,
        class:    QuestionClass,
    ) -> Result<Answer, DocError> {
        let context = find_best_chunk(&document.text, question, &self.chunker)
            .ok_or_else(|| DocError::EmptyDocument {
                path: document.source.clone(),
            })?;

        tracing::info!("Answering {} question: '{}'", class, question);

        let text = match class {
            QuestionClass::Short => {
                let qa = self.answerer.answer(question, context)?;
                tracing::debug!("QA confidence {:.4}", qa.score);
                qa.answer
            }
            QuestionClass::Long   => self.summarize(context, self.long_band)?,
            QuestionClass::Medium => self.summarize(context, self.medium_band)?,
        };

        Ok(Answer { class, text })
    }

    fn summarize(&self, context: &str, band: LengthBand) -> Result<String, DocError> {
        Ok(self
            .summarizer
            .summarize(context, band.max_length, band.min_length)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::CollaboratorError;
    use crate::domain::traits::{MockExtractiveAnswerer, MockSummarizer, QaAnswer};

    /// Two 1500-char chunks; only the second mentions the treaty
    fn two_chunk_document() -> Document {
        let lead   = "Records show when the Treaty was signed: 1920.";
        let first  = "a".repeat(1500);
        let second = format!("{lead}{}", "b".repeat(1500 - lead.len()));
        Document::new("report.txt", format!("{first}{second}"))
    }

    fn unused_summarizer() -> MockSummarizer {
        let mut mock = MockSummarizer::new();
        mock.expect_summarize().never();
        mock
    }

    fn unused_answerer() -> MockExtractiveAnswerer {
        let mut mock = MockExtractiveAnswerer::new();
        mock.expect_answer().never();
        mock
    }

    #[test]
    fn test_short_question_uses_qa_model_verbatim() {
        let doc = two_chunk_document();
        let mut answerer = MockExtractiveAnswerer::new();
        answerer
            .expect_answer()
            .withf(|q, ctx| q.starts_with("when the treaty") && ctx.starts_with("Records show"))
            .times(1)
            .returning(|_, _| Ok(QaAnswer { answer: " 1920 ".into(), score: 0.9 }));
        let summarizer = unused_summarizer();

        let ask    = AskUseCase::new(&answerer, &summarizer, &ChatConfig::default());
        let answer = ask.answer(&doc, "when the treaty was signed").unwrap();

        assert_eq!(answer.class, QuestionClass::Short);
        assert_eq!(answer.text, " 1920 ");
    }

    #[test]
    fn test_long_question_uses_long_band() {
        let doc      = two_chunk_document();
        let answerer = unused_answerer();
        let mut summarizer = MockSummarizer::new();
        summarizer
            .expect_summarize()
            .withf(|_, max, min| *max == 500 && *min == 150)
            .times(1)
            .returning(|_, _, _| Ok("A long explanation.".into()));

        let ask    = AskUseCase::new(&answerer, &summarizer, &ChatConfig::default());
        let answer = ask.answer(&doc, "Explain the treaty").unwrap();

        assert_eq!(answer.to_string(), "Answer (Detailed): A long explanation.");
    }

    #[test]
    fn test_medium_question_uses_medium_band_and_first_chunk_fallback() {
        let doc      = two_chunk_document();
        let answerer = unused_answerer();
        let mut summarizer = MockSummarizer::new();
        summarizer
            .expect_summarize()
            .withf(|ctx, max, min| ctx.starts_with("aaa") && *max == 300 && *min == 100)
            .times(1)
            .returning(|_, _, _| Ok("Medium.".into()));

        let ask    = AskUseCase::new(&answerer, &summarizer, &ChatConfig::default());
        let answer = ask.answer(&doc, "What happened in chapter two").unwrap();

        assert_eq!(answer.to_string(), "Answer (Medium-Length Explanation): Medium.");
    }

    #[test]
    fn test_model_failure_is_collaborator_error() {
        let doc = two_chunk_document();
        let mut answerer = MockExtractiveAnswerer::new();
        answerer
            .expect_answer()
            .returning(|_, _| Err(CollaboratorError::Http("connection refused".into())));
        let summarizer = unused_summarizer();

        let ask    = AskUseCase::new(&answerer, &summarizer, &ChatConfig::default());
        let result = ask.answer(&doc, "When was it signed?");

        assert!(matches!(result, Err(ref e) if e.is_per_query()));
    }

    #[test]
    fn test_empty_document_has_no_context() {
        let doc        = Document::new("empty.txt", "");
        let answerer   = unused_answerer();
        let summarizer = unused_summarizer();

        let ask    = AskUseCase::new(&answerer, &summarizer, &ChatConfig::default());
        let result = ask.answer(&doc, "Why?");

        assert!(matches!(result, Err(DocError::EmptyDocument { .. })));
    }
}
