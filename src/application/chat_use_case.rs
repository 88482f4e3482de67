// ============================================================
// Layer 2 — Chat Use Case
// ============================================================
// Runs one interactive session over an already-loaded document:
//
//   Step 1: Print the document summary (SummarizeUseCase)
//   Step 2: Loop:
//             prompt → read a line → "exit"? stop
//             → classify → AskUseCase → print labelled answer
//
// The session reads from any BufRead and writes to any Write,
// so tests drive it with in-memory buffers.
//
// A failed model call ends only the current question: the
// error is printed and the next prompt follows. The summary
// step is treated the same way. The exit command is checked
// only between questions, never mid-call.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

use crate::application::ask_use_case::AskUseCase;
use crate::application::summarize_use_case::SummarizeUseCase;
use crate::domain::document::Document;
use crate::domain::question::QuestionClass;
use crate::domain::traits::{ExtractiveAnswerer, Summarizer};

/// Typing this (any case) ends the session
pub const EXIT_COMMAND: &str = "exit";

// ─── Chat Configuration ──────────────────────────────────────────────────────
/// Target length band for a summarization call, in model tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBand {
    pub max_length: u32,
    pub min_length: u32,
}

impl LengthBand {
    pub const fn new(max_length: u32, min_length: u32) -> Self {
        Self { max_length, min_length }
    }
}

/// Chunk sizes and length bands for a session.
/// Serialisable so it can live in a settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Chunk size for the document summary, in characters
    pub summary_chunk_chars: usize,

    /// Length band for each summary chunk
    pub summary_band: LengthBand,

    /// Most chunks sent to the model for the summary (0 = no cap)
    pub max_summary_chunks: usize,

    /// Chunk size when picking context for a question
    pub answer_chunk_chars: usize,

    /// Length band for medium questions
    pub medium_band: LengthBand,

    /// Length band for long questions
    pub long_band: LengthBand,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            summary_chunk_chars: 800,
            summary_band:        LengthBand::new(200, 50),
            max_summary_chunks:  64,
            answer_chunk_chars:  1500,
            medium_band:         LengthBand::new(300, 100),
            long_band:           LengthBand::new(500, 150),
        }
    }
}

impl ChatConfig {
    /// Reject values the chunker or the models cannot work with.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.summary_chunk_chars > 0, "summary_chunk_chars must be at least 1");
        anyhow::ensure!(self.answer_chunk_chars > 0, "answer_chunk_chars must be at least 1");

        for (name, band) in [
            ("summary_band", self.summary_band),
            ("medium_band", self.medium_band),
            ("long_band", self.long_band),
        ] {
            anyhow::ensure!(band.max_length > 0, "{name}: max_length must be at least 1");
            anyhow::ensure!(
                band.min_length <= band.max_length,
                "{name}: min_length ({}) exceeds max_length ({})",
                band.min_length,
                band.max_length
            );
        }
        Ok(())
    }
}

/// Counts reported at the end of a session
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub answered: usize,
    pub failed:   usize,
}

// ─── ChatUseCase ──────────────────────────────────────────────────────────────
pub struct ChatUseCase<'a> {
    summarize: SummarizeUseCase<'a>,
    ask:       AskUseCase<'a>,
}

impl<'a> ChatUseCase<'a> {
    pub fn new(
        answerer:   &'a dyn ExtractiveAnswerer,
        summarizer: &'a dyn Summarizer,
        config:     &ChatConfig,
    ) -> Self {
        Self {
            summarize: SummarizeUseCase::new(summarizer, config),
            ask:       AskUseCase::new(answerer, summarizer, config),
        }
    }

    /// Print the summary, then answer questions until "exit" or end of input.
    pub fn run<R: BufRead, W: Write>(
        &self,
        document:   &Document,
        mut input:  R,
        mut output: W,
    ) -> Result<SessionStats> {
        // ── Step 1: Document summary ─────────────────────────────────────────
        writeln!(output, "\nGenerating summary...")?;
        match self.summarize.summarize(document) {
            Ok(summary) => {
                writeln!(output, "\nSummary: {}", summary.text)?;
                if summary.is_truncated() {
                    writeln!(
                        output,
                        "(Summary covers the first {} of {} chunks.)",
                        summary.chunks_summarized, summary.chunks_total
                    )?;
                }
            }
            Err(e) if e.is_per_query() => {
                tracing::warn!("Summary failed: {}", e);
                writeln!(output, "\nSummary unavailable: {e}")?;
            }
            Err(e) => return Err(e.into()),
        }

        // ── Step 2: Question loop ────────────────────────────────────────────
        writeln!(output, "\nChatbot ready! Ask a question based on the document.")?;

        let mut stats = SessionStats::default();
        let mut line  = String::new();

        loop {
            write!(output, "\nAsk a question (or type '{EXIT_COMMAND}' to quit): ")?;
            output.flush()?;

            line.clear();
            let read = input.read_line(&mut line).context("Failed to read question")?;

            // End of input behaves like "exit"
            if read == 0 {
                writeln!(output)?;
                break;
            }

            let question = line.trim();
            if question.eq_ignore_ascii_case(EXIT_COMMAND) {
                break;
            }
            if question.is_empty() {
                continue;
            }

            let class = QuestionClass::classify(question);
            match class {
                QuestionClass::Long   => writeln!(output, "\nGenerating a detailed response...")?,
                QuestionClass::Medium => writeln!(output, "\nGenerating a well-explained response...")?,
                QuestionClass::Short  => {}
            }

            match self.ask.answer_as(document, question, class) {
                Ok(answer) => {
                    writeln!(output, "\n{answer}")?;
                    stats.answered += 1;
                }
                Err(e) if e.is_per_query() => {
                    tracing::warn!("Question failed: {}", e);
                    writeln!(output, "\nError: {e}")?;
                    stats.failed += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        writeln!(output, "Goodbye!")?;
        tracing::info!(
            "Session ended: {} answered, {} failed",
            stats.answered,
            stats.failed
        );
        Ok(stats)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::chunker::Chunker;
    use crate::data::loader::{write_docx_fixture, DocumentLoader};
    use crate::domain::error::CollaboratorError;
    use crate::domain::traits::{MockExtractiveAnswerer, MockSummarizer, QaAnswer};

    fn run_session(
        document:   &Document,
        answerer:   &MockExtractiveAnswerer,
        summarizer: &MockSummarizer,
        input:      &str,
    ) -> (SessionStats, String) {
        let chat   = ChatUseCase::new(answerer, summarizer, &ChatConfig::default());
        let mut out = Vec::new();
        let stats  = chat.run(document, input.as_bytes(), &mut out).unwrap();
        (stats, String::from_utf8(out).unwrap())
    }

    fn summary_only(expected_calls: usize) -> MockSummarizer {
        let mut mock = MockSummarizer::new();
        mock.expect_summarize()
            .withf(|_, max, min| *max == 200 && *min == 50)
            .times(expected_calls)
            .returning(|_, _, _| Ok("S".into()));
        mock
    }

    fn never_answers() -> MockExtractiveAnswerer {
        let mut mock = MockExtractiveAnswerer::new();
        mock.expect_answer().never();
        mock
    }

    #[test]
    fn test_docx_then_exit_calls_no_model_for_exit() {
        let paragraphs: Vec<String> = (1..=10)
            .map(|i| format!("Paragraph {i} describes part {i} of the annual plan in some detail."))
            .collect();
        let refs: Vec<&str> = paragraphs.iter().map(String::as_str).collect();
        let file = write_docx_fixture(&refs);
        let doc  = DocumentLoader::new().load(file.path()).unwrap();

        let summary_calls = Chunker::new(800).num_chunks(doc.char_count());
        let summarizer    = summary_only(summary_calls);
        let answerer      = never_answers();

        let (stats, out) = run_session(&doc, &answerer, &summarizer, "exit\n");

        assert_eq!(stats, SessionStats::default());
        assert!(out.contains("Summary: S"));
        assert!(out.contains("Chatbot ready!"));
        assert!(out.trim_end().ends_with("Goodbye!"));
    }

    #[test]
    fn test_exit_ignores_case_and_surrounding_space() {
        let doc        = Document::new("a.txt", "short text");
        let summarizer = summary_only(1);
        let answerer   = never_answers();

        let (_, out) = run_session(&doc, &answerer, &summarizer, "  ExIt  \nWho is this?\n");
        assert!(out.contains("Goodbye!"));
        assert!(!out.contains("Answer ("));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let doc        = Document::new("a.txt", "short text");
        let summarizer = summary_only(1);
        let answerer   = never_answers();

        let (stats, out) = run_session(&doc, &answerer, &summarizer, "");
        assert_eq!(stats, SessionStats::default());
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let doc        = Document::new("a.txt", "short text");
        let summarizer = summary_only(1);
        let answerer   = never_answers();

        let (stats, _) = run_session(&doc, &answerer, &summarizer, "\n   \nexit\n");
        assert_eq!(stats, SessionStats::default());
    }

    #[test]
    fn test_failed_question_does_not_end_session() {
        let doc = Document::new("a.txt", "The board met in March.");

        let mut answerer = MockExtractiveAnswerer::new();
        answerer
            .expect_answer()
            .times(1)
            .returning(|_, _| Err(CollaboratorError::Timeout { after_secs: 5 }));

        let mut summarizer = MockSummarizer::new();
        summarizer
            .expect_summarize()
            .returning(|_, max, _| Ok(format!("summary up to {max}")));

        let input        = "When did the board meet?\nExplain the meeting\nexit\n";
        let (stats, out) = run_session(&doc, &answerer, &summarizer, input);

        assert_eq!(stats, SessionStats { answered: 1, failed: 1 });
        assert!(out.contains("Error: model did not respond within 5s"));
        assert!(out.contains("Generating a detailed response..."));
        assert!(out.contains("Answer (Detailed): summary up to 500"));
    }

    #[test]
    fn test_short_and_medium_answers_are_labelled() {
        let doc = Document::new("a.txt", "The board met in March.");

        let mut answerer = MockExtractiveAnswerer::new();
        answerer
            .expect_answer()
            .returning(|_, _| Ok(QaAnswer { answer: "March".into(), score: 0.8 }));

        let mut summarizer = MockSummarizer::new();
        summarizer
            .expect_summarize()
            .returning(|_, max, _| Ok(format!("summary up to {max}")));

        let input      = "When did the board meet?\nWhat happened at the meeting\nexit\n";
        let (stats, out) = run_session(&doc, &answerer, &summarizer, input);

        assert_eq!(stats.answered, 2);
        assert!(out.contains("Answer (Short & Precise): March"));
        assert!(out.contains("Generating a well-explained response..."));
        assert!(out.contains("Answer (Medium-Length Explanation): summary up to 300"));
    }

    #[test]
    fn test_failed_summary_still_starts_chat() {
        let doc = Document::new("a.txt", "short text");

        let mut summarizer = MockSummarizer::new();
        summarizer
            .expect_summarize()
            .returning(|_, _, _| Err(CollaboratorError::Http("connection refused".into())));
        let answerer = never_answers();

        let (_, out) = run_session(&doc, &answerer, &summarizer, "exit\n");
        assert!(out.contains("Summary unavailable: model request failed: connection refused"));
        assert!(out.contains("Chatbot ready!"));
    }

    #[test]
    fn test_default_config_is_valid_and_bad_band_is_rejected() {
        assert!(ChatConfig::default().validate().is_ok());

        let config = ChatConfig {
            long_band: LengthBand::new(100, 150),
            ..ChatConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ChatConfig {
            answer_chunk_chars: 0,
            ..ChatConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
