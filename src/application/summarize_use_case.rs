// ============================================================
// Layer 2 — Summarize Use Case
// ============================================================
// Builds the document-level summary printed before the chat
// starts:
//
//   Step 1: Chunk the full text at summary_chunk_chars (800)
//   Step 2: Summarize every chunk on its own (200 / 50 band)
//   Step 3: Join the chunk summaries with single spaces
//
// Chunks never see each other, so a point that spans a chunk
// boundary is summarized as two fragments.
//
// Large documents would mean one model call per 800 chars with
// no upper bound, so at most max_summary_chunks chunks are sent
// (0 = no cap). Anything past the cap is left out of the
// summary and reported through DocumentSummary.

use crate::application::chat_use_case::{ChatConfig, LengthBand};
use crate::data::chunker::Chunker;
use crate::domain::document::Document;
use crate::domain::error::DocError;
use crate::domain::traits::Summarizer;

/// The joined summary plus how much of the document it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub text:              String,
    pub chunks_summarized: usize,
    pub chunks_total:      usize,
}

impl DocumentSummary {
    /// True when the chunk cap left part of the document out
    pub fn is_truncated(&self) -> bool {
        self.chunks_summarized < self.chunks_total
    }
}

pub struct SummarizeUseCase<'a> {
    summarizer: &'a dyn Summarizer,
    chunker:    Chunker,
    band:       LengthBand,
    max_chunks: usize,
}

impl<'a> SummarizeUseCase<'a> {
    pub fn new(summarizer: &'a dyn Summarizer, config: &ChatConfig) -> Self {
        Self {
            summarizer,
            chunker:    Chunker::new(config.summary_chunk_chars),
            band:       config.summary_band,
            max_chunks: config.max_summary_chunks,
        }
    }

    /// Summarize the whole document chunk by chunk.
    /// The first failing model call aborts the summary.
    pub fn summarize(&self, document: &Document) -> Result<DocumentSummary, DocError> {
        let chunks_total = self.chunker.num_chunks(document.char_count());
        let limit = match self.max_chunks {
            0   => chunks_total,
            max => max.min(chunks_total),
        };

        if limit < chunks_total {
            tracing::warn!(
                "'{}' has {} chunks; summarizing only the first {}",
                document.source,
                chunks_total,
                limit
            );
        }

        let mut summaries = Vec::with_capacity(limit);
        for (idx, chunk) in self.chunker.chunks(&document.text).take(limit).enumerate() {
            tracing::debug!("Summarizing chunk {}/{}", idx + 1, limit);
            summaries.push(self.summarizer.summarize(
                chunk,
                self.band.max_length,
                self.band.min_length,
            )?);
        }

        tracing::info!("Summarized {} of {} chunks", limit, chunks_total);

        Ok(DocumentSummary {
            text:              summaries.join(" "),
            chunks_summarized: limit,
            chunks_total,
        })
    }
}
