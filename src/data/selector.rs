// ============================================================
// Layer 4 — Chunk Selector
// ============================================================
// Picks the one chunk that is sent to a model as context for a
// question.
//
// A chunk "matches" when the lowercased question appears as a
// substring of the lowercased chunk. The first matching chunk
// wins; if nothing matches, the first chunk is used.
//
// This is first-match-or-default rather than real relevance
// ranking: a question phrased differently from the document's
// wording almost never matches, and then the answer always
// comes from the opening of the document. Keyword-overlap
// scoring would be the natural upgrade; callers currently
// depend on the exact behaviour described above.

use crate::data::chunker::Chunker;

/// Select the context chunk for `query`.
///
/// Returns `None` only when `chunks` is empty.
pub fn select_chunk<'t, I>(chunks: I, query: &str) -> Option<&'t str>
where
    I: IntoIterator<Item = &'t str>,
{
    let needle    = query.to_lowercase();
    let mut first = None;

    for chunk in chunks {
        if chunk.to_lowercase().contains(&needle) {
            return Some(chunk);
        }
        first.get_or_insert(chunk);
    }

    first
}

/// Chunk `text` with `chunker` and select the context chunk for `query`.
pub fn find_best_chunk<'t>(text: &'t str, query: &str, chunker: &Chunker) -> Option<&'t str> {
    let chunk = select_chunk(chunker.chunks(text), query);
    tracing::debug!(
        "Selected context chunk of {} chars for query '{}'",
        chunk.map(|c| c.chars().count()).unwrap_or(0),
        query
    );
    chunk
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_first_chunk_containing_query() {
        let chunks = ["The cat sat", "on the mat today"];
        assert_eq!(select_chunk(chunks, "mat"), Some("on the mat today"));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let chunks = ["alpha", "The MAT is red", "mat again"];
        assert_eq!(select_chunk(chunks, "Mat"), Some("The MAT is red"));
    }

    #[test]
    fn test_falls_back_to_first_chunk() {
        let chunks = ["The cat sat", "on the mat today"];
        assert_eq!(select_chunk(chunks, "dog"), Some("The cat sat"));
    }

    #[test]
    fn test_empty_sequence_gives_none() {
        let chunks: [&str; 0] = [];
        assert_eq!(select_chunk(chunks, "anything"), None);
    }

    #[test]
    fn test_whole_question_must_appear() {
        // Individual words match, the full question does not
        let chunks = ["budget grew", "the budget grew by ten percent"];
        assert_eq!(
            select_chunk(chunks, "how much did the budget grow"),
            Some("budget grew")
        );
    }

    #[test]
    fn test_find_best_chunk_over_document_text() {
        let text    = "aaaaabbbbbccccc";
        let chunker = Chunker::new(5);
        assert_eq!(find_best_chunk(text, "CCC", &chunker), Some("ccccc"));
        assert_eq!(find_best_chunk(text, "zzz", &chunker), Some("aaaaa"));
        assert_eq!(find_best_chunk("", "zzz", &chunker), None);
    }
}
