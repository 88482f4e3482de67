// ============================================================
// Layer 4 — Text Chunker
// ============================================================
// Splits a document into fixed-size, contiguous, non-overlapping
// pieces measured in characters.
//
// Cuts are pure character offsets: a word or sentence may be
// split across two chunks. Models downstream see each chunk on
// its own, so the chunk size is tuned to their input limits
// rather than to the text's structure.
//
// Example with max_chars = 4:
//   Text:    "abcdefghij"
//   Chunk 1: "abcd"
//   Chunk 2: "efgh"
//   Chunk 3: "ij"        (remainder)
//
// Chunks borrow from the input text, and the iterator is Clone,
// so the sequence can be restarted without re-reading anything.

/// Splits text into chunks of at most `max_chars` characters.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    /// Number of characters in every chunk except possibly the last
    max_chars: usize,
}

impl Chunker {
    /// Create a new Chunker.
    ///
    /// # Panics
    /// Panics if `max_chars` is 0, because no chunk could ever
    /// make progress through the text.
    pub fn new(max_chars: usize) -> Self {
        assert!(max_chars > 0, "max_chars must be at least 1");
        Self { max_chars }
    }

    /// Lazily split `text` into chunks, in order.
    pub fn chunks<'t>(&self, text: &'t str) -> Chunks<'t> {
        Chunks {
            rest:      text,
            max_chars: self.max_chars,
        }
    }

    /// Returns how many chunks a text of `char_count` characters produces
    pub fn num_chunks(&self, char_count: usize) -> usize {
        char_count.div_ceil(self.max_chars)
    }
}

/// Iterator over the chunks of one text. See [`Chunker::chunks`].
#[derive(Debug, Clone)]
pub struct Chunks<'t> {
    rest:      &'t str,
    max_chars: usize,
}

impl<'t> Iterator for Chunks<'t> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        if self.rest.is_empty() {
            return None;
        }

        // Byte offset of the first character past this chunk, or the
        // end of the text when fewer than max_chars characters remain
        let cut = self
            .rest
            .char_indices()
            .nth(self.max_chars)
            .map(|(idx, _)| idx)
            .unwrap_or(self.rest.len());

        let (chunk, rest) = self.rest.split_at(cut);
        self.rest = rest;
        Some(chunk)
    }
}
