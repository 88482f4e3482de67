// ============================================================
// Layer 3 — Document Domain Type
// ============================================================
// Represents a single document loaded from disk: the path it
// came from and the text extracted from it.
//
// A Document is created once by the loader and never mutated
// afterwards. Chunks are borrowed views into `text`, so the
// Document must outlive every chunk taken from it.

/// A document whose text has already been extracted from its
/// original format (PDF, DOCX or plain text).
#[derive(Debug, Clone)]
pub struct Document {
    /// The path the document was loaded from — kept for log lines
    /// and error messages
    pub source: String,

    /// The full extracted text, exactly as the extractor produced it
    pub text: String,
}

impl Document {
    /// Create a new Document with a source path and text content.
    ///
    /// Example:
    ///   let doc = Document::new("report.txt", "Quarterly results...");
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text:   text.into(),
        }
    }

    /// Number of characters (Unicode scalar values) in the text.
    /// Chunk sizes are measured in the same unit.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// True when the extractor produced no text at all.
    /// Whitespace-only text still counts as content.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_count_counts_characters_not_bytes() {
        let doc = Document::new("a.txt", "héllo");
        assert_eq!(doc.char_count(), 5);
        assert_eq!(doc.text.len(), 6);
    }

    #[test]
    fn test_only_zero_length_text_is_empty() {
        assert!(Document::new("a.txt", "").is_empty());
        assert!(!Document::new("a.txt", " \n\t").is_empty());
    }
}
