// ============================================================
// Layer 3 — Error Kinds
// ============================================================
// Two error types:
//
//   DocError          — anything that can go wrong in a run.
//                       All variants except Collaborator end the
//                       run; Collaborator only ends the current
//                       question.
//   CollaboratorError — a failed call to a model backend
//                       (transport, timeout, bad status, bad body).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Unsupported format '{extension}'. Only PDF, DOCX, TXT are allowed.")]
    UnsupportedFormat { extension: String },

    #[error("Failed to extract text from '{path}': {message}")]
    Extraction { path: String, message: String },

    #[error("Document '{path}' contains no text")]
    EmptyDocument { path: String },

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

impl DocError {
    /// Errors that should end only the current question, not the session
    pub fn is_per_query(&self) -> bool {
        matches!(self, DocError::Collaborator(_))
    }
}

#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("model request failed: {0}")]
    Http(String),

    #[error("model did not respond within {after_secs}s")]
    Timeout { after_secs: u64 },

    #[error("model API error: {status} — {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse model response: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_collaborator_errors_are_per_query() {
        let e: DocError = CollaboratorError::Timeout { after_secs: 5 }.into();
        assert!(e.is_per_query());
        assert!(!DocError::EmptyDocument { path: "a.txt".into() }.is_per_query());
    }

    #[test]
    fn test_unsupported_format_message() {
        let e = DocError::UnsupportedFormat { extension: "rtf".into() };
        assert_eq!(
            e.to_string(),
            "Unsupported format 'rtf'. Only PDF, DOCX, TXT are allowed."
        );
    }
}
