// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits that describe what the system
// works with: a loaded document, the class of a question,
// the error kinds, and the two model collaborators.
//
// Rules for this layer:
//   - NO HTTP or file I/O
//   - NO parsing crates (lopdf, docx-rs)
//   - Only plain Rust structs, enums, and traits
//
// Everything the application layer needs to reason about
// lives here, so use cases can be tested with mock
// collaborators and in-memory text.

// A loaded document's extracted text
pub mod document;

// Short / medium / long question classification
pub mod question;

// Error kinds shared by every layer
pub mod error;

// Collaborator abstractions (answering, summarization)
pub mod traits;
