// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a file on disk and the text handed to a
// model:
//
//   .pdf / .docx / .txt
//       │
//       ▼
//   DocumentLoader   → extracts the full text
//       │
//       ▼
//   Chunker          → fixed-size character chunks
//       │
//       ▼
//   select_chunk     → the one chunk used as model context
//
// Each module is responsible for exactly one step and is
// tested on its own.

/// Extracts text from PDF, DOCX and TXT files
pub mod loader;

/// Splits text into fixed-size character chunks
pub mod chunker;

/// Picks the context chunk for a question
pub mod selector;
