// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer coordinates the other layers to accomplish one
// goal at a time.
//
// Rules for this layer:
//   - No HTTP or file parsing here (Layers 4 and 5)
//   - Collaborators arrive as `&dyn` trait objects
//   - Output goes to whatever writer the caller passes in
//
//   summarize_use_case — whole-document chunked summary
//   ask_use_case       — answer one question
//   chat_use_case      — summary + interactive question loop

// The document summary workflow
pub mod summarize_use_case;

// The single-question workflow
pub mod ask_use_case;

// The interactive session and its configuration
pub mod chat_use_case;
