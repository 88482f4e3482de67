// ============================================================
// Layer 5 — ML / Model Collaborators
// ============================================================
// This layer contains ALL model-backend specific code.
// No other layer talks HTTP or knows the wire format.
//
// The models themselves are not run here: they are pre-trained
// pipelines hosted behind an inference endpoint (the Hugging
// Face inference API by default, or any local server speaking
// the same JSON). This layer only builds requests and decodes
// responses.
//
//   client.rs     — shared blocking HTTP client: timeout,
//                   bearer auth, status/timeout error mapping
//
//   qa.rs         — extractive question answering
//                   (default: deepset/roberta-base-squad2)
//
//   summarizer.rs — abstractive summarization
//                   (default: facebook/bart-large-cnn)

/// Blocking JSON client shared by both collaborators
pub mod client;

/// Extractive question-answering collaborator
pub mod qa;

/// Abstractive summarization collaborator
pub mod summarizer;
