// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to any one
// business layer:
//
//   metrics.rs  — CSV log of every model call (duration and
//                 outcome), added to a collaborator with the
//                 Metered wrapper.
//
//   settings.rs — JSON settings file holding the chat and
//                 model configuration, so a setup can be
//                 saved once and reused across runs.

/// Collaborator call CSV logger
pub mod metrics;

/// Settings file loading and saving
pub mod settings;
