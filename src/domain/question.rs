// ============================================================
// Layer 3 — Question Classification
// ============================================================
// Every question is sorted into one of three classes, and the
// class decides which collaborator answers it and how long the
// answer should be:
//
//   Short  → extractive answer ("who", "when", "how many", ...)
//   Long   → long abstractive summary ("explain", "why", ...)
//   Medium → shorter abstractive summary (everything else)
//
// Matching is a case-insensitive substring test, so "who" also
// matches inside "whole". Short cues are checked before long
// cues: "how many effects" is Short even though "effects" is
// a long cue.

use std::fmt;

/// Cues that ask for a single fact
const SHORT_CUES: [&str; 5] = ["who", "when", "where", "how many", "how much"];

/// Cues that ask for an explanation
const LONG_CUES: [&str; 7] = [
    "explain", "describe", "what are", "how does", "why", "impact", "effects",
];

/// The response style a question calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionClass {
    Short,
    Medium,
    Long,
}

impl QuestionClass {
    /// Classify a free-text question by keyword presence.
    pub fn classify(question: &str) -> Self {
        let lower = question.to_lowercase();

        if SHORT_CUES.iter().any(|cue| lower.contains(cue)) {
            QuestionClass::Short
        } else if LONG_CUES.iter().any(|cue| lower.contains(cue)) {
            QuestionClass::Long
        } else {
            QuestionClass::Medium
        }
    }

    /// Label printed next to each answer
    pub fn label(self) -> &'static str {
        match self {
            QuestionClass::Short  => "Short & Precise",
            QuestionClass::Medium => "Medium-Length Explanation",
            QuestionClass::Long   => "Detailed",
        }
    }
}

impl fmt::Display for QuestionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuestionClass::Short  => "short",
            QuestionClass::Medium => "medium",
            QuestionClass::Long   => "long",
        };
        f.write_str(name)
    }
}
