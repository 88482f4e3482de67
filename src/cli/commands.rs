// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands and every tunable flag.
//
//   chat           — interactive session (the default)
//   summarize      — print the document summary and stop
//   ask            — answer one question and stop
//   init-settings  — write the effective settings to a JSON file
//
// Tunables are global options backed by environment variables.
// They are all optional: anything not given keeps the value
// from the settings file (if any) or the built-in default.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::infra::settings::AppSettings;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a document, then answer questions about it interactively
    Chat(ChatArgs),

    /// Print the chunked summary of a document
    Summarize(DocumentArgs),

    /// Answer a single question about a document
    Ask(AskArgs),

    /// Write the effective settings to a JSON file
    InitSettings(InitSettingsArgs),
}

/// Arguments for the `chat` command
#[derive(Args, Debug, Default)]
pub struct ChatArgs {
    /// Document to load (PDF, DOCX or TXT); prompted for when omitted
    #[arg(long, short)]
    pub document: Option<PathBuf>,
}

/// Arguments for commands that need a document
#[derive(Args, Debug)]
pub struct DocumentArgs {
    /// Document to load (PDF, DOCX or TXT)
    #[arg(long, short)]
    pub document: PathBuf,
}

/// Arguments for the `ask` command
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Document to load (PDF, DOCX or TXT)
    #[arg(long, short)]
    pub document: PathBuf,

    /// The natural language question to answer
    #[arg(long, short)]
    pub question: String,
}

/// Arguments for the `init-settings` command
#[derive(Args, Debug)]
pub struct InitSettingsArgs {
    /// Where to write the settings JSON
    #[arg(long, default_value = "doc-chat.json")]
    pub path: PathBuf,
}

/// Options shared by every command
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// JSON settings file to start from (see `init-settings`)
    #[arg(long, global = true, env = "DOC_CHAT_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Endpoint of the extractive question-answering model
    #[arg(long, global = true, env = "DOC_CHAT_QA_URL")]
    pub qa_url: Option<String>,

    /// Endpoint of the summarization model
    #[arg(long, global = true, env = "DOC_CHAT_SUMMARIZE_URL")]
    pub summarize_url: Option<String>,

    /// Bearer token for the model endpoints
    #[arg(long, global = true, env = "DOC_CHAT_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Seconds to wait for a model before giving up on the call
    #[arg(long, global = true, env = "DOC_CHAT_TIMEOUT_SECS",
          value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Characters per chunk for the document summary
    #[arg(long, global = true, env = "DOC_CHAT_SUMMARY_CHUNK_CHARS",
          value_parser = clap::value_parser!(u64).range(1..))]
    pub summary_chunk_chars: Option<u64>,

    /// Characters per chunk when picking context for a question
    #[arg(long, global = true, env = "DOC_CHAT_ANSWER_CHUNK_CHARS",
          value_parser = clap::value_parser!(u64).range(1..))]
    pub answer_chunk_chars: Option<u64>,

    /// Most chunks summarized per document (0 = no cap)
    #[arg(long, global = true, env = "DOC_CHAT_MAX_SUMMARY_CHUNKS")]
    pub max_summary_chunks: Option<usize>,

    /// Append one CSV row per model call to this file
    #[arg(long, global = true, env = "DOC_CHAT_METRICS_FILE")]
    pub metrics_file: Option<PathBuf>,
}

impl GlobalArgs {
    /// Overwrite the settings with every flag that was given.
    /// This is the boundary between Layer 1 and the rest: the
    /// application layer only ever sees AppSettings.
    pub fn apply_to(&self, settings: &mut AppSettings) {
        let model = &mut settings.model;
        if let Some(url) = &self.qa_url {
            model.qa_url = url.clone();
        }
        if let Some(url) = &self.summarize_url {
            model.summarize_url = url.clone();
        }
        if let Some(token) = &self.api_token {
            model.api_token = Some(token.clone());
        }
        if let Some(secs) = self.timeout_secs {
            model.timeout_secs = secs;
        }

        let chat = &mut settings.chat;
        if let Some(chars) = self.summary_chunk_chars {
            chat.summary_chunk_chars = chars as usize;
        }
        if let Some(chars) = self.answer_chunk_chars {
            chat.answer_chunk_chars = chars as usize;
        }
        if let Some(max) = self.max_summary_chunks {
            chat.max_summary_chunks = max;
        }
    }
}
