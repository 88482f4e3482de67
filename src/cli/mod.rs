// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// The entry point for all user interaction. clap parses the
// command line; this module resolves settings, builds the two
// model collaborators once, loads the document, and hands off
// to the use cases in Layer 2.
//
// Fatal conditions (missing file, unsupported format, failed
// extraction, empty document) are returned as errors from
// run(), which makes the process exit with a non-zero status.
// Per-question model failures never reach this layer.

// Declare the commands submodule
pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

use commands::{AskArgs, ChatArgs, Commands, DocumentArgs, GlobalArgs, InitSettingsArgs};

use crate::application::{
    ask_use_case::AskUseCase,
    chat_use_case::ChatUseCase,
    summarize_use_case::SummarizeUseCase,
};
use crate::data::loader::DocumentLoader;
use crate::domain::{
    document::Document,
    error::DocError,
    traits::{ExtractiveAnswerer, Summarizer},
};
use crate::infra::{
    metrics::{Metered, MetricsLogger},
    settings::{AppSettings, SettingsStore},
};
use crate::ml::{
    client::ModelClient,
    qa::HttpQuestionAnswerer,
    summarizer::HttpSummarizer,
};

#[derive(Parser, Debug)]
#[command(
    name = "doc-chat",
    version,
    about = "Summarize a PDF, DOCX or TXT document, then ask questions about it."
)]
pub struct Cli {
    /// The subcommand to run (defaults to `chat`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub options: GlobalArgs,
}

/// The two model collaborators, built once per run
struct Collaborators {
    answerer:   Box<dyn ExtractiveAnswerer>,
    summarizer: Box<dyn Summarizer>,
}

impl Cli {
    /// Resolve settings and dispatch to the chosen subcommand.
    pub fn run(self) -> Result<()> {
        let settings = self.resolve_settings()?;

        match self.command {
            None                               => run_chat(ChatArgs::default(), &settings, &self.options),
            Some(Commands::Chat(args))         => run_chat(args, &settings, &self.options),
            Some(Commands::Summarize(args))    => run_summarize(args, &settings, &self.options),
            Some(Commands::Ask(args))          => run_ask(args, &settings, &self.options),
            Some(Commands::InitSettings(args)) => run_init_settings(args, &settings),
        }
    }

    /// Defaults, then the settings file, then explicit flags.
    fn resolve_settings(&self) -> Result<AppSettings> {
        let mut settings = match &self.options.settings {
            Some(path) => SettingsStore::new(path).load()?,
            None       => AppSettings::default(),
        };

        self.options.apply_to(&mut settings);
        settings.validate()?;

        tracing::debug!("Effective settings: {:?}", settings.chat);
        Ok(settings)
    }
}

/// Handles the `chat` subcommand (and the bare invocation).
fn run_chat(args: ChatArgs, settings: &AppSettings, options: &GlobalArgs) -> Result<()> {
    let path = match args.document {
        Some(path) => path,
        None       => prompt_for_path()?,
    };

    let document = load_document(&path)?;
    println!("\nDocument loaded successfully!");

    let collaborators = build_collaborators(settings, options)?;
    let chat = ChatUseCase::new(
        collaborators.answerer.as_ref(),
        collaborators.summarizer.as_ref(),
        &settings.chat,
    );

    let stdin  = io::stdin();
    let stdout = io::stdout();
    chat.run(&document, stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Handles the `summarize` subcommand.
fn run_summarize(args: DocumentArgs, settings: &AppSettings, options: &GlobalArgs) -> Result<()> {
    let document      = load_document(&args.document)?;
    let collaborators = build_collaborators(settings, options)?;

    let summary = SummarizeUseCase::new(collaborators.summarizer.as_ref(), &settings.chat)
        .summarize(&document)?;

    println!("Summary: {}", summary.text);
    if summary.is_truncated() {
        println!(
            "(Summary covers the first {} of {} chunks.)",
            summary.chunks_summarized, summary.chunks_total
        );
    }
    Ok(())
}

/// Handles the `ask` subcommand.
fn run_ask(args: AskArgs, settings: &AppSettings, options: &GlobalArgs) -> Result<()> {
    let document      = load_document(&args.document)?;
    let collaborators = build_collaborators(settings, options)?;

    let ask = AskUseCase::new(
        collaborators.answerer.as_ref(),
        collaborators.summarizer.as_ref(),
        &settings.chat,
    );
    let answer = ask.answer(&document, &args.question)?;

    println!("{answer}");
    Ok(())
}

/// Handles the `init-settings` subcommand.
fn run_init_settings(args: InitSettingsArgs, settings: &AppSettings) -> Result<()> {
    SettingsStore::new(&args.path).save(settings)?;
    println!("Settings written to '{}'", args.path.display());
    Ok(())
}

/// Ask for the document path on stdin.
fn prompt_for_path() -> Result<PathBuf> {
    print!("Enter the document path (PDF, DOCX, TXT): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read document path")?;

    Ok(PathBuf::from(line.trim()))
}

/// Check the file exists, extract its text, and refuse empty documents.
fn load_document(path: &Path) -> Result<Document> {
    if !path.is_file() {
        return Err(DocError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let document = DocumentLoader::new().load(path)?;
    if document.is_empty() {
        return Err(DocError::EmptyDocument {
            path: document.source,
        }
        .into());
    }

    Ok(document)
}

/// Build both collaborators over one shared HTTP client,
/// wrapped with call metrics when a metrics file is configured.
fn build_collaborators(settings: &AppSettings, options: &GlobalArgs) -> Result<Collaborators> {
    let model  = &settings.model;
    let client = ModelClient::new(model).context("Failed to create model HTTP client")?;

    let answerer   = HttpQuestionAnswerer::new(client.clone(), &model.qa_url);
    let summarizer = HttpSummarizer::new(client, &model.summarize_url);

    tracing::info!(
        "Models: QA at {}, summarization at {} (timeout {}s)",
        model.qa_url,
        model.summarize_url,
        model.timeout_secs
    );

    let collaborators = match &options.metrics_file {
        Some(path) => {
            let logger = Rc::new(MetricsLogger::new(path)?);
            tracing::info!("Logging model calls to '{}'", logger.csv_path().display());
            Collaborators {
                answerer:   Box::new(Metered::new(answerer, Rc::clone(&logger))),
                summarizer: Box::new(Metered::new(summarizer, logger)),
            }
        }
        None => Collaborators {
            answerer:   Box::new(answerer),
            summarizer: Box::new(summarizer),
        },
    };

    Ok(collaborators)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_file_not_found() {
        let err = load_document(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DocError>(),
            Some(DocError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();

        let err = load_document(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DocError>(),
            Some(DocError::EmptyDocument { .. })
        ));
    }

    #[test]
    fn test_whitespace_document_is_accepted() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        std::fs::write(&path, "  \n\n ").unwrap();

        let document = load_document(&path).unwrap();
        assert_eq!(document.text, "  \n\n ");
    }

    #[test]
    fn test_unsupported_file_is_reported() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.rtf");
        std::fs::write(&path, "{\\rtf1 hi}").unwrap();

        let err = load_document(&path).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported format 'rtf'. Only PDF, DOCX, TXT are allowed."
        );
    }

    #[test]
    fn test_settings_file_then_flags() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "model": { "timeout_secs": 7, "qa_url": "http://qa" } }"#).unwrap();

        let cli = Cli::try_parse_from([
            "doc-chat",
            "--settings",
            path.to_str().unwrap(),
            "--qa-url",
            "http://override",
        ])
        .unwrap();
        let settings = cli.resolve_settings().unwrap();

        assert_eq!(settings.model.timeout_secs, 7);
        assert_eq!(settings.model.qa_url, "http://override");
    }

    #[test]
    fn test_zero_timeout_settings_file_is_rejected() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "model": { "timeout_secs": 0 } }"#).unwrap();

        let cli = Cli::try_parse_from(["doc-chat", "--settings", path.to_str().unwrap()]).unwrap();
        assert!(cli.resolve_settings().is_err());
    }

    #[test]
    fn test_collaborators_build_with_metrics_file() {
        let dir     = tempfile::tempdir().unwrap();
        let options = GlobalArgs {
            metrics_file: Some(dir.path().join("calls.csv")),
            ..GlobalArgs::default()
        };

        assert!(build_collaborators(&AppSettings::default(), &options).is_ok());
        assert!(dir.path().join("calls.csv").exists());
    }
}
