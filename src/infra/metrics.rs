// ============================================================
// Layer 6 — Collaborator Call Metrics
// ============================================================
// Records one CSV row per model call so slow or failing
// backends can be spotted after a session.
//
// Columns:
//   - call:        running call number within this process (1, 2, ...)
//   - kind:        "answer" or "summarize"
//   - input_chars: characters sent to the model
//   - elapsed_ms:  wall-clock duration of the call
//   - outcome:     "ok", "timeout" or "error"
//
// Example CSV output:
//   call,kind,input_chars,elapsed_ms,outcome
//   1,summarize,800,2314,ok
//   2,summarize,412,1870,ok
//   3,answer,1500,402,timeout
//
// The Metered wrapper adds this logging to any collaborator
// without the collaborator knowing about it. A failed write is
// logged as a warning and never fails the model call itself.

use anyhow::Result;
use std::{
    cell::Cell,
    fmt,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    rc::Rc,
    time::Instant,
};

use crate::domain::error::CollaboratorError;
use crate::domain::traits::{ExtractiveAnswerer, QaAnswer, Summarizer};

/// Which collaborator a call went to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Answer,
    Summarize,
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallKind::Answer    => f.write_str("answer"),
            CallKind::Summarize => f.write_str("summarize"),
        }
    }
}

/// One row of the metrics CSV
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub kind:        CallKind,
    pub input_chars: usize,
    pub elapsed_ms:  u128,
    pub outcome:     &'static str,
}

impl CallRecord {
    fn new<T>(
        kind:        CallKind,
        input_chars: usize,
        started:     Instant,
        result:      &Result<T, CollaboratorError>,
    ) -> Self {
        let outcome = match result {
            Ok(_)                                  => "ok",
            Err(CollaboratorError::Timeout { .. }) => "timeout",
            Err(_)                                 => "error",
        };
        Self {
            kind,
            input_chars,
            elapsed_ms: started.elapsed().as_millis(),
            outcome,
        }
    }
}

/// Appends call records to a CSV file.
pub struct MetricsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,

    /// Number of the last call logged
    calls: Cell<u64>,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet, so
    /// several sessions can append to the same file.
    pub fn new(csv_path: impl Into<PathBuf>) -> Result<Self> {
        let csv_path = csv_path.into();

        if let Some(dir) = csv_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "call,kind,input_chars,elapsed_ms,outcome")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self {
            csv_path,
            calls: Cell::new(0),
        })
    }

    /// Append one call as a new row in the CSV.
    pub fn log(&self, record: &CallRecord) -> Result<()> {
        let call = self.calls.get() + 1;
        self.calls.set(call);

        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(
            f,
            "{},{},{},{},{}",
            call, record.kind, record.input_chars, record.elapsed_ms, record.outcome,
        )?;

        tracing::debug!(
            "Logged {} call #{}: {} ms, {}",
            record.kind,
            call,
            record.elapsed_ms,
            record.outcome
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    fn log_or_warn(&self, record: &CallRecord) {
        if let Err(e) = self.log(record) {
            tracing::warn!(
                "Could not write metrics to '{}': {}",
                self.csv_path.display(),
                e
            );
        }
    }
}

// ─── Metered ──────────────────────────────────────────────────────────────────
/// Wraps a collaborator and logs every call it serves.
pub struct Metered<T> {
    inner:  T,
    logger: Rc<MetricsLogger>,
}

impl<T> Metered<T> {
    pub fn new(inner: T, logger: Rc<MetricsLogger>) -> Self {
        Self { inner, logger }
    }
}

impl<T: ExtractiveAnswerer> ExtractiveAnswerer for Metered<T> {
    fn answer(&self, question: &str, context: &str) -> Result<QaAnswer, CollaboratorError> {
        let started = Instant::now();
        let result  = self.inner.answer(question, context);
        let chars   = question.chars().count() + context.chars().count();
        self.logger
            .log_or_warn(&CallRecord::new(CallKind::Answer, chars, started, &result));
        result
    }
}

impl<T: Summarizer> Summarizer for Metered<T> {
    fn summarize(
        &self,
        text:       &str,
        max_length: u32,
        min_length: u32,
    ) -> Result<String, CollaboratorError> {
        let started = Instant::now();
        let result  = self.inner.summarize(text, max_length, min_length);
        self.logger.log_or_warn(&CallRecord::new(
            CallKind::Summarize,
            text.chars().count(),
            started,
            &result,
        ));
        result
    }
}
