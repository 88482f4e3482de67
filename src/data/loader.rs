// ============================================================
// Layer 4 — Document Loader
// ============================================================
// Turns a file on disk into a Document by dispatching on the
// lowercase file extension:
//
//   .pdf  → lopdf, page texts joined with "\n" in page order
//   .docx → docx-rs, paragraph texts joined with "\n" in order
//   .txt  → read verbatim as UTF-8
//
// Any other extension is rejected with UnsupportedFormat before
// the file is touched. Whether the file exists is the caller's
// check, made before load() is called.
//
// How .docx files work:
//   A .docx file is a ZIP archive of XML parts. docx-rs parses
//   it into a typed tree:
//
//   Document
//     └── children: Vec<DocumentChild>
//           └── Paragraph
//                 └── children: Vec<ParagraphChild>
//                       └── Run
//                             └── children: Vec<RunChild>
//                                   └── Text / Tab / Break
//
// Only body paragraphs are read; tables, images and headers are
// skipped.

use std::{fmt, fs, path::Path};

use crate::domain::document::Document;
use crate::domain::error::DocError;

/// The file formats the loader can extract text from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportedFormat {
    Pdf,
    Docx,
    Txt,
}

impl SupportedFormat {
    /// Detect the format from the path's extension, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self, DocError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf"  => Ok(SupportedFormat::Pdf),
            "docx" => Ok(SupportedFormat::Docx),
            "txt"  => Ok(SupportedFormat::Txt),
            _      => Err(DocError::UnsupportedFormat { extension }),
        }
    }
}

impl fmt::Display for SupportedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SupportedFormat::Pdf  => "PDF",
            SupportedFormat::Docx => "DOCX",
            SupportedFormat::Txt  => "TXT",
        };
        f.write_str(name)
    }
}

/// Loads a single PDF, DOCX or TXT file into a Document.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentLoader;

impl DocumentLoader {
    pub fn new() -> Self {
        Self
    }

    /// Extract the text of the file at `path`.
    pub fn load(&self, path: &Path) -> Result<Document, DocError> {
        let format = SupportedFormat::from_path(path)?;

        tracing::debug!("Extracting {} text from '{}'", format, path.display());

        let text = match format {
            SupportedFormat::Pdf  => extract_pdf(path)?,
            SupportedFormat::Docx => extract_docx(path)?,
            SupportedFormat::Txt  => extract_txt(path)?,
        };

        tracing::info!(
            "Loaded '{}' ({}, {} chars)",
            path.display(),
            format,
            text.chars().count()
        );

        Ok(Document::new(path.display().to_string(), text))
    }
}

fn extraction_error(path: &Path, message: impl fmt::Display) -> DocError {
    DocError::Extraction {
        path:    path.display().to_string(),
        message: message.to_string(),
    }
}

// ─── PDF ──────────────────────────────────────────────────────────────────────
/// Join the text of every page with newlines, in page order.
/// A page whose text cannot be decoded contributes an empty
/// string so the remaining pages keep their positions.
fn extract_pdf(path: &Path) -> Result<String, DocError> {
    let pdf = lopdf::Document::load(path).map_err(|e| extraction_error(path, e))?;

    // get_pages() is a BTreeMap keyed by page number, so it iterates in order
    let pages = pdf.get_pages();
    let mut page_texts = Vec::with_capacity(pages.len());

    for page_num in pages.keys() {
        match pdf.extract_text(&[*page_num]) {
            Ok(text) => page_texts.push(text),
            Err(e) => {
                tracing::warn!(
                    "Failed to extract text from page {} of '{}': {}",
                    page_num,
                    path.display(),
                    e
                );
                page_texts.push(String::new());
            }
        }
    }

    Ok(page_texts.join("\n"))
}

// ─── DOCX ─────────────────────────────────────────────────────────────────────
/// Join the text of every body paragraph with newlines, in
/// document order. Empty paragraphs are kept as empty lines.
fn extract_docx(path: &Path) -> Result<String, DocError> {
    use docx_rs::DocumentChild;

    // Read the raw bytes of the .docx file (which is a ZIP)
    let bytes = fs::read(path).map_err(|e| extraction_error(path, e))?;

    let docx = docx_rs::read_docx(&bytes)
        .map_err(|e| extraction_error(path, format!("docx-rs parse error: {e:?}")))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

/// Plain text of one paragraph: its runs concatenated with no
/// separator, since runs are formatting spans of the same line.
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    use docx_rs::{ParagraphChild, RunChild};

    let mut text = String::new();

    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                match rc {
                    RunChild::Text(t)  => text.push_str(&t.text),
                    RunChild::Tab(_)   => text.push('\t'),
                    RunChild::Break(_) => text.push('\n'),
                    _ => {}
                }
            }
        }
    }

    text
}

// ─── TXT ──────────────────────────────────────────────────────────────────────
fn extract_txt(path: &Path) -> Result<String, DocError> {
    fs::read_to_string(path).map_err(|e| extraction_error(path, e))
}

/// Write a .docx with one paragraph per entry to a temp file.
#[cfg(test)]
pub(crate) fn write_docx_fixture(paragraphs: &[&str]) -> tempfile::NamedTempFile {
    use docx_rs::{Docx, Paragraph, Run};

    let file = tempfile::Builder::new()
        .suffix(".docx")
        .tempfile()
        .expect("create temp docx");
    let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
    });
    docx.build().pack(file.as_file()).expect("write docx fixture");
    file
}
