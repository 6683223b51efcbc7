//! PDF quotes: extract text, then read `body - author` lines.
//!
//! ## Why an injected extractor?
//!
//! Text extraction is delegated to poppler's `pdftotext -layout`, an external
//! program. [`TextExtractor`] keeps that process behind a trait so the line
//! rules here can be tested without poppler installed, and so callers can
//! swap in another backend.
//!
//! ## Intermediate file
//!
//! `pdftotext` writes to a file, not stdout. Each extraction gets its own
//! [`tempfile::NamedTempFile`]; concurrent extractions never share a path,
//! and the file is deleted when the handle drops: on success, on a failed
//! extraction, on a failed read, and during unwinding.

use super::{check_source, keep_or_skip, text_parser, FormatParser};
use crate::error::MemeError;
use crate::quote::QuoteRecord;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use tracing::debug;

/// Converts a PDF file to plain text.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, pdf: &Path) -> Result<String, MemeError>;
}

/// Production extractor: runs `pdftotext -layout <pdf> <intermediate>`.
#[derive(Debug, Clone)]
pub struct PdfToTextCommand {
    program: OsString,
    scratch_dir: Option<PathBuf>,
}

impl Default for PdfToTextCommand {
    fn default() -> Self {
        Self {
            program: OsString::from("pdftotext"),
            scratch_dir: None,
        }
    }
}

impl PdfToTextCommand {
    /// Use a different executable (same `-layout <in> <out>` arguments).
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Place intermediate text files in `dir` instead of the system temp dir.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    fn intermediate_file(&self) -> std::io::Result<tempfile::NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("meme-pdftotext-").suffix(".txt");
        match self.scratch_dir {
            Some(ref dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
    }
}

impl TextExtractor for PdfToTextCommand {
    fn extract_text(&self, pdf: &Path) -> Result<String, MemeError> {
        let unreadable = |detail: String| MemeError::SourceUnreadable {
            path: pdf.to_path_buf(),
            detail,
        };
        let program = self.program.to_string_lossy();

        let intermediate = self
            .intermediate_file()
            .map_err(|e| MemeError::Internal(format!("tempfile: {e}")))?;

        debug!(
            "Running {} on {} → {}",
            program,
            pdf.display(),
            intermediate.path().display()
        );

        let output = Command::new(&self.program)
            .arg("-layout")
            .arg(pdf)
            .arg(intermediate.path())
            .output()
            .map_err(|e| unreadable(format!("failed to run {program}: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(unreadable(format!(
                "{program} exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        std::fs::read_to_string(intermediate.path())
            .map_err(|e| unreadable(format!("reading extracted text: {e}")))
    }
}

/// Parses PDFs through a [`TextExtractor`].
#[derive(Clone)]
pub struct PdfParser {
    extractor: Arc<dyn TextExtractor>,
}

impl PdfParser {
    pub fn new(extractor: impl TextExtractor + 'static) -> Self {
        Self {
            extractor: Arc::new(extractor),
        }
    }
}

impl Default for PdfParser {
    fn default() -> Self {
        Self::new(PdfToTextCommand::default())
    }
}

impl std::fmt::Debug for PdfParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfParser")
            .field("extractor", &"<dyn TextExtractor>")
            .finish()
    }
}

impl FormatParser for PdfParser {
    fn extension(&self) -> &str {
        "pdf"
    }

    fn parse(&self, path: &Path) -> Result<Vec<QuoteRecord>, MemeError> {
        check_source(self, path)?;
        let text = self.extractor.extract_text(path)?;
        Ok(parse_extracted(path, &text))
    }
}

/// Keep only lines carrying a `-`; everything else is page furniture.
fn parse_extracted(path: &Path, text: &str) -> Vec<QuoteRecord> {
    let mut quotes = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if !line.contains('-') {
            continue;
        }
        keep_or_skip(path, idx + 1, text_parser::parse_line(line), &mut quotes);
    }
    quotes
}
