//! Quote ingestion: turn CSV, TXT, DOCX and PDF files into [`QuoteRecord`]s.
//!
//! Each format is a [`FormatParser`] that declares the one extension it
//! handles. [`QuoteIngestor`] holds an ordered list of parsers and hands a
//! path to the first one whose [`FormatParser::can_parse`] says yes, so a new
//! format plugs in with [`QuoteIngestor::register`] and no dispatch change.
//!
//! ## Data Flow
//!
//! ```text
//! path ──▶ QuoteIngestor ──▶ FormatParser ──▶ Vec<QuoteRecord>
//!          (first match)     (csv | txt | docx | pdf)
//! ```
//!
//! Malformed rows/lines/paragraphs are logged and skipped by the parser;
//! file-level failures (missing, unreadable, unsupported) abort the call.

pub mod csv_parser;
pub mod docx_parser;
pub mod pdf_parser;
pub mod text_parser;

pub use csv_parser::CsvParser;
pub use docx_parser::DocxParser;
pub use pdf_parser::{PdfParser, PdfToTextCommand, TextExtractor};
pub use text_parser::TextParser;

use crate::error::{MemeError, RecordError};
use crate::quote::QuoteRecord;
use once_cell::sync::Lazy;
use std::path::Path;
use tracing::{debug, info, warn};

/// A capability that recognises and converts one quote file format.
pub trait FormatParser: Send + Sync {
    /// The extension this parser handles, without the leading dot.
    fn extension(&self) -> &str;

    /// True iff the path's extension is exactly [`FormatParser::extension`].
    fn can_parse(&self, path: &Path) -> bool {
        extension_of(path) == Some(self.extension())
    }

    /// Parse every quote in the file, in file order.
    ///
    /// # Errors
    /// * [`MemeError::UnsupportedFormat`]: `can_parse` is false for `path`
    /// * [`MemeError::SourceNotFound`]: `path` does not exist
    /// * [`MemeError::SourceUnreadable`]: the file cannot be read or decoded
    fn parse(&self, path: &Path) -> Result<Vec<QuoteRecord>, MemeError>;
}

/// The extension of a path: the part of its file name after the first `.`.
///
/// `quotes.csv` → `csv`; `quotes.tar.csv` → `tar.csv`; `README` → `None`.
pub fn extension_of(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.split_once('.').map(|(_, ext)| ext)
}

/// Shared precondition of every parser: right extension, file present.
pub(crate) fn check_source(parser: &dyn FormatParser, path: &Path) -> Result<(), MemeError> {
    if !parser.can_parse(path) {
        return Err(MemeError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }
    if !path.exists() {
        return Err(MemeError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Keep a parsed record or log why it was skipped.
pub(crate) fn keep_or_skip(
    path: &Path,
    line: usize,
    record: Result<QuoteRecord, RecordError>,
    quotes: &mut Vec<QuoteRecord>,
) {
    match record {
        Ok(quote) => quotes.push(quote),
        Err(e) => warn!("Skipping malformed record in {}: {}", path.display(), e.at_line(line)),
    }
}

/// Dispatches quote files to the first matching [`FormatParser`].
pub struct QuoteIngestor {
    parsers: Vec<Box<dyn FormatParser>>,
}

impl QuoteIngestor {
    /// An ingestor with no parsers; add some with [`QuoteIngestor::register`].
    pub fn empty() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// An ingestor over the given parsers, consulted in order.
    pub fn with_parsers(parsers: Vec<Box<dyn FormatParser>>) -> Self {
        Self { parsers }
    }

    /// The process-wide default registry: csv, txt, docx, pdf.
    pub fn global() -> &'static QuoteIngestor {
        static GLOBAL: Lazy<QuoteIngestor> = Lazy::new(QuoteIngestor::default);
        &GLOBAL
    }

    /// Append a parser; it is consulted after all existing ones.
    pub fn register(&mut self, parser: Box<dyn FormatParser>) -> &mut Self {
        self.parsers.push(parser);
        self
    }

    /// Extensions of the registered parsers, in registry order.
    pub fn extensions(&self) -> Vec<&str> {
        self.parsers.iter().map(|p| p.extension()).collect()
    }

    /// Parse one file with the first parser that accepts it.
    pub fn ingest_one(&self, path: impl AsRef<Path>) -> Result<Vec<QuoteRecord>, MemeError> {
        let path = path.as_ref();
        let parser = self
            .parsers
            .iter()
            .find(|p| p.can_parse(path))
            .ok_or_else(|| MemeError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;

        debug!("Parsing {} as {}", path.display(), parser.extension());
        let quotes = parser.parse(path)?;
        info!("Ingested {} quotes from {}", quotes.len(), path.display());
        Ok(quotes)
    }

    /// Parse several files and concatenate their quotes in input order.
    ///
    /// The first failing file aborts the whole call; call
    /// [`QuoteIngestor::ingest_one`] per path to tolerate failures.
    pub fn ingest_many<I, P>(&self, paths: I) -> Result<Vec<QuoteRecord>, MemeError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut all = Vec::new();
        for path in paths {
            all.extend(self.ingest_one(path)?);
        }
        Ok(all)
    }
}

impl Default for QuoteIngestor {
    fn default() -> Self {
        Self::with_parsers(vec![
            Box::new(CsvParser),
            Box::new(TextParser),
            Box::new(DocxParser),
            Box::new(PdfParser::default()),
        ])
    }
}

impl std::fmt::Debug for QuoteIngestor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteIngestor")
            .field("parsers", &self.extensions())
            .finish()
    }
}
