//! Error types for the meme-forge library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`MemeError`] is **fatal**: the operation cannot proceed at all
//!   (missing quote file, undecodable image, unwritable output directory).
//!   Returned as `Err(MemeError)` from ingestion, composition and generation.
//!
//! * [`RecordError`] is **non-fatal**: a single row, line or paragraph of a
//!   quote source is malformed. Parsers log it and skip that record; the rest
//!   of the file is still ingested.
//!
//! An empty quote list is never an error: "the file holds no quotes" and
//! "the file could not be read" are reported differently on purpose.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the meme-forge library.
#[derive(Debug, Error)]
pub enum MemeError {
    // ── Quote source errors ───────────────────────────────────────────────
    /// Quote source file was not found at the given path.
    #[error("Quote source not found: '{path}'\nCheck the path exists and is readable.")]
    SourceNotFound { path: PathBuf },

    /// The quote source exists but could not be read or decoded.
    #[error("Cannot read quote source '{path}': {detail}")]
    SourceUnreadable { path: PathBuf, detail: String },

    /// No registered parser accepts this file's extension.
    #[error("Unsupported quote source format: '{path}' (supported: csv, txt, docx, pdf)")]
    UnsupportedFormat { path: PathBuf },

    // ── Image errors ──────────────────────────────────────────────────────
    /// The source image is missing or is not a decodable raster image.
    #[error("Cannot open image '{path}': {detail}")]
    ImageUnreadable { path: PathBuf, detail: String },

    /// Scaling the image to the target width would exceed the output size
    /// limits (extreme aspect ratio or oversized width).
    #[error(
        "Image {width}x{height} cannot be resized to width {target_width}: \
         result exceeds {max_dimension}px per side or {max_pixels} pixels"
    )]
    ImageTooLarge {
        width: u32,
        height: u32,
        target_width: u32,
        max_dimension: u32,
        max_pixels: u64,
    },

    /// Image URL was syntactically valid but the download failed.
    #[error("Failed to download '{url}': {reason}\nCheck the URL and your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// The configured caption font could not be loaded.
    #[error("Cannot load caption font '{path}': {detail}")]
    FontUnavailable { path: PathBuf, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create the output directory or write the composed image.
    #[error("Failed to write output image '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Request errors ────────────────────────────────────────────────────
    /// A quote body was supplied without its author.
    #[error("An author is required when a quote body is given")]
    AuthorRequired,

    /// A quote body was supplied but holds nothing once quote marks and
    /// whitespace are removed.
    #[error("The quote body is empty")]
    EmptyBody,

    /// A random pick was requested from an empty collection.
    #[error("Nothing to choose from: no {what} found")]
    NothingToChoose { what: &'static str },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed or a required setting is absent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MemeError {
    /// Map an `io::Error` raised while opening a quote source.
    pub(crate) fn from_source_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => MemeError::SourceNotFound { path },
            _ => MemeError::SourceUnreadable {
                path,
                detail: err.to_string(),
            },
        }
    }
}

/// A non-fatal error for a single record of a quote source.
///
/// `line` is the 1-based line, row or paragraph number in the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The line has no `-` separating body and author.
    #[error("line {line}: no '-' separator between quote and author")]
    MissingSeparator { line: usize },

    /// A delimited row has fewer than two columns.
    #[error("row {line}: expected 2 columns (body, author), found {found}")]
    MissingColumn { line: usize, found: usize },

    /// Body or author is empty after trimming.
    #[error("line {line}: {field} is empty")]
    EmptyField { line: usize, field: &'static str },

    /// The row could not be decoded (e.g. invalid UTF-8 or broken quoting).
    #[error("row {line}: {detail}")]
    UndecodableRow { line: usize, detail: String },
}

impl RecordError {
    /// Attach the record position to an error produced without one.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            RecordError::MissingSeparator { .. } => RecordError::MissingSeparator { line },
            RecordError::MissingColumn { found, .. } => RecordError::MissingColumn { line, found },
            RecordError::EmptyField { field, .. } => RecordError::EmptyField { line, field },
            RecordError::UndecodableRow { detail, .. } => {
                RecordError::UndecodableRow { line, detail }
            }
        }
    }
}
