//! # meme-forge
//!
//! Ingest quotes from CSV, TXT, DOCX and PDF files and caption images with
//! them.
//!
//! ## Pipeline Overview
//!
//! ```text
//! quote files ──► QuoteIngestor ──► Vec<QuoteRecord>
//!                  (csv | txt | docx | pdf parser, picked by extension)
//!
//! image + quote
//!  │
//!  ├─ 1. Input    resolve local file or download from URL
//!  ├─ 2. Resize   scale to the target width, keep the aspect ratio
//!  ├─ 3. Layout   wrap at 20 columns, draw position / size / RGBA colour
//!  ├─ 4. Render   rasterise the caption with ab_glyph, alpha-blended
//!  └─ 5. Persist  JPEG under a fresh 5-character name, written atomically
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use meme_forge::{MemeConfig, MemeEngine, QuoteIngestor};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Font from MEME_FONT_PATH (or FONTPATH), output under ./static
//!     let engine = MemeEngine::new(MemeConfig::from_env())?;
//!     let quotes = QuoteIngestor::global().ingest_one("quotes/DogQuotesCSV.csv")?;
//!     let path = engine.compose_quote("photos/dog.jpg", &quotes[0])?;
//!     println!("{}", path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `meme` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! meme-forge = { version = "0.1", default-features = false }
//! ```
//!
//! ## PDF Quotes
//!
//! PDF text comes from the external `pdftotext` tool (poppler-utils), run
//! with `-layout`. Install it, or plug in another [`TextExtractor`] via
//! [`PdfParser::new`].

// ── Modules ──────────────────────────────────────────────────────────────

pub mod compose;
pub mod config;
pub mod error;
pub mod generate;
pub mod ingest;
pub mod naming;
pub mod pipeline;
pub mod quote;
pub mod random;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use compose::MemeEngine;
pub use config::{MemeConfig, MemeConfigBuilder};
pub use error::{MemeError, RecordError};
pub use generate::{generate_meme, GeneratedMeme, MemeRequest, MemeSources};
pub use ingest::{
    CsvParser, DocxParser, FormatParser, PdfParser, PdfToTextCommand, QuoteIngestor,
    TextExtractor, TextParser,
};
pub use naming::{NameSupplier, RandomToken};
pub use quote::QuoteRecord;
pub use random::{FixedRandom, RandomSource, ThreadRandom};
