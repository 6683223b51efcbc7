//! The normalised quote record every parser produces.

use crate::error::RecordError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// A quote body and its author.
///
/// Both fields are trimmed, non-empty, and free of invisible characters;
/// the body carries no surrounding quotation marks. Only [`QuoteRecord::new`]
/// builds one, so a record in hand always satisfies these rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QuoteRecord {
    body: String,
    author: String,
}

impl QuoteRecord {
    /// Normalise and validate a body/author pair.
    ///
    /// Returns [`RecordError::EmptyField`] (with line 0; parsers attach the
    /// real position) when either field is empty after normalisation.
    pub fn new(body: impl AsRef<str>, author: impl AsRef<str>) -> Result<Self, RecordError> {
        let body = strip_surrounding_quotes(&normalise_field(body.as_ref()));
        let author = normalise_field(author.as_ref());

        if body.is_empty() {
            return Err(RecordError::EmptyField {
                line: 0,
                field: "body",
            });
        }
        if author.is_empty() {
            return Err(RecordError::EmptyField {
                line: 0,
                field: "author",
            });
        }

        Ok(Self { body, author })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// The caption text drawn onto an image: `{body} - {author}`.
    pub fn caption(&self) -> String {
        caption(&self.body, &self.author)
    }
}

impl fmt::Display for QuoteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" - {}", self.body, self.author)
    }
}

/// Caption text for an arbitrary body/author pair.
pub fn caption(body: &str, author: &str) -> String {
    format!("{} - {}", body, author)
}

/// Split `text` on the first `-` into trimmed (body, author) halves.
///
/// Everything after the first `-`, further hyphens included, is the author.
pub(crate) fn split_on_separator(text: &str) -> Result<(&str, &str), RecordError> {
    text.split_once('-')
        .map(|(body, author)| (body.trim(), author.trim()))
        .ok_or(RecordError::MissingSeparator { line: 0 })
}

// ── Field normalisation ──────────────────────────────────────────────────────

static RE_WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Remove invisible code points, collapse whitespace runs, trim.
///
/// Layout-preserving PDF extraction pads words with long space runs, and
/// word processors leave zero-width joiners and BOMs behind.
fn normalise_field(input: &str) -> String {
    let visible = input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    );
    RE_WHITESPACE_RUN
        .replace_all(visible.trim(), " ")
        .into_owned()
}

const QUOTE_MARKS: &[char] = &['"', '\u{201C}', '\u{201D}', '\u{201E}', '\u{00AB}', '\u{00BB}'];

fn strip_surrounding_quotes(input: &str) -> String {
    input.trim_matches(QUOTE_MARKS).trim().to_string()
}
