//! Plain-text quotes: one `body - author` pair per line.

use super::{check_source, keep_or_skip, FormatParser};
use crate::error::{MemeError, RecordError};
use crate::quote::{split_on_separator, QuoteRecord};
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct TextParser;

impl FormatParser for TextParser {
    fn extension(&self) -> &str {
        "txt"
    }

    fn parse(&self, path: &Path) -> Result<Vec<QuoteRecord>, MemeError> {
        check_source(self, path)?;
        let text = std::fs::read_to_string(path).map_err(|e| MemeError::from_source_io(path, e))?;
        Ok(parse_lines(path, &text))
    }
}

/// Parse every non-blank line; lines without a `-` are skipped.
pub(crate) fn parse_lines(path: &Path, text: &str) -> Vec<QuoteRecord> {
    let mut quotes = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        keep_or_skip(path, idx + 1, parse_line(line), &mut quotes);
    }
    quotes
}

/// Split one line on its first `-`.
pub(crate) fn parse_line(line: &str) -> Result<QuoteRecord, RecordError> {
    let (body, author) = split_on_separator(line)?;
    QuoteRecord::new(body, author)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_line() {
        let q = parse_line("Chase squirrels - Rex").unwrap();
        assert_eq!(q.body(), "Chase squirrels");
        assert_eq!(q.author(), "Rex");
    }

    #[test]
    fn line_without_separator_is_malformed() {
        assert!(matches!(
            parse_line("Just a thought"),
            Err(RecordError::MissingSeparator { .. })
        ));
    }

    #[test]
    fn extra_hyphens_stay_in_author() {
        let q = parse_line("Fetch - Rex - the elder").unwrap();
        assert_eq!(q.body(), "Fetch");
        assert_eq!(q.author(), "Rex - the elder");
    }

    #[test]
    fn blank_and_malformed_lines_are_skipped() {
        let text = "Chase squirrels - Rex\n\n   \nno separator here\r\nBark loudly - Bella\r\n";
        let quotes = parse_lines(Path::new("q.txt"), text);
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].author(), "Rex");
        assert_eq!(quotes[1].body(), "Bark loudly");
        assert_eq!(quotes[1].author(), "Bella");
    }

    #[test]
    fn empty_author_is_skipped() {
        let quotes = parse_lines(Path::new("q.txt"), "Sit -   \nStay - Fido");
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].body(), "Stay");
    }

    #[test]
    fn rejects_other_extensions() {
        let err = TextParser.parse(Path::new("quotes.csv")).unwrap_err();
        assert!(matches!(err, MemeError::UnsupportedFormat { .. }));
    }
}
