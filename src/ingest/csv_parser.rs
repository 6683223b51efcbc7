//! Delimited-text quotes: a header row, then `body,author` rows.

use super::{check_source, keep_or_skip, FormatParser};
use crate::error::{MemeError, RecordError};
use crate::quote::QuoteRecord;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvParser;

impl FormatParser for CsvParser {
    fn extension(&self) -> &str {
        "csv"
    }

    fn parse(&self, path: &Path) -> Result<Vec<QuoteRecord>, MemeError> {
        check_source(self, path)?;

        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| csv_to_source_error(path, e))?;

        parse_reader(path, reader)
    }
}

/// Read every data row; short or undecodable rows are skipped.
fn parse_reader<R: std::io::Read>(
    path: &Path,
    mut reader: csv::Reader<R>,
) -> Result<Vec<QuoteRecord>, MemeError> {
    let mut quotes = Vec::new();

    for (idx, row) in reader.records().enumerate() {
        // Header is line 1; used when the reader cannot report a position.
        let fallback_line = idx + 2;
        let (line, record) = match row {
            Ok(row) => {
                let line = row
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(fallback_line);
                (line, parse_row(&row))
            }
            Err(e) if e.is_io_error() => return Err(csv_to_source_error(path, e)),
            Err(e) => (
                fallback_line,
                Err(RecordError::UndecodableRow {
                    line: fallback_line,
                    detail: e.to_string(),
                }),
            ),
        };
        keep_or_skip(path, line, record, &mut quotes);
    }

    Ok(quotes)
}

/// Column 0 is the body, column 1 the author; extra columns are ignored.
fn parse_row(row: &csv::StringRecord) -> Result<QuoteRecord, RecordError> {
    match (row.get(0), row.get(1)) {
        (Some(body), Some(author)) => QuoteRecord::new(body, author),
        _ => Err(RecordError::MissingColumn {
            line: 0,
            found: row.len(),
        }),
    }
}

fn csv_to_source_error(path: &Path, err: csv::Error) -> MemeError {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => MemeError::from_source_io(path, io),
        other => MemeError::SourceUnreadable {
            path: path.to_path_buf(),
            detail: format!("{:?}", other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(data: &str) -> Vec<QuoteRecord> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(data.as_bytes());
        parse_reader(Path::new("inline.csv"), reader).unwrap()
    }

    #[test]
    fn skips_header_and_keeps_order() {
        let quotes = parse_str("body,author\nChase the mailman,Skittle\nWhen in doubt bark,Mr. Paws\n");
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].body(), "Chase the mailman");
        assert_eq!(quotes[0].author(), "Skittle");
        assert_eq!(quotes[1].author(), "Mr. Paws");
    }

    #[test]
    fn quoted_fields_with_commas() {
        let quotes = parse_str("body,author\n\"Sit, stay, roll over\",\"Rex, Jr.\"\n");
        assert_eq!(quotes[0].body(), "Sit, stay, roll over");
        assert_eq!(quotes[0].author(), "Rex, Jr.");
    }

    #[test]
    fn short_row_is_skipped_not_fatal() {
        let quotes = parse_str("body,author\nlonely column\nGood boy,Rex\n");
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].author(), "Rex");
    }

    #[test]
    fn header_only_file_is_empty_not_error() {
        assert!(parse_str("body,author\n").is_empty());
    }

    #[test]
    fn missing_column_reports_count() {
        let row = csv::StringRecord::from(vec!["only"]);
        assert_eq!(
            parse_row(&row),
            Err(RecordError::MissingColumn { line: 0, found: 1 })
        );
    }
}
