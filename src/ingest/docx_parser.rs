//! Word-processor quotes: one `"body" - author` pair per paragraph.

use super::{check_source, keep_or_skip, FormatParser};
use crate::error::{MemeError, RecordError};
use crate::quote::{split_on_separator, QuoteRecord};
use docx_rust::document::{BodyContent, Paragraph, ParagraphContent, Run, RunContent};
use docx_rust::DocxFile;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct DocxParser;

impl FormatParser for DocxParser {
    fn extension(&self) -> &str {
        "docx"
    }

    fn parse(&self, path: &Path) -> Result<Vec<QuoteRecord>, MemeError> {
        check_source(self, path)?;

        let unreadable = |detail: String| MemeError::SourceUnreadable {
            path: path.to_path_buf(),
            detail,
        };
        let file = DocxFile::from_file(path).map_err(|e| unreadable(e.to_string()))?;
        let docx = file.parse().map_err(|e| unreadable(e.to_string()))?;

        let mut paragraphs = Vec::new();
        for content in &docx.document.body.content {
            collect_paragraphs(content, &mut paragraphs);
        }

        let mut quotes = Vec::new();
        for (idx, text) in paragraphs.iter().enumerate() {
            if text.trim().is_empty() {
                continue;
            }
            keep_or_skip(path, idx + 1, parse_paragraph(text), &mut quotes);
        }
        Ok(quotes)
    }
}

/// Split a paragraph on its first `-` and drop every `"` from the body.
pub(crate) fn parse_paragraph(text: &str) -> Result<QuoteRecord, RecordError> {
    let (body, author) = split_on_separator(text)?;
    QuoteRecord::new(body.replace('"', ""), author)
}

/// Flatten body content into paragraph texts, in document order.
///
/// Content controls (SDT) are unwrapped; tables are not quote sources.
fn collect_paragraphs(content: &BodyContent, out: &mut Vec<String>) {
    match content {
        BodyContent::Paragraph(para) => out.push(paragraph_text(para)),
        BodyContent::Sdt(sdt) => {
            if let Some(ref sdt_content) = sdt.content {
                for item in &sdt_content.content {
                    collect_paragraphs(item, out);
                }
            }
        }
        _ => {}
    }
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    for pc in &para.content {
        match pc {
            ParagraphContent::Run(run) => push_run_text(run, &mut text),
            ParagraphContent::Link(link) => {
                if let Some(ref run) = link.content {
                    push_run_text(run, &mut text);
                }
            }
            _ => {}
        }
    }
    text
}

fn push_run_text(run: &Run, text: &mut String) {
    for rc in &run.content {
        match rc {
            RunContent::Text(t) => text.push_str(&t.text),
            RunContent::Tab(_) | RunContent::Break(_) => text.push(' '),
            _ => {}
        }
    }
}
