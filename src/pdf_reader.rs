use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use encoding_rs::{UTF_16BE, WINDOWS_1252};
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use tracing::debug;

use crate::document::QuoteDocument;
use crate::error::QuoteError;
use crate::model::TableGrid;
use crate::table_detect::detect_tables_in_text;
use crate::table_parse::split_line_into_cells;
use crate::values::{parse_discount_text, parse_price_text};

fn split_text_into_pages(raw_text: &str) -> Vec<String> {
    let mut pages = raw_text
        .split('\u{000C}')
        .map(str::to_string)
        .collect::<Vec<_>>();
    if pages.last().is_some_and(String::is_empty) {
        pages.pop();
    }
    pages
}

fn looks_decoding_broken(text: &str) -> bool {
    if text.contains("?Identity-H Unimplemented?") {
        return true;
    }

    let total = text.chars().count();
    if total == 0 {
        return false;
    }

    let replacement = text.matches('\u{FFFD}').count();
    let control = text
        .chars()
        .filter(|ch| ch.is_control() && !matches!(ch, '\n' | '\r' | '\t'))
        .count();

    replacement * 8 > total || control * 5 > total
}

fn decode_pdf_bytes(encoding: Option<&str>, bytes: &[u8]) -> String {
    let decoded = Document::decode_text(encoding, bytes);
    if !looks_decoding_broken(&decoded) {
        return decoded;
    }

    if bytes.starts_with(&[0xFE, 0xFF]) {
        let (utf16, had_errors) = UTF_16BE.decode_without_bom_handling(&bytes[2..]);
        if !had_errors && !utf16.is_empty() {
            return utf16.into_owned();
        }
    }

    let unicode_font = encoding.is_some_and(|name| {
        let lower = name.to_ascii_lowercase();
        lower.contains("identity-h") || lower.contains("ucs2") || lower.contains("utf16")
    });
    if unicode_font {
        let (utf16, had_errors) = UTF_16BE.decode_without_bom_handling(bytes);
        if !had_errors && !utf16.is_empty() {
            return utf16.into_owned();
        }
    }

    // Quote templates are Western; WinAnsi covers symbols like the registered mark.
    let (ansi, _, _) = WINDOWS_1252.decode(bytes);
    ansi.into_owned()
}

/// Ranks text candidates: lines that split into cells or carry amounts win.
/// Blank lines cost a point since they split tables apart.
fn extraction_quality_score(text: &str) -> i64 {
    if text.trim().is_empty() {
        return i64::MIN / 4;
    }

    let mut non_empty_lines = 0_i64;
    let mut blank_lines = 0_i64;
    let mut multi_cell_lines = 0_i64;
    let mut amount_lines = 0_i64;

    for line in text.trim().lines().map(str::trim) {
        if line.is_empty() {
            blank_lines += 1;
            continue;
        }
        non_empty_lines += 1;
        if split_line_into_cells(line).len() >= 2 {
            multi_cell_lines += 1;
        }
        let has_amount = line
            .split_whitespace()
            .last()
            .is_some_and(|token| parse_price_text(token).is_some() || parse_discount_text(token).is_some());
        if has_amount {
            amount_lines += 1;
        }
    }

    let broken_penalty = if looks_decoding_broken(text) { 800 } else { 0 };
    multi_cell_lines * 50 + amount_lines * 15 + non_empty_lines - blank_lines - broken_penalty
}

fn collect_operand_text(text: &mut String, encoding: Option<&str>, operands: &[Object]) {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => text.push_str(&decode_pdf_bytes(encoding, bytes)),
            Object::Array(items) => {
                collect_operand_text(text, encoding, items);
                text.push(' ');
            }
            // Large negative kerning in TJ arrays is a visual word gap.
            Object::Integer(value) if *value < -100 => text.push(' '),
            _ => {}
        }
    }
}

/// Walks the page content stream, breaking lines on text positioning operators.
fn extract_text_from_page_content(document: &Document, page_id: ObjectId) -> Option<String> {
    let raw_content = document.get_page_content(page_id).ok()?;
    let content = Content::decode(&raw_content).ok()?;
    let encodings = document
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect::<BTreeMap<Vec<u8>, &str>>();

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_encoding = None;
    for operation in content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                current_encoding = operation
                    .operands
                    .first()
                    .and_then(|operand| operand.as_name().ok())
                    .and_then(|font_name| encodings.get(font_name).copied());
            }
            "Tj" | "TJ" | "'" | "\"" => {
                collect_operand_text(&mut current, current_encoding, &operation.operands);
            }
            "T*" | "Td" | "TD" | "ET" => {
                if !current.trim().is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
            }
            _ => {}
        }
    }
    if !current.trim().is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// A quote PDF loaded with `lopdf`, page text chosen from several extractors.
#[derive(Debug, Clone)]
pub struct PdfQuoteDocument {
    path: PathBuf,
    pages: Vec<Option<String>>,
}

impl PdfQuoteDocument {
    /// Loads and closes the file in one call; all page text is kept in memory.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::PdfLoad`] when `lopdf` cannot parse the file.
    pub fn open(path: &Path) -> Result<Self, QuoteError> {
        let document = Document::load(path)?;
        let extracted = pdf_extract::extract_text(path)
            .map_err(|error| debug!(%error, "pdf-extract failed; using content streams only"))
            .ok();
        Ok(Self::from_document(path, &document, extracted.as_deref()))
    }

    /// # Errors
    ///
    /// Returns [`QuoteError::PdfLoad`] when `lopdf` cannot parse the bytes.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: &[u8]) -> Result<Self, QuoteError> {
        let path = path.into();
        let document = Document::load_mem(bytes)?;
        let extracted = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|error| debug!(%error, "pdf-extract failed; using content streams only"))
            .ok();
        Ok(Self::from_document(&path, &document, extracted.as_deref()))
    }

    fn from_document(path: &Path, document: &Document, extracted: Option<&str>) -> Self {
        let pages_map = document.get_pages();
        let extracted_pages = extracted
            .map(split_text_into_pages)
            .filter(|pages| pages.len() == pages_map.len());

        let pages = pages_map
            .iter()
            .enumerate()
            .map(|(index, (page_no, page_id))| {
                let mut candidates = Vec::new();
                if let Some(text) = extracted_pages
                    .as_ref()
                    .and_then(|pages| pages.get(index))
                    .filter(|text| !text.trim().is_empty())
                {
                    candidates.push(text.clone());
                }
                if let Some(text) = extract_text_from_page_content(document, *page_id) {
                    candidates.push(text);
                }
                if let Some(text) = document
                    .extract_text(&[*page_no])
                    .ok()
                    .filter(|text| !text.trim().is_empty())
                {
                    candidates.push(text);
                }

                candidates
                    .into_iter()
                    .max_by_key(|text| extraction_quality_score(text))
            })
            .collect::<Vec<_>>();

        debug!(
            path = %path.display(),
            pages = pages.len(),
            readable = pages.iter().filter(|page| page.is_some()).count(),
            "loaded quote PDF"
        );

        Self {
            path: path.to_path_buf(),
            pages,
        }
    }
}

impl QuoteDocument for PdfQuoteDocument {
    fn path(&self) -> &Path {
        &self.path
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String, QuoteError> {
        match self.pages.get(index) {
            Some(Some(text)) => Ok(text.clone()),
            Some(None) => Err(QuoteError::PageText { page: index + 1 }),
            None => Err(QuoteError::PageOutOfRange {
                index,
                count: self.pages.len(),
            }),
        }
    }

    fn page_tables(&self, index: usize) -> Result<Vec<TableGrid>, QuoteError> {
        let text = self.page_text(index)?;
        Ok(detect_tables_in_text(index + 1, &text))
    }
}
