mod classify;
mod columns;
mod csv_out;
mod document;
mod error;
mod header;
mod metadata;
mod model;
mod normalize;
mod options;
mod pdf_reader;
mod table_detect;
mod table_parse;
mod values;
mod warning;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::classify::{classify_row, rules_for};
use crate::columns::infer_roles;
use crate::csv_out::{write_csv, write_csv_to_string};
use crate::header::{is_header_row, mentions_part};
use crate::metadata::extract_metadata;

pub use columns::{ColumnRoles, Role, RoleSource};
pub use document::{MemoryDocument, MemoryPage, QuoteDocument};
pub use error::QuoteError;
pub use metadata::{parse_metadata, parse_quote_number};
pub use model::{
    Cell, OUTPUT_HEADERS, ParseReport, ParsedQuote, QuoteMetadata, QuoteRecord, RecordKind,
    TableGrid,
};
pub use options::{Layout, ParseOptions};
pub use pdf_reader::PdfQuoteDocument;
pub use values::{format_currency, parse_discount_text, parse_price_text};
pub use warning::{ExtractWarning, WarningCode};

fn validate_input(path: &Path) -> Result<(), QuoteError> {
    if !path.exists() {
        return Err(QuoteError::NotFound(path.to_path_buf()));
    }
    let is_pdf = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        return Err(QuoteError::NotPdf(path.to_path_buf()));
    }
    Ok(())
}

/// Zero-based pages scanned before any fallback.
fn initial_pages(page_count: usize, options: &ParseOptions) -> Vec<usize> {
    match (options.layout, page_count) {
        (_, 0) => Vec::new(),
        (Layout::Fixed, count) => (0..count).collect(),
        (Layout::Adaptive, 1) => vec![0],
        (Layout::Adaptive, count) => {
            let mut pages = (1..options.leading_pages.min(count)).collect::<Vec<_>>();
            if !pages.contains(&(count - 1)) {
                pages.push(count - 1);
            }
            pages
        }
    }
}

fn collect_tables(
    document: &dyn QuoteDocument,
    pages: &[usize],
    layout: Layout,
    warnings: &mut Vec<ExtractWarning>,
) -> Vec<TableGrid> {
    let mut tables = Vec::new();
    for &index in pages {
        let page_tables = match document.page_tables(index) {
            Ok(page_tables) => page_tables,
            Err(error) => {
                debug!(page = index + 1, %error, "page tables unavailable");
                warnings.push(
                    ExtractWarning::new(WarningCode::PageTablesUnavailable, error.to_string())
                        .with_page(index + 1),
                );
                continue;
            }
        };

        match layout {
            Layout::Adaptive => tables.extend(page_tables),
            // First of equally large tables wins.
            Layout::Fixed => {
                let mut largest: Option<TableGrid> = None;
                for table in page_tables {
                    if largest
                        .as_ref()
                        .is_none_or(|best| table.cell_count() > best.cell_count())
                    {
                        largest = Some(table);
                    }
                }
                tables.extend(largest);
            }
        }
    }
    tables
}

fn is_skipped_heading(row: &[Cell], row_index: usize, layout: Layout) -> bool {
    match layout {
        Layout::Adaptive => is_header_row(row),
        Layout::Fixed => row_index == 0 && mentions_part(row),
    }
}

/// Parses an already opened quote document.
///
/// # Errors
///
/// Returns [`QuoteError::NoRows`] when no table row yields a record. Page
/// level failures are recorded as warnings in the report instead.
pub fn parse_quote_document(
    document: &dyn QuoteDocument,
    options: &ParseOptions,
) -> Result<ParsedQuote, QuoteError> {
    let mut report = ParseReport::default();
    let metadata = extract_metadata(document, options.layout, &mut report.warnings);

    let page_count = document.page_count();
    let mut pages = initial_pages(page_count, options);
    let mut tables = collect_tables(document, &pages, options.layout, &mut report.warnings);
    if tables.is_empty() && pages.len() < page_count {
        warn!(
            path = %document.path().display(),
            scanned = pages.len(),
            page_count,
            "no tables in the usual quote pages; scanning every page"
        );
        report.warnings.push(ExtractWarning::new(
            WarningCode::AllPagesFallback,
            format!("no tables on {} scanned page(s); rescanned all {page_count}", pages.len()),
        ));
        report.all_pages_fallback = true;
        pages = (0..page_count).collect();
        tables = collect_tables(document, &pages, options.layout, &mut report.warnings);
    }
    report.pages_scanned = pages.iter().map(|index| index + 1).collect();
    report.table_count = tables.len();

    let rules = rules_for(options);
    let part_separator = options.layout.part_line_separator();
    let fixed_roles = ColumnRoles::fixed();
    let mut records = Vec::new();

    for (table_id, table) in tables.iter().enumerate() {
        if table.rows.len() < 2 {
            report.tables_skipped += 1;
            report.warnings.push(
                ExtractWarning::new(WarningCode::TableTooSmall, "table has fewer than 2 rows")
                    .with_page(table.page)
                    .with_table_id(table_id),
            );
            continue;
        }

        let roles = match options.layout {
            Layout::Adaptive => infer_roles(table),
            Layout::Fixed => fixed_roles,
        };
        debug!(
            page = table.page,
            table_id,
            rows = table.rows.len(),
            ?roles,
            "classifying table"
        );

        for (row_index, row) in table.rows.iter().enumerate() {
            if row.iter().all(Cell::is_blank) || is_skipped_heading(row, row_index, options.layout)
            {
                continue;
            }
            match classify_row(row, &roles, &rules, part_separator) {
                Some(record) => records.push(record),
                None => {
                    report.rows_dropped += 1;
                    debug!(page = table.page, table_id, row_index, "row matched no rule");
                }
            }
        }
    }

    if records.is_empty() {
        return Err(QuoteError::NoRows(document.path().to_path_buf()));
    }

    info!(
        path = %document.path().display(),
        layout = options.layout.as_str(),
        records = records.len(),
        tables = report.table_count,
        dropped = report.rows_dropped,
        "parsed quote"
    );

    Ok(ParsedQuote {
        records,
        metadata,
        report,
    })
}

/// Validates the path, loads the PDF and parses it.
///
/// # Errors
///
/// Returns [`QuoteError::NotFound`] or [`QuoteError::NotPdf`] for bad input,
/// [`QuoteError::PdfLoad`] when the file is not a readable PDF, and
/// [`QuoteError::NoRows`] when nothing could be extracted.
pub fn parse_quote_pdf(path: &Path, options: &ParseOptions) -> Result<ParsedQuote, QuoteError> {
    validate_input(path)?;
    let document = PdfQuoteDocument::open(path)?;
    parse_quote_document(&document, options)
}

/// `quote_<number>_parsed.csv`, with `unknown` when no quote number was found.
#[must_use]
pub fn output_file_name(metadata: &QuoteMetadata) -> String {
    let number = metadata
        .quote_number
        .as_deref()
        .map(str::trim)
        .filter(|number| !number.is_empty())
        .unwrap_or("unknown")
        .replace('/', "-")
        .replace(' ', "_");
    format!("quote_{number}_parsed.csv")
}

/// Writes the records to `<output_dir>/quote_<number>_parsed.csv`.
///
/// # Errors
///
/// Returns [`QuoteError::NoRows`] for an empty record list, so an empty CSV
/// is never written, and I/O or CSV errors from the writer.
pub fn export_quote_csv(parsed: &ParsedQuote, output_dir: &Path) -> Result<PathBuf, QuoteError> {
    if parsed.records.is_empty() {
        return Err(QuoteError::NoRows(output_dir.to_path_buf()));
    }
    let path = output_dir.join(output_file_name(&parsed.metadata));
    write_csv(&path, &parsed.records)?;
    debug!(path = %path.display(), rows = parsed.records.len(), "wrote quote csv");
    Ok(path)
}

/// # Errors
///
/// Returns an error when the CSV writer fails.
pub fn quote_csv_string(records: &[QuoteRecord]) -> Result<String, QuoteError> {
    write_csv_to_string(records)
}
