use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("PDF not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Not a PDF file: {}", .0.display())]
    NotPdf(PathBuf),

    #[error(
        "No pricing rows extracted from {}. Check PDF layout or try a different layout.",
        .0.display()
    )]
    NoRows(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to load PDF: {0}")]
    PdfLoad(#[from] lopdf::Error),

    #[error("no extractable text on page {page}")]
    PageText { page: usize },

    #[error("page index {index} is out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },
}

impl QuoteError {
    /// Missing file or wrong extension.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::NotPdf(_))
    }

    /// The document opened fine but produced no usable rows.
    #[must_use]
    pub fn is_empty_extraction(&self) -> bool {
        matches!(self, Self::NoRows(_))
    }
}
