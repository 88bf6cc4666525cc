use std::path::{Path, PathBuf};

use crate::error::QuoteError;
use crate::model::TableGrid;

/// Source of per-page text and table grids for one quote.
///
/// Page indices are zero-based; `TableGrid::page` is one-based.
pub trait QuoteDocument {
    /// Path reported in errors.
    fn path(&self) -> &Path;

    fn page_count(&self) -> usize;

    fn page_text(&self, index: usize) -> Result<String, QuoteError>;

    fn page_tables(&self, index: usize) -> Result<Vec<TableGrid>, QuoteError>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryPage {
    pub text: Option<String>,
    pub tables: Vec<TableGrid>,
}

/// In-memory document for callers that run their own PDF table extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryDocument {
    path: PathBuf,
    pages: Vec<MemoryPage>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pages: Vec::new(),
        }
    }

    /// Appends a page; table grids get this page's number.
    #[must_use]
    pub fn with_page(mut self, text: impl Into<String>, tables: Vec<Vec<Vec<String>>>) -> Self {
        let page = self.pages.len() + 1;
        let tables = tables
            .into_iter()
            .map(|rows| {
                TableGrid::new(
                    page,
                    rows.into_iter()
                        .map(|row| row.into_iter().map(Into::into).collect())
                        .collect(),
                )
            })
            .collect();
        self.pages.push(MemoryPage {
            text: Some(text.into()),
            tables,
        });
        self
    }

    #[must_use]
    pub fn with_memory_page(mut self, page: MemoryPage) -> Self {
        self.pages.push(page);
        self
    }
}

impl QuoteDocument for MemoryDocument {
    fn path(&self) -> &Path {
        &self.path
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String, QuoteError> {
        let page = self.pages.get(index).ok_or(QuoteError::PageOutOfRange {
            index,
            count: self.pages.len(),
        })?;
        page.text
            .clone()
            .ok_or(QuoteError::PageText { page: index + 1 })
    }

    fn page_tables(&self, index: usize) -> Result<Vec<TableGrid>, QuoteError> {
        self.pages
            .get(index)
            .map(|page| page.tables.clone())
            .ok_or(QuoteError::PageOutOfRange {
                index,
                count: self.pages.len(),
            })
    }
}
