use serde::Serialize;

use crate::warning::ExtractWarning;

pub const OUTPUT_HEADERS: [&str; 5] = ["Part Number", "Series", "Description", "Price", "Discount"];

/// One grid cell as reported by a table extractor.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    /// Text rendering used by the normalizers; `Empty` renders as "".
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                format!("{value:.0}")
            }
            Self::Number(value) => value.to_string(),
            Self::Empty => String::new(),
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(value) => value.trim().is_empty(),
            Self::Number(value) => value.is_nan(),
            Self::Empty => true,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// A page-scoped grid of cells; rows may have irregular lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct TableGrid {
    pub page: usize,
    pub rows: Vec<Vec<Cell>>,
}

impl TableGrid {
    #[must_use]
    pub fn new(page: usize, rows: Vec<Vec<Cell>>) -> Self {
        Self { page, rows }
    }

    #[must_use]
    pub fn from_text_rows(page: usize, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|&cell| Cell::from(cell)).collect())
            .collect();
        Self { page, rows }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Product,
    SeriesDiscount,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuoteRecord {
    #[serde(rename = "Part Number")]
    pub part_number: String,
    #[serde(rename = "Series")]
    pub series: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Discount")]
    pub discount: String,
}

impl QuoteRecord {
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        if self.price.is_empty() && !self.discount.is_empty() {
            RecordKind::SeriesDiscount
        } else {
            RecordKind::Product
        }
    }

    #[must_use]
    pub fn as_row(&self) -> [&str; 5] {
        [
            &self.part_number,
            &self.series,
            &self.description,
            &self.price,
            &self.discount,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuoteMetadata {
    pub quote_number: Option<String>,
    pub date: Option<String>,
    pub expiration_date: Option<String>,
    pub customer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub pages_scanned: Vec<usize>,
    pub table_count: usize,
    pub tables_skipped: usize,
    pub rows_dropped: usize,
    pub all_pages_fallback: bool,
    pub warnings: Vec<ExtractWarning>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuote {
    pub records: Vec<QuoteRecord>,
    pub metadata: QuoteMetadata,
    pub report: ParseReport,
}

impl ParsedQuote {
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.records.len()
    }
}
