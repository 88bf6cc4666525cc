use crate::columns::{ColumnRoles, MIN_ROW_WIDTH};
use crate::model::{Cell, QuoteRecord};
use crate::normalize::{clean_part_number, clean_text};
use crate::options::{Layout, ParseOptions};
use crate::values::{find_embedded_discount, parse_discount, parse_price, series_digits};

static EMPTY_CELL: Cell = Cell::Empty;

/// Row classification rules, evaluated in order; the first rule that yields
/// a record wins and rows no rule accepts are dropped.
///
/// The adaptive layout checks description discounts last, so a priced row
/// always stays a product there. The fixed layout checks them first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowRule {
    /// "<nnn> Series ... Discount <pct>%" written inside the description cell.
    EmbeddedSeriesDiscount,
    /// Percentage in the discount column and no price in the price column.
    ColumnSeriesDiscount,
    /// Parseable price in the price column.
    PricedProduct,
}

pub(crate) fn rules_for(options: &ParseOptions) -> Vec<RowRule> {
    let mut rules = vec![RowRule::ColumnSeriesDiscount, RowRule::PricedProduct];
    if options.embedded_series_discounts {
        match options.layout {
            Layout::Adaptive => rules.push(RowRule::EmbeddedSeriesDiscount),
            Layout::Fixed => rules.insert(0, RowRule::EmbeddedSeriesDiscount),
        }
    }
    rules
}

/// Table row view with roles resolved against a padded copy of the row.
pub(crate) struct RowView<'a> {
    cells: Vec<Cell>,
    roles: &'a ColumnRoles,
    part_separator: &'a str,
}

impl<'a> RowView<'a> {
    pub(crate) fn new(row: &[Cell], roles: &'a ColumnRoles, part_separator: &'a str) -> Self {
        let mut cells = row.to_vec();
        if cells.len() < MIN_ROW_WIDTH {
            cells.resize(MIN_ROW_WIDTH, Cell::Empty);
        }
        Self {
            cells,
            roles,
            part_separator,
        }
    }

    fn cell(&self, index: Option<usize>) -> &Cell {
        index
            .and_then(|index| self.cells.get(index))
            .unwrap_or(&EMPTY_CELL)
    }

    fn raw_text(&self, index: Option<usize>) -> String {
        self.cell(index).text().trim().to_string()
    }

    fn part_number(&self) -> String {
        clean_part_number(&self.raw_text(self.roles.part), self.part_separator)
    }

    fn description(&self) -> String {
        clean_text(&self.raw_text(self.roles.description))
    }

    fn series(&self) -> Option<String> {
        series_digits(&self.raw_text(self.roles.series))
    }

    fn price(&self) -> Option<String> {
        parse_price(self.cell(self.roles.price))
    }

    fn discount(&self) -> Option<String> {
        self.roles
            .discount
            .and_then(|index| parse_discount(self.cell(Some(index))))
    }
}

impl RowRule {
    pub(crate) fn apply(self, row: &RowView<'_>) -> Option<QuoteRecord> {
        match self {
            Self::EmbeddedSeriesDiscount => embedded_series_discount(row),
            Self::ColumnSeriesDiscount => column_series_discount(row),
            Self::PricedProduct => priced_product(row),
        }
    }
}

fn embedded_series_discount(row: &RowView<'_>) -> Option<QuoteRecord> {
    let raw = row.raw_text(row.roles.description);
    let found = find_embedded_discount(&raw)?;

    let before_discount = raw
        .to_ascii_lowercase()
        .find("discount")
        .map_or(raw.as_str(), |index| &raw[..index]);
    let description = clean_text(&before_discount.replacen(&found.label, "", 1));

    Some(QuoteRecord {
        part_number: String::new(),
        series: found.series,
        description,
        price: String::new(),
        discount: found.percent,
    })
}

fn column_series_discount(row: &RowView<'_>) -> Option<QuoteRecord> {
    let discount = row.discount()?;
    if row.price().is_some() {
        return None;
    }

    let part = row.raw_text(row.roles.part);
    let description = row.description();
    let series = row
        .series()
        .or_else(|| series_digits(&part))
        .or_else(|| series_digits(&description))
        .unwrap_or_default();

    Some(QuoteRecord {
        part_number: String::new(),
        series,
        description,
        price: String::new(),
        discount,
    })
}

fn priced_product(row: &RowView<'_>) -> Option<QuoteRecord> {
    let price = row.price()?;

    // Series and discount belong to series-discount records only.
    Some(QuoteRecord {
        part_number: row.part_number(),
        series: String::new(),
        description: row.description(),
        price,
        discount: String::new(),
    })
}

pub(crate) fn classify_row(
    row: &[Cell],
    roles: &ColumnRoles,
    rules: &[RowRule],
    part_separator: &str,
) -> Option<QuoteRecord> {
    let view = RowView::new(row, roles, part_separator);
    rules.iter().find_map(|rule| rule.apply(&view))
}
