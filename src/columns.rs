use crate::header::{is_header_row, roles_from_header};
use crate::model::TableGrid;
use crate::values::{has_currency, is_percentage, parse_price};

/// Rows are padded to at least this many cells before classification.
pub(crate) const MIN_ROW_WIDTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Part,
    Series,
    Description,
    Price,
    Discount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSource {
    Header,
    Content,
    Fixed,
}

/// Zero-based column index per semantic role for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRoles {
    pub part: Option<usize>,
    pub series: Option<usize>,
    pub description: Option<usize>,
    pub price: Option<usize>,
    pub discount: Option<usize>,
    pub source: RoleSource,
}

impl ColumnRoles {
    #[must_use]
    pub fn empty(source: RoleSource) -> Self {
        Self {
            part: None,
            series: None,
            description: None,
            price: None,
            discount: None,
            source,
        }
    }

    /// INIT-style quotes: part, description, price.
    #[must_use]
    pub fn fixed() -> Self {
        Self {
            part: Some(0),
            description: Some(1),
            price: Some(2),
            ..Self::empty(RoleSource::Fixed)
        }
    }

    #[must_use]
    pub fn get(&self, role: Role) -> Option<usize> {
        match role {
            Role::Part => self.part,
            Role::Series => self.series,
            Role::Description => self.description,
            Role::Price => self.price,
            Role::Discount => self.discount,
        }
    }

    pub fn set(&mut self, role: Role, index: usize) {
        let slot = match role {
            Role::Part => &mut self.part,
            Role::Series => &mut self.series,
            Role::Description => &mut self.description,
            Role::Price => &mut self.price,
            Role::Discount => &mut self.discount,
        };
        *slot = Some(index);
    }

    #[must_use]
    pub fn claims(&self, index: usize) -> bool {
        [
            self.part,
            self.series,
            self.description,
            self.price,
            self.discount,
        ]
        .contains(&Some(index))
    }

    /// Missing-role policy: price second-to-last, discount last, part first.
    fn fill_defaults(&mut self, width: usize) {
        let width = width.max(MIN_ROW_WIDTH);
        if self.price.is_none() {
            self.price = Some(width - 2);
        }
        if self.discount.is_none() && !self.claims(width - 1) {
            self.discount = Some(width - 1);
        }
        if self.part.is_none() && !self.claims(0) {
            self.part = Some(0);
        }
    }
}

/// Column with the strictly highest non-zero count, if any.
fn unique_best(counts: &[usize]) -> Option<usize> {
    let best = *counts.iter().max()?;
    if best == 0 {
        return None;
    }
    let mut leaders = counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count == best);
    let (index, _) = leaders.next()?;
    if leaders.next().is_some() {
        return None;
    }
    Some(index)
}

pub(crate) fn roles_from_content(table: &TableGrid) -> ColumnRoles {
    let raw_width = table.width();
    let width = raw_width.max(MIN_ROW_WIDTH);

    let mut currency_counts = vec![0_usize; raw_width];
    let mut numeric_counts = vec![0_usize; raw_width];
    let mut discount_counts = vec![0_usize; raw_width];
    for row in &table.rows {
        for (index, cell) in row.iter().enumerate() {
            if has_currency(cell) {
                currency_counts[index] += 1;
            } else if parse_price(cell).is_some() {
                numeric_counts[index] += 1;
            }
            if is_percentage(cell) {
                discount_counts[index] += 1;
            }
        }
    }

    let mut roles = ColumnRoles::empty(RoleSource::Content);
    // Bare numbers only decide the price column when nothing carries a "$".
    let price = if currency_counts.iter().any(|count| *count > 0) {
        unique_best(&currency_counts)
    } else {
        unique_best(&numeric_counts)
    };
    roles.price = Some(price.unwrap_or(width - 2));
    let discount = unique_best(&discount_counts).unwrap_or(width - 1);
    if !roles.claims(discount) {
        roles.discount = Some(discount);
    }

    let text_columns = (0..raw_width)
        .filter(|index| !roles.claims(*index))
        .collect::<Vec<_>>();
    match text_columns.as_slice() {
        [] => {}
        [part] => roles.part = Some(*part),
        [part, description] => {
            roles.part = Some(*part);
            roles.description = Some(*description);
        }
        [part, series, description, ..] => {
            roles.part = Some(*part);
            roles.series = Some(*series);
            roles.description = Some(*description);
        }
    }

    roles
}

/// Role mapping for one table: header-driven when a heading row exists,
/// content-driven otherwise.
pub(crate) fn infer_roles(table: &TableGrid) -> ColumnRoles {
    let mut roles = match table.rows.iter().find(|row| is_header_row(row)) {
        Some(header) => roles_from_header(header),
        None => roles_from_content(table),
    };
    roles.fill_defaults(table.width());
    roles
}
