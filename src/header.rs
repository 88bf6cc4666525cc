use crate::columns::{ColumnRoles, Role, RoleSource};
use crate::model::Cell;

type HeaderRule = fn(cell: &str, row: &str) -> bool;

fn is_part_heading(cell: &str, _row: &str) -> bool {
    cell.contains("part")
        && (cell.contains("number") || cell.contains("no") || cell.contains("nr") || cell.contains('#'))
}

fn is_series_heading(cell: &str, _row: &str) -> bool {
    cell.contains("series")
}

fn is_description_heading(cell: &str, _row: &str) -> bool {
    cell.contains("desc") || cell.contains("product")
}

fn is_price_heading(cell: &str, row: &str) -> bool {
    cell.contains("price") || (cell.contains("unit") && row.contains("price"))
}

fn is_discount_heading(cell: &str, _row: &str) -> bool {
    cell.contains("disc")
}

/// Header keyword rules in priority order. A cell takes the first role whose
/// rule matches and which no earlier cell has claimed.
const HEADER_RULES: [(Role, HeaderRule); 5] = [
    (Role::Part, is_part_heading),
    (Role::Series, is_series_heading),
    (Role::Description, is_description_heading),
    (Role::Price, is_price_heading),
    (Role::Discount, is_discount_heading),
];

fn lowered_cells(row: &[Cell]) -> Vec<String> {
    row.iter()
        .map(|cell| cell.text().trim().to_lowercase())
        .collect()
}

/// Column heading row: mentions "part" and either "price" or "description".
pub(crate) fn is_header_row(row: &[Cell]) -> bool {
    let combined = lowered_cells(row).join(" ");
    combined.contains("part") && (combined.contains("price") || combined.contains("description"))
}

/// Fixed-layout heading check, applied to the first row of a table only.
pub(crate) fn mentions_part(row: &[Cell]) -> bool {
    lowered_cells(row).iter().any(|cell| cell.contains("part"))
}

pub(crate) fn roles_from_header(row: &[Cell]) -> ColumnRoles {
    let cells = lowered_cells(row);
    let combined = cells.join(" ");
    let mut roles = ColumnRoles::empty(RoleSource::Header);

    for (index, cell) in cells.iter().enumerate() {
        if cell.is_empty() {
            continue;
        }
        if let Some((role, _)) = HEADER_RULES
            .iter()
            .find(|(role, rule)| roles.get(*role).is_none() && rule(cell, &combined))
        {
            roles.set(*role, index);
        }
    }

    roles
}
