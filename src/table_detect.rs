use crate::model::{Cell, TableGrid};
use crate::table_parse::{anchored_split_line_into_cells, split_line_into_cells};

enum LineShape {
    Cells(Vec<String>),
    Text(String),
    Blank,
}

fn classify_line(line: &str) -> LineShape {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineShape::Blank;
    }

    let cells = split_line_into_cells(trimmed);
    if cells.len() >= 2 {
        return LineShape::Cells(cells);
    }
    match anchored_split_line_into_cells(trimmed) {
        Some(cells) => LineShape::Cells(cells),
        None => LineShape::Text(trimmed.to_string()),
    }
}

fn flush_table(page: usize, rows: &mut Vec<Vec<String>>, tables: &mut Vec<TableGrid>) {
    while rows.last().is_some_and(|row| row.len() < 2) {
        rows.pop();
    }
    if rows.len() >= 2 {
        let rows = std::mem::take(rows)
            .into_iter()
            .map(|row| row.into_iter().map(Cell::Text).collect())
            .collect();
        tables.push(TableGrid::new(page, rows));
    } else {
        rows.clear();
    }
}

/// Groups consecutive multi-cell lines of one page into table grids.
///
/// Single-cell lines inside a table are kept as continuation rows; blank
/// lines end the table.
pub(crate) fn detect_tables_in_text(page: usize, text: &str) -> Vec<TableGrid> {
    let mut tables = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();

    for line in text.lines() {
        match classify_line(line) {
            LineShape::Cells(cells) => rows.push(cells),
            LineShape::Text(text) if !rows.is_empty() => rows.push(vec![text]),
            LineShape::Text(_) => {}
            LineShape::Blank => flush_table(page, &mut rows, &mut tables),
        }
    }
    flush_table(page, &mut rows, &mut tables);

    tables
}
