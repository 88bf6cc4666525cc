use crate::values::{parse_discount_text, parse_price_text};

/// Splits on tabs and runs of two or more spaces.
pub(crate) fn split_line_into_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut whitespace_run = 0_usize;

    let mut flush = |current: &mut String| {
        let cell = current.trim();
        if !cell.is_empty() {
            cells.push(cell.to_string());
        }
        current.clear();
    };

    for ch in trimmed.chars() {
        if ch == '\t' {
            flush(&mut current);
            whitespace_run = 0;
        } else if ch.is_whitespace() {
            whitespace_run += 1;
            if whitespace_run >= 2 {
                flush(&mut current);
            } else {
                current.push(' ');
            }
        } else {
            whitespace_run = 0;
            current.push(ch);
        }
    }
    flush(&mut current);

    cells
}

/// Single-spaced rows that end in an amount: `[first token, middle, last token]`.
pub(crate) fn anchored_split_line_into_cells(line: &str) -> Option<Vec<String>> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    let (first, rest) = tokens.split_first()?;
    let (last, middle) = rest.split_last()?;
    if middle.is_empty() {
        return None;
    }
    if parse_price_text(last).is_none() && parse_discount_text(last).is_none() {
        return None;
    }
    if !last.contains(['$', '%', '.']) {
        return None;
    }

    Some(vec![
        (*first).to_string(),
        middle.join(" "),
        (*last).to_string(),
    ])
}

#[cfg(test)]
mod tests {
    use super::{anchored_split_line_into_cells, split_line_into_cells};

    #[test]
    fn splits_double_space_separated_cells() {
        let cells = split_line_into_cells("750-500  8-Channel Module  $125.00");
        assert_eq!(cells, vec!["750-500", "8-Channel Module", "$125.00"]);
    }

    #[test]
    fn splits_tab_separated_cells() {
        let cells = split_line_into_cells("2002-1201\tTerminal block\t0.52");
        assert_eq!(cells, vec!["2002-1201", "Terminal block", "0.52"]);
    }

    #[test]
    fn blank_line_has_no_cells() {
        assert!(split_line_into_cells("   ").is_empty());
    }

    #[test]
    fn anchors_single_spaced_priced_rows() {
        let cells = anchored_split_line_into_cells("750-500 8-Channel Module $125.00")
            .expect("priced row should split");
        assert_eq!(cells, vec!["750-500", "8-Channel Module", "$125.00"]);
    }

    #[test]
    fn leaves_prose_and_bare_numbers_alone() {
        assert_eq!(
            anchored_split_line_into_cells("Thank you for your business."),
            None
        );
        assert_eq!(anchored_split_line_into_cells("Page 2 of 3"), None);
        assert_eq!(anchored_split_line_into_cells("Total $5.00"), None);
    }
}
