fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Description cleaner: line breaks and `<br>` become `"; "`, whitespace runs collapse.
pub(crate) fn clean_text(text: &str) -> String {
    let joined = text
        .replace("\r\n", "\n")
        .replace("<br>", "; ")
        .replace('\n', "; ")
        .replace('\r', " ");
    collapse_whitespace(&joined)
}

/// Part number cleaner. Keeps `/` and parentheses so variants such as
/// `221-412/K194-4045` survive; multi-line cells are joined with `line_separator`.
pub(crate) fn clean_part_number(text: &str, line_separator: &str) -> String {
    let joined = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(line_separator);
    collapse_whitespace(&joined)
}
