use std::sync::LazyLock;

use regex::Regex;

use crate::model::Cell;

static CURRENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\s*([\d,]+(?:\.\d+)?)").expect("hardcoded currency regex is valid")
});

static PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("hardcoded percent regex is valid")
});

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("hardcoded number regex is valid"));

static EMBEDDED_DISCOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(?P<label>\b(?P<series>\d{3})\s*series).*?(?P<pct>[\d.]+)%")
        .expect("hardcoded series discount regex is valid")
});

/// A "<nnn> Series ... <pct>%" statement found inside free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EmbeddedDiscount {
    pub series: String,
    pub percent: String,
    /// The matched "<nnn> Series" label, as written.
    pub label: String,
}

fn parse_plain_number(text: &str) -> Option<f64> {
    let cleaned = text.replace([',', '$'], "");
    let cleaned = cleaned.trim();
    if !cleaned.chars().any(|ch| ch.is_ascii_digit()) {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Formats `value` as `$1,234.50`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed.chars().any(|ch| ch != '0' && ch != '.') {
        "-"
    } else {
        ""
    };
    format!("${sign}{grouped}.{fraction}")
}

/// Normalized price of a cell, or `None` when the cell carries no price.
pub(crate) fn parse_price(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Number(value) if value.is_finite() => Some(format_currency(*value)),
        Cell::Number(_) | Cell::Empty => None,
        Cell::Text(text) => parse_price_text(text),
    }
}

#[must_use]
pub fn parse_price_text(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(amount) = CURRENCY_RE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|amount| parse_plain_number(amount.as_str()))
    {
        return Some(format_currency(amount));
    }

    parse_plain_number(text).map(format_currency)
}

/// Normalized discount of a cell (`"12.5 %"` becomes `"12.5%"`).
pub(crate) fn parse_discount(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Number(value) if value.is_finite() => Some(format!("{}%", cell.text())),
        Cell::Number(_) | Cell::Empty => None,
        Cell::Text(text) => parse_discount_text(text),
    }
}

#[must_use]
pub fn parse_discount_text(text: &str) -> Option<String> {
    let text = text.trim();
    if let Some(captures) = PERCENT_RE.captures(text) {
        return Some(format!("{}%", &captures[1]));
    }

    // Only digits and a decimal point may be reread as a percentage; "$25.00" is an amount.
    let bare = text.replace([',', '%'], "");
    let bare = bare.trim();
    if bare.is_empty() || !bare.chars().all(|ch| ch.is_ascii_digit() || ch == '.') {
        return None;
    }
    parse_plain_number(bare).map(|_| format!("{bare}%"))
}

/// True for cells written with a currency sign ("$1,250.00").
pub(crate) fn has_currency(cell: &Cell) -> bool {
    match cell {
        Cell::Text(text) => CURRENCY_RE.is_match(text),
        Cell::Number(_) | Cell::Empty => false,
    }
}

/// True only for cells written as a percentage; bare numbers do not count.
pub(crate) fn is_percentage(cell: &Cell) -> bool {
    match cell {
        Cell::Text(text) => PERCENT_RE.is_match(text),
        Cell::Number(_) | Cell::Empty => false,
    }
}

/// Digits of a series cell when it holds exactly one number ("Series 281" gives "281").
pub(crate) fn series_digits(text: &str) -> Option<String> {
    let mut numbers = NUMBER_RE.find_iter(text);
    let first = numbers.next()?;
    if numbers.next().is_some() {
        return None;
    }
    Some(first.as_str().to_string())
}

pub(crate) fn find_embedded_discount(text: &str) -> Option<EmbeddedDiscount> {
    let lower = text.to_lowercase();
    if !lower.contains("discount") || !text.contains('%') {
        return None;
    }

    let captures = EMBEDDED_DISCOUNT_RE.captures(text)?;
    let percent = captures.name("pct")?.as_str();
    if !percent.chars().any(|ch| ch.is_ascii_digit()) {
        return None;
    }

    Some(EmbeddedDiscount {
        series: captures.name("series")?.as_str().to_string(),
        percent: format!("{percent}%"),
        label: captures.name("label")?.as_str().to_string(),
    })
}
