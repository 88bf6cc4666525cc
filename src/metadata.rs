use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::document::QuoteDocument;
use crate::model::QuoteMetadata;
use crate::normalize::clean_text;
use crate::options::Layout;
use crate::warning::{ExtractWarning, WarningCode};

// Quote tokens must contain a digit so label words ("Number") are never captured.
static QUOTE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:quotation|quote)(?:\s*(?:number|no\.?|nr\.?))?\s*#?\s*:?\s*([A-Z0-9\-]*\d[A-Z0-9\-]*)",
    )
    .expect("hardcoded quote number regex is valid")
});

static SHORT_QUOTE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:quotation|quote|q)(?:\s*(?:number|no\.?|nr\.?))?\s*#?\s*:?\s*([A-Z0-9\-]*\d[A-Z0-9\-]*)",
    )
    .expect("hardcoded short quote number regex is valid")
});

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:date|issued)\s*:?\s*(\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4})")
        .expect("hardcoded date regex is valid")
});

static EXPIRATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:valid(?:\s+(?:until|through|thru))?|expir\w*(?:\s+date)?)\s*:?\s*(\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4})",
    )
    .expect("hardcoded expiration regex is valid")
});

static CUSTOMER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:customer|sold\s*to|bill\s*to)[^\S\r\n]*:?[^\S\r\n]*([^\r\n]+)")
        .expect("hardcoded customer regex is valid")
});

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Quote number, date, expiration date and customer from cover/summary text.
#[must_use]
pub fn parse_metadata(text: &str) -> QuoteMetadata {
    QuoteMetadata {
        quote_number: first_capture(&QUOTE_NUMBER_RE, text),
        date: first_capture(&DATE_RE, text),
        expiration_date: first_capture(&EXPIRATION_RE, text),
        customer: first_capture(&CUSTOMER_RE, text)
            .map(|customer| clean_text(&customer))
            .filter(|customer| !customer.is_empty()),
    }
}

/// Quote number only, also accepting a bare `Q` label ("Q# 24-0117").
#[must_use]
pub fn parse_quote_number(text: &str) -> Option<String> {
    first_capture(&SHORT_QUOTE_NUMBER_RE, text)
}

fn metadata_pages(page_count: usize, layout: Layout) -> Vec<usize> {
    match (layout, page_count) {
        (_, 0) => Vec::new(),
        (Layout::Fixed, _) | (Layout::Adaptive, 1) => vec![0],
        (Layout::Adaptive, count) => vec![0, count - 1],
    }
}

/// Best-effort scan: pages whose text cannot be read contribute nothing.
pub(crate) fn extract_metadata(
    document: &dyn QuoteDocument,
    layout: Layout,
    warnings: &mut Vec<ExtractWarning>,
) -> QuoteMetadata {
    let mut texts = Vec::new();
    for index in metadata_pages(document.page_count(), layout) {
        match document.page_text(index) {
            Ok(text) if !text.trim().is_empty() => texts.push(text),
            Ok(_) => {}
            Err(error) => {
                debug!(page = index + 1, %error, "page text unavailable for metadata");
                warnings.push(
                    ExtractWarning::new(
                        WarningCode::PageTextUnavailable,
                        format!("metadata scan skipped page: {error}"),
                    )
                    .with_page(index + 1),
                );
            }
        }
    }

    let text = texts.join("\n");
    match layout {
        Layout::Adaptive => parse_metadata(&text),
        Layout::Fixed => QuoteMetadata {
            quote_number: parse_quote_number(&text),
            ..QuoteMetadata::default()
        },
    }
}
