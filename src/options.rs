use std::str::FromStr;

/// Which quote template family the parser should expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Header or content driven column inference per table, dedicated
    /// discount column, bounded page range with all-pages fallback.
    #[default]
    Adaptive,
    /// INIT-style three column tables (part, description, price) on every
    /// page, one table per page.
    Fixed,
}

impl Layout {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adaptive => "adaptive",
            Self::Fixed => "fixed",
        }
    }

    /// Separator used when a part number cell spans several lines.
    #[must_use]
    pub const fn part_line_separator(self) -> &'static str {
        match self {
            Self::Adaptive => " ",
            Self::Fixed => "/",
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "adaptive" | "auto" => Ok(Self::Adaptive),
            "fixed" | "simple" | "init" => Ok(Self::Fixed),
            other => Err(format!(
                "unknown layout '{other}', expected 'adaptive' or 'fixed'"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub layout: Layout,
    /// Try the "<nnn> Series ... <pct>%" description rule before generic
    /// row classification.
    pub embedded_series_discounts: bool,
    /// Adaptive layout scans pages `1..leading_pages` (0-based) plus the
    /// last page before falling back to the whole document.
    pub leading_pages: usize,
}

impl ParseOptions {
    #[must_use]
    pub fn with_layout(layout: Layout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            layout: Layout::Adaptive,
            embedded_series_discounts: true,
            leading_pages: 9,
        }
    }
}
