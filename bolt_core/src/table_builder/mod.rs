//! # Table Builder
//!
//! Offline utility that scrapes thread dimension tables from reference web
//! pages and writes the unified CSV consumed by [`crate::file_io::load_table`].
//!
//! Per page:
//!
//! 1. Take the third `<table>` on the page
//! 2. Use its first row as header and drop it
//! 3. Key rows by the `OZNACZENIE` (designation) column
//! 4. Drop the last row (page footer)
//! 5. Require exactly six remaining columns: P, d, d2, d1, d3, A
//! 6. Drop the page's thousands separator, then replace its decimal
//!    separator with `.` (the source pages write `1.121,5` for 1121.5)
//!
//! Pages are concatenated in the order given. Any failure aborts the whole
//! build; nothing is retried and no partial table is written.
//!
//! The positional table pick is tied to the current page layout.

pub mod fetch;
pub mod html;

use std::path::Path;

use tracing::info;

use crate::errors::{BoltError, BoltResult};
use crate::file_io::save_table;
use crate::materials::{ThreadSpec, ThreadTable};

pub use fetch::fetch_page;

/// Zero-based position of the dimension table on each page
pub const TABLE_POSITION: usize = 2;

/// Header of the designation column on the source pages
pub const KEY_HEADER: &str = "OZNACZENIE";

/// Decimal separator used by the default source pages
pub const DEFAULT_DECIMAL_SEPARATOR: char = ',';

/// Thousands separator used by the default source pages
pub const DEFAULT_THOUSANDS_SEPARATOR: char = '.';

/// How numbers are written on the source pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub thousands: char,
    pub decimal: char,
}

impl NumberFormat {
    pub fn new(thousands: char, decimal: char) -> Self {
        NumberFormat { thousands, decimal }
    }

    /// Convert a page number to canonical form: whitespace and thousands
    /// separators are dropped, the decimal separator becomes `.`.
    pub fn normalize(&self, raw: &str) -> String {
        raw.chars()
            .filter(|&c| !c.is_whitespace() && c != self.thousands)
            .map(|c| if c == self.decimal { '.' } else { c })
            .collect()
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::new(DEFAULT_THOUSANDS_SEPARATOR, DEFAULT_DECIMAL_SEPARATOR)
    }
}

/// Metric thread tables on pkm.edu.pl
pub const DEFAULT_SOURCES: [&str; 7] = [
    "https://www.pkm.edu.pl/index.php/polocenia-obl/51-01010002",
    "https://www.pkm.edu.pl/index.php/polocenia-obl/52-01010003",
    "https://www.pkm.edu.pl/index.php/polocenia-obl/54-01010004",
    "https://www.pkm.edu.pl/index.php/polocenia-obl/55-01010005",
    "https://www.pkm.edu.pl/index.php/polocenia-obl/56-01010006",
    "https://www.pkm.edu.pl/index.php/polocenia-obl/57-01010007",
    "https://www.pkm.edu.pl/index.php/polocenia-obl/58-01010008",
];

/// Parse one page's dimension table.
pub fn parse_page(page: &str, source_name: &str, format: NumberFormat) -> BoltResult<ThreadTable> {
    if format.thousands == format.decimal {
        return Err(BoltError::table_parse(
            source_name,
            format!("thousands and decimal separator are both '{}'", format.decimal),
        ));
    }

    let tables = html::extract_tables(page);
    let found = tables.len();
    let rows = tables.into_iter().nth(TABLE_POSITION).ok_or_else(|| {
        BoltError::table_parse(
            source_name,
            format!("expected at least {} tables, found {}", TABLE_POSITION + 1, found),
        )
    })?;

    let mut rows = rows.into_iter();
    let header = rows
        .next()
        .ok_or_else(|| BoltError::table_parse(source_name, "dimension table is empty"))?;
    let key_idx = header
        .iter()
        .position(|h| h.eq_ignore_ascii_case(KEY_HEADER))
        .ok_or_else(|| BoltError::table_parse(source_name, format!("no '{}' column", KEY_HEADER)))?;

    let mut body: Vec<Vec<String>> = rows.collect();
    body.pop();

    let mut table = ThreadTable::new();
    for (i, row) in body.iter().enumerate() {
        let row_num = i + 2;
        let designation = row.get(key_idx).ok_or_else(|| {
            BoltError::table_parse(source_name, format!("row {}: missing designation", row_num))
        })?;

        let values: Vec<&String> = row
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != key_idx)
            .map(|(_, v)| v)
            .collect();
        if values.len() != 6 {
            return Err(BoltError::table_parse(
                source_name,
                format!("row {}: expected 6 dimension columns, found {}", row_num, values.len()),
            ));
        }

        let mut dims = [0.0; 6];
        for (dim, raw) in dims.iter_mut().zip(&values) {
            let normalized = format.normalize(raw);
            *dim = normalized.parse().map_err(|_| {
                BoltError::table_parse(
                    source_name,
                    format!("row {} ({}): '{}' is not a number", row_num, designation, raw),
                )
            })?;
        }

        table
            .insert(ThreadSpec::from_dimensions(designation.as_str(), dims))
            .map_err(|e| BoltError::table_parse(source_name, e.to_string()))?;
    }

    info!(source = source_name, rows = table.len(), "Parsed dimension table");
    Ok(table)
}

/// Build the unified table, obtaining each page's text from `fetch`.
pub fn build_table_with<F>(sources: &[&str], format: NumberFormat, mut fetch: F) -> BoltResult<ThreadTable>
where
    F: FnMut(&str) -> BoltResult<String>,
{
    let mut table = ThreadTable::new();
    for source in sources {
        let page = fetch(source)?;
        let page_table = parse_page(&page, source, format)?;
        table
            .extend(page_table)
            .map_err(|e| BoltError::table_parse(*source, e.to_string()))?;
    }
    Ok(table)
}

/// Fetch every source page over HTTP and build the unified table.
pub fn build_table(sources: &[&str], format: NumberFormat) -> BoltResult<ThreadTable> {
    build_table_with(sources, format, fetch_page)
}

/// Fetch, build and save the reference table to `output`.
pub fn run(sources: &[&str], format: NumberFormat, output: &Path) -> BoltResult<ThreadTable> {
    let table = build_table(sources, format)?;
    save_table(&table, output)?;
    info!(path = %output.display(), rows = table.len(), "Reference table written");
    Ok(table)
}
