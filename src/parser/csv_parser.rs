use std::collections::HashMap;

use csv::{ReaderBuilder, Trim};
use log::debug;

use crate::error::IngestError;
use crate::parser::delimiter::detect_delimiter;
use crate::records::{PriceRecord, coerce_price};

/// Behaviour switches that differ between upload and sample ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Drop records whose item or platform cell is empty.
    pub require_item_and_platform: bool,
    /// Strip everything but digits, `.` and `-` from the price cell before
    /// converting it.
    pub strip_non_numeric_price: bool,
}

impl ParseOptions {
    /// Strict rules used for user-selected files.
    pub fn upload() -> Self {
        Self {
            require_item_and_platform: true,
            strip_non_numeric_price: true,
        }
    }

    /// Lenient rules used for the preloaded sample file.
    pub fn sample() -> Self {
        Self {
            require_item_and_platform: false,
            strip_non_numeric_price: false,
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::upload()
    }
}

/// Parse raw CSV text into price records.
///
/// The first non-blank line is the header and decides the delimiter for the
/// whole text. Quotes carry no meaning. Blank input is an empty list, not an
/// error; short rows read missing cells as empty strings.
pub fn parse_csv(text: &str, options: &ParseOptions) -> Result<Vec<PriceRecord>, IngestError> {
    let text = text.trim_start_matches('\u{feff}').trim();
    let Some(header_line) = text.lines().next() else {
        return Ok(Vec::new());
    };
    let delimiter = detect_delimiter(header_line);

    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(text.as_bytes());
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for result in rdr.records() {
        let row = result?;
        // later duplicate headers overwrite earlier ones
        let cells: HashMap<&str, &str> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name, row.get(idx).unwrap_or("")))
            .collect();

        let record = map_row(&cells, options);
        if options.require_item_and_platform
            && (record.item.is_empty() || record.platform.is_empty())
        {
            dropped += 1;
            continue;
        }
        records.push(record);
    }

    debug!(
        "parsed {} records ({} dropped) with {:?} delimiter",
        records.len(),
        dropped,
        delimiter
    );
    Ok(records)
}

fn map_row(cells: &HashMap<&str, &str>, options: &ParseOptions) -> PriceRecord {
    // A present `price` column wins even when empty; `Price` is the fallback.
    let raw_price = match cells.get("price") {
        Some(value) => Some(*value),
        None => cells.get("Price").copied(),
    };

    PriceRecord {
        date: text_field(cells, "date", "Date"),
        brand: text_field(cells, "brand", "Brand"),
        item: text_field(cells, "item", "Item"),
        platform: text_field(cells, "platform", "Platform"),
        price: raw_price.and_then(|raw| coerce_price(raw, options.strip_non_numeric_price)),
    }
}

fn text_field(cells: &HashMap<&str, &str>, lower: &str, capitalized: &str) -> String {
    cells
        .get(lower)
        .filter(|value| !value.is_empty())
        .or_else(|| cells.get(capitalized))
        .copied()
        .unwrap_or("")
        .to_string()
}
