use std::io;

use csv::{QuoteStyle, WriterBuilder};

use crate::parser::Delimiter;
use crate::records::{PriceRecord, format_price};
use crate::session::SessionState;

/// One result line: item, platform, formatted price and date.
pub fn render_record(record: &PriceRecord, currency_symbol: &str) -> String {
    format!(
        "{} | {} | {} | {}",
        record.item,
        record.platform,
        format_price(record.price, currency_symbol),
        record.date
    )
}

/// Text view of a session. Holds no state of its own.
pub fn render(state: &SessionState, currency_symbol: &str) -> String {
    let mut lines = vec![state.status().to_string()];

    if !state.suggestions().is_empty() {
        lines.push("Suggestions:".to_string());
        for (idx, suggestion) in state.suggestions().iter().enumerate() {
            lines.push(format!("  {}. {}", idx + 1, suggestion));
        }
    }

    for record in state.results() {
        lines.push(render_record(record, currency_symbol));
    }

    if state.results().is_empty() && !state.query().is_empty() {
        lines.push("No results found.".to_string());
    }
    if !state.has_data() {
        lines.push(state.mode().empty_hint().to_string());
    }

    lines.join("\n")
}

/// Write records in the same unquoted form `parse_csv` reads back.
///
/// Fields are separated by commas unless some field contains one, in which
/// case tabs are used for the whole output. A field holding the chosen
/// separator or a line break cannot be represented. Missing prices become
/// empty cells.
pub fn write_results_csv<W: io::Write>(records: &[PriceRecord], writer: W) -> Result<(), csv::Error> {
    let delimiter = export_delimiter(records);
    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .quote_style(QuoteStyle::Never)
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(["date", "brand", "item", "platform", "price"])?;

    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    Ok(())
}

fn export_delimiter(records: &[PriceRecord]) -> Delimiter {
    let has_comma = records.iter().any(|r| {
        [&r.date, &r.brand, &r.item, &r.platform]
            .iter()
            .any(|field| field.contains(','))
    });
    if has_comma { Delimiter::Tab } else { Delimiter::Comma }
}
