use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// One observed price point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    pub date: String,
    pub brand: String,
    pub item: String,
    pub platform: String,
    /// `None` when the source cell was absent or not a number.
    pub price: Option<Decimal>,
}

impl PriceRecord {
    pub fn new(
        date: impl Into<String>,
        brand: impl Into<String>,
        item: impl Into<String>,
        platform: impl Into<String>,
        price: Option<Decimal>,
    ) -> Self {
        Self {
            date: date.into(),
            brand: brand.into(),
            item: item.into(),
            platform: platform.into(),
            price,
        }
    }
}

/// Convert a raw price cell into a number.
///
/// With `strip` set, everything except ASCII digits, `.` and `-` is removed
/// first, so `"₩12,000"` becomes `12000`. Without it the trimmed cell is
/// converted as-is and currency symbols or separators yield `None`.
/// Exponent forms such as `1e3` are accepted; values outside `Decimal`'s
/// range are `None`.
pub fn coerce_price(raw: &str, strip: bool) -> Option<Decimal> {
    let cleaned: String = if strip {
        raw.chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect()
    } else {
        raw.trim().to_string()
    };

    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Render a price with a currency prefix and grouped thousands, or `-` when
/// there is no number. At most three fraction digits are kept.
pub fn format_price(price: Option<Decimal>, currency_symbol: &str) -> String {
    let Some(value) = price else {
        return "-".to_string();
    };

    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{currency_symbol}{sign}{grouped}.{frac}"),
        None => format!("{currency_symbol}{sign}{grouped}"),
    }
}
