pub mod price_record;

pub use price_record::{PriceRecord, coerce_price, format_price};
