pub mod csv_parser;
pub mod delimiter;

pub use csv_parser::{ParseOptions, parse_csv};
pub use delimiter::{Delimiter, detect_delimiter};
