pub mod source;

pub use source::{LoadedCsv, Source, load};
