pub mod config;
pub mod error;
pub mod ingest;
pub mod orchestrator;
pub mod parser;
pub mod query;
pub mod records;
pub mod repl;
pub mod session;
pub mod store;
pub mod view;

pub use config::Config;
pub use error::IngestError;
pub use orchestrator::Orchestrator;
pub use parser::{ParseOptions, parse_csv};
pub use query::QueryEngine;
pub use records::PriceRecord;
pub use session::{Mode, SessionState};
pub use store::RecordStore;
