use std::path::PathBuf;

use thiserror::Error;

/// Failures while bringing CSV text into a session.
///
/// Malformed rows are not errors; they default to empty cells or a missing
/// price instead.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}
