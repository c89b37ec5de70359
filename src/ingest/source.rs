use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;

use crate::error::IngestError;
use crate::parser::{ParseOptions, parse_csv};
use crate::records::PriceRecord;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where CSV text comes from: a local file the user picked, or a fixed
/// remote resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    /// `http://` and `https://` locations are fetched, anything else is a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Source::Url(location.to_string())
        } else {
            Source::File(PathBuf::from(location))
        }
    }

    /// Short name shown in status messages.
    pub fn display_name(&self) -> String {
        match self {
            Source::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Source::Url(url) => url
                .rsplit('/')
                .find(|segment| !segment.is_empty())
                .unwrap_or(url.as_str())
                .to_string(),
        }
    }

    /// Read the whole resource as UTF-8 text.
    pub fn read_text(&self) -> Result<String, IngestError> {
        let text = match self {
            Source::File(path) => read_file(path)?,
            Source::Url(url) => fetch(url)?,
        };
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => f.write_str(url),
        }
    }
}

/// Parsed records together with the name of where they came from.
#[derive(Debug, Clone)]
pub struct LoadedCsv {
    pub name: String,
    pub records: Vec<PriceRecord>,
}

/// Read and parse a source in one step.
pub fn load(source: &Source, options: &ParseOptions) -> Result<LoadedCsv, IngestError> {
    let text = source.read_text()?;
    let records = parse_csv(&text, options)?;
    info!("loaded {} records from {}", records.len(), source);
    Ok(LoadedCsv {
        name: source.display_name(),
        records,
    })
}

fn read_file(path: &Path) -> Result<String, IngestError> {
    let bytes = fs::read(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn fetch(url: &str) -> Result<String, IngestError> {
    let wrap = |source: reqwest::Error| IngestError::Fetch {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(wrap)?;
    client
        .get(url)
        .send()
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.text())
        .map_err(wrap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_location() {
        assert_eq!(
            Source::parse("https://example.com/data/rm_chicken_250829.csv"),
            Source::Url("https://example.com/data/rm_chicken_250829.csv".to_string())
        );
        assert_eq!(
            Source::parse("prices.csv"),
            Source::File(PathBuf::from("prices.csv"))
        );
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Source::parse("/tmp/data/prices.csv").display_name(), "prices.csv");
        assert_eq!(
            Source::parse("http://localhost:8080/rm_chicken_250829.csv").display_name(),
            "rm_chicken_250829.csv"
        );
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\u{feff}date,brand,item,platform,price\n2025-01-01,A,Widget,ShopX,₩1,000").unwrap();

        let source = Source::File(file.path().to_path_buf());
        let loaded = load(&source, &ParseOptions::upload()).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].item, "Widget");
        assert_eq!(loaded.name, source.display_name());
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"item,platform\nWid\xffget,ShopX").unwrap();

        let loaded = load(&Source::File(file.path().to_path_buf()), &ParseOptions::upload()).unwrap();
        assert_eq!(loaded.records[0].item, "Wid\u{fffd}get");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = Source::File(dir.path().join("nope.csv"));
        let err = load(&source, &ParseOptions::upload()).unwrap_err();
        assert!(matches!(err, IngestError::Read { .. }));
    }
}
