use log::{debug, error, info, warn};
use serde::Deserialize;

use crate::error::IngestError;
use crate::ingest::LoadedCsv;
use crate::parser::ParseOptions;
use crate::query::QueryEngine;
use crate::records::PriceRecord;
use crate::store::RecordStore;

/// How data reaches the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The user picks a local file.
    #[default]
    Upload,
    /// A fixed sample resource is loaded at startup.
    Sample,
}

impl Mode {
    pub fn parse_options(self) -> ParseOptions {
        match self {
            Mode::Upload => ParseOptions::upload(),
            Mode::Sample => ParseOptions::sample(),
        }
    }

    fn initial_status(self) -> &'static str {
        match self {
            Mode::Upload => "No data loaded. Upload a CSV to begin.",
            Mode::Sample => "Loading sample data...",
        }
    }

    fn loaded_status(self, loaded: &LoadedCsv) -> String {
        match self {
            Mode::Upload => format!("Loaded {} rows from {}.", loaded.records.len(), loaded.name),
            Mode::Sample => format!("Loaded {} sample rows.", loaded.records.len()),
        }
    }

    fn failed_status(self) -> &'static str {
        match self {
            Mode::Upload => "Failed to parse CSV. Please check the file format.",
            Mode::Sample => "Failed to load sample data.",
        }
    }

    /// Hint shown while there is nothing to search.
    pub fn empty_hint(self) -> &'static str {
        match self {
            Mode::Upload => "Upload a CSV to enable search.",
            Mode::Sample => "Sample data not loaded.",
        }
    }
}

/// Identifies one ingestion attempt. Only the most recently issued ticket
/// may change the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct IngestTicket(u64);

/// Everything one search session holds between start and exit.
#[derive(Debug, Clone)]
pub struct SessionState {
    mode: Mode,
    store: RecordStore,
    query: String,
    results: Vec<PriceRecord>,
    suggestions: Vec<String>,
    status: String,
    latest_ticket: u64,
}

impl SessionState {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            store: RecordStore::new(),
            query: String::new(),
            results: Vec::new(),
            suggestions: Vec::new(),
            status: mode.initial_status().to_string(),
            latest_ticket: 0,
        }
    }

    /// Start an ingestion; any ticket issued earlier becomes stale.
    pub fn begin_ingest(&mut self) -> IngestTicket {
        self.latest_ticket += 1;
        IngestTicket(self.latest_ticket)
    }

    /// Apply the outcome of an ingestion started with `ticket`.
    ///
    /// Returns `false` and leaves the session untouched when a newer
    /// ingestion has been started since. A failure only replaces the status;
    /// previously loaded records stay searchable.
    pub fn complete_ingest(
        &mut self,
        ticket: IngestTicket,
        outcome: Result<LoadedCsv, IngestError>,
    ) -> bool {
        if ticket.0 != self.latest_ticket {
            warn!(
                "discarding stale ingest #{} (latest is #{})",
                ticket.0, self.latest_ticket
            );
            return false;
        }

        match outcome {
            Ok(loaded) => {
                self.status = self.mode.loaded_status(&loaded);
                let held = self.store.replace(loaded.records);
                self.query.clear();
                self.results.clear();
                self.suggestions.clear();
                info!("session now holds {} records from {}", held, loaded.name);
            }
            Err(e) => {
                error!("ingest #{} failed: {}", ticket.0, e);
                self.status = self.mode.failed_status().to_string();
            }
        }
        true
    }

    /// Record what the user has typed so far and refresh suggestions.
    pub fn set_query(&mut self, value: &str) {
        self.query = value.to_string();
        self.suggestions = QueryEngine::new(&self.store).suggest(value);
        debug!("{} suggestions for {:?}", self.suggestions.len(), value);
    }

    /// Search with the current query.
    pub fn search(&mut self) {
        let query = self.query.clone();
        self.search_for(&query);
    }

    /// Replace the results with the records matching `query`.
    pub fn search_for(&mut self, query: &str) {
        self.results = QueryEngine::new(&self.store)
            .search(query)
            .into_iter()
            .cloned()
            .collect();
        debug!("{} results for {:?}", self.results.len(), query.trim());
    }

    /// Adopt a suggestion as the query and search for it right away.
    pub fn select_suggestion(&mut self, suggestion: &str) {
        self.query = suggestion.to_string();
        self.suggestions.clear();
        self.search_for(suggestion);
    }

    pub fn has_data(&self) -> bool {
        !self.store.is_empty()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn records(&self) -> &[PriceRecord] {
        self.store.records()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[PriceRecord] {
        &self.results
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}
