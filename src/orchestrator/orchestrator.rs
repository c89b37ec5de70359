use std::io::{BufRead, Write};

use anyhow::Result;
use log::info;

use crate::config::Config;
use crate::ingest::{Source, load};
use crate::parser::ParseOptions;
use crate::repl::{Command, command::HELP};
use crate::session::{Mode, SessionState};
use crate::view::{render, render_record, write_results_csv};

/// Drives one session: ingestion, queries and output.
pub struct Orchestrator {
    session: SessionState,
    options: ParseOptions,
    currency_symbol: String,
}

impl Orchestrator {
    pub fn new(config: &Config, mode: Mode) -> Self {
        Self {
            session: SessionState::new(mode),
            options: config.parse_options(mode),
            currency_symbol: config.display.currency_symbol.clone(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Load a file or URL into the session. Failures end up in the status
    /// line; the return value says whether the session was updated.
    pub fn ingest(&mut self, location: &str) -> bool {
        let source = Source::parse(location);
        info!("ingesting {}", source);
        let ticket = self.session.begin_ingest();
        let outcome = load(&source, &self.options);
        self.session.complete_ingest(ticket, outcome)
    }

    /// Answer a single search and/or suggestion request, then return.
    pub fn run_once<W: Write>(
        &mut self,
        query: Option<&str>,
        suggest: Option<&str>,
        as_csv: bool,
        out: &mut W,
    ) -> Result<()> {
        if !as_csv {
            writeln!(out, "{}", self.session.status())?;
        }

        if let Some(partial) = suggest {
            self.session.set_query(partial);
            for suggestion in self.session.suggestions() {
                writeln!(out, "{suggestion}")?;
            }
        }

        if let Some(query) = query {
            self.session.set_query(query);
            self.session.search();
            if as_csv {
                write_results_csv(self.session.results(), &mut *out)?;
            } else if self.session.results().is_empty() {
                writeln!(out, "No results found.")?;
            } else {
                for record in self.session.results() {
                    writeln!(out, "{}", render_record(record, &self.currency_symbol))?;
                }
            }
        }

        Ok(())
    }

    /// Read commands until `quit` or end of input.
    pub fn run_prompt<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        writeln!(out, "{}", render(&self.session, &self.currency_symbol))?;

        for line in input.lines() {
            let line = line?;
            match line.parse::<Command>() {
                Ok(command) => {
                    if !self.execute(command, &mut out)? {
                        break;
                    }
                }
                Err(message) => writeln!(out, "{message}")?,
            }
            out.flush()?;
        }

        Ok(())
    }

    /// Apply one prompt command. Returns `false` once the user quits.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<bool> {
        let needs_data = matches!(
            command,
            Command::Type(_) | Command::Search(_) | Command::Pick(_)
        );
        if needs_data && !self.session.has_data() {
            writeln!(out, "{}", self.session.mode().empty_hint())?;
            return Ok(true);
        }

        match command {
            Command::Load(location) => {
                self.ingest(&location);
            }
            Command::Type(text) => self.session.set_query(&text),
            Command::Search(None) => self.session.search(),
            Command::Search(Some(text)) => {
                self.session.set_query(&text);
                self.session.search();
            }
            Command::Pick(n) => match n
                .checked_sub(1)
                .and_then(|idx| self.session.suggestions().get(idx))
                .cloned()
            {
                Some(suggestion) => self.session.select_suggestion(&suggestion),
                None => {
                    writeln!(out, "no suggestion #{n}")?;
                    return Ok(true);
                }
            },
            Command::Show => {}
            Command::Export => {
                write_results_csv(self.session.results(), &mut *out)?;
                return Ok(true);
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(true);
            }
            Command::Quit => return Ok(false),
        }

        writeln!(out, "{}", render(&self.session, &self.currency_symbol))?;
        Ok(true)
    }
}
