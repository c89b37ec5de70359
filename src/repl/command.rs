use std::str::FromStr;

/// A line entered at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the data with a file or URL.
    Load(String),
    /// Update the query text and show suggestions.
    Type(String),
    /// Search with the given text, or the current query when `None`.
    Search(Option<String>),
    /// Select the nth suggestion (1-based).
    Pick(usize),
    Show,
    Export,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  load <file-or-url>   load CSV data
  type <text>          set the query and list suggestions
  search [text]        search the current query (or <text>)
  pick <n>             use suggestion n as the query and search
  show                 print the current view
  export               print current results as CSV
  help                 this message
  quit | :q            leave";

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = match line.trim_start().split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (line.trim(), ""),
        };

        match word {
            "load" if !rest.trim().is_empty() => Ok(Command::Load(rest.trim().to_string())),
            "load" => Err("usage: load <file-or-url>".to_string()),
            // typed text keeps its spacing; the query engine trims it
            "type" => Ok(Command::Type(rest.to_string())),
            "search" if rest.trim().is_empty() => Ok(Command::Search(None)),
            "search" => Ok(Command::Search(Some(rest.to_string()))),
            "pick" => rest
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(Command::Pick)
                .ok_or_else(|| "usage: pick <n> (n starts at 1)".to_string()),
            "show" => Ok(Command::Show),
            "export" => Ok(Command::Export),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | ":q" => Ok(Command::Quit),
            "" => Ok(Command::Show),
            other => Err(format!("unknown command: {other} (try `help`)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load() {
        assert_eq!(
            "load data/prices.csv".parse::<Command>(),
            Ok(Command::Load("data/prices.csv".to_string()))
        );
        assert!("load".parse::<Command>().is_err());
        assert!("load   ".parse::<Command>().is_err());
    }

    #[test]
    fn test_type_keeps_spacing() {
        assert_eq!("type Wi".parse::<Command>(), Ok(Command::Type("Wi".to_string())));
        assert_eq!("type  Widget Pro ".parse::<Command>(), Ok(Command::Type(" Widget Pro ".to_string())));
        assert_eq!("type".parse::<Command>(), Ok(Command::Type(String::new())));
    }

    #[test]
    fn test_search() {
        assert_eq!("search".parse::<Command>(), Ok(Command::Search(None)));
        assert_eq!("search Widg\n".parse::<Command>(), Ok(Command::Search(Some("Widg".to_string()))));
    }

    #[test]
    fn test_pick() {
        assert_eq!("pick 2".parse::<Command>(), Ok(Command::Pick(2)));
        assert!("pick 0".parse::<Command>().is_err());
        assert!("pick two".parse::<Command>().is_err());
    }

    #[test]
    fn test_simple_words() {
        assert_eq!("show".parse::<Command>(), Ok(Command::Show));
        assert_eq!("".parse::<Command>(), Ok(Command::Show));
        assert_eq!("export".parse::<Command>(), Ok(Command::Export));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!(":q".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("quit\r\n".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_unknown() {
        assert!("frobnicate".parse::<Command>().is_err());
    }
}
