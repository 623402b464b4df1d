//! Parsing of terminal commands.

use std::str::FromStr;

use thiserror::Error;

use crate::region::Region;

/// A command typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit the search form, optionally replacing the text first.
    Search(Option<String>),
    /// Replace the search text without submitting.
    Type(String),
    /// Empty the search text.
    Clear,
    /// Select a region; `None` selects all regions.
    Region(Option<Region>),
    /// List the available regions.
    Regions,
    /// Drop all state and start over.
    Reload,
    /// Show usage.
    Help,
    /// End the session.
    Quit,
    /// Blank line.
    Empty,
}

/// Why a line could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// First word is not a known command.
    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    Unknown(String),
    /// `region` with a name outside the fixed set.
    #[error("Unknown region '{0}'. Type 'regions' to list them.")]
    UnknownRegion(String),
    /// A command that needs an argument got none.
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
}

/// Usage text shown by `help`.
pub const HELP_TEXT: &str = "\
Commands:
  search [text]   submit a search (optionally setting the text first)
  type <text>     set the search text without submitting
  clear           empty the search text
  region <name>   filter by region, or 'region all' for all regions
  regions         list the regions
  reload          start over with an empty cache
  help            show this help
  quit            leave";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Command::Empty);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "search" | "s" => Ok(Command::Search(
                (!rest.is_empty()).then(|| rest.to_string()),
            )),
            "type" | "t" => {
                if rest.is_empty() {
                    Err(CommandError::MissingArgument("type"))
                } else {
                    Ok(Command::Type(rest.to_string()))
                }
            }
            "clear" => Ok(Command::Clear),
            "region" | "r" => {
                if rest.is_empty() {
                    Err(CommandError::MissingArgument("region"))
                } else if rest.eq_ignore_ascii_case("all") {
                    Ok(Command::Region(None))
                } else {
                    Region::from_str(rest)
                        .map(|r| Command::Region(Some(r)))
                        .map_err(|_| CommandError::UnknownRegion(rest.to_string()))
                }
            }
            "regions" => Ok(Command::Regions),
            "reload" => Ok(Command::Reload),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}
