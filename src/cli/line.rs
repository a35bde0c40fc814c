//! Interactive line commands.
//!
//! One command per line, words separated by whitespace. Search filters are
//! given as `key=value` pairs.

use crate::app::FavoritesFilter;
use crate::domain::{Category, Filters};
use std::path::PathBuf;
use thiserror::Error;

/// Usage summary printed by `help`.
pub const HELP: &str = "\
Commands:
  search [type=dog|cat] [location=ZIP] [age=AGE] [size=SIZE]
  all | dogs | cats          search a category near the default location
  more                       load the next page
  save <n>                   save result #n to favorites
  favorites                  show saved favorites
  filter <tag|all>           filter favorites by type or age
  remove <id>                delete a favorite
  export <file>              download favorites as CSV
  help | quit";

/// A parsed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(Filters),
    Category(Category),
    More,
    /// Zero-based result position.
    Save(usize),
    Favorites,
    Filter(FavoritesFilter),
    Remove(String),
    Export(PathBuf),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (type `help`)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown search filter `{0}` (expected type, location, age, or size)")]
    UnknownFilter(String),
}

/// Parses one input line. Blank lines yield `None`.
///
/// # Errors
///
/// Returns a [`CommandError`] for unknown commands or missing arguments.
///
/// # Example
///
/// ```
/// use petscout::cli::{parse_command, Command};
///
/// assert_eq!(parse_command("save 3").unwrap(), Some(Command::Save(2)));
/// assert_eq!(parse_command("   ").unwrap(), None);
/// ```
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match head.to_lowercase().as_str() {
        "search" | "s" => Command::Search(parse_filters(&rest)?),
        "all" => Command::Category(Category::All),
        "dogs" => Command::Category(Category::Dogs),
        "cats" => Command::Category(Category::Cats),
        "more" | "m" => Command::More,
        "save" => {
            let position = rest
                .first()
                .and_then(|n| n.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .ok_or(CommandError::Usage("save <n>, where n is a result number"))?;
            Command::Save(position - 1)
        }
        "favorites" | "favs" | "f" => Command::Favorites,
        "filter" => Command::Filter(FavoritesFilter::parse(&rest.join(" "))),
        "remove" | "rm" => {
            let id = rest.first().ok_or(CommandError::Usage("remove <id>"))?;
            Command::Remove((*id).to_string())
        }
        "export" => {
            let path = rest.first().ok_or(CommandError::Usage("export <file>"))?;
            Command::Export(PathBuf::from(path))
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Reads `key=value` pairs. A word without `=` continues the previous value,
/// so `location=New York` and `location="New York"` both work.
fn parse_filters(words: &[&str]) -> Result<Filters, CommandError> {
    let mut pairs: Vec<(&str, String)> = Vec::new();
    for &word in words {
        if let Some((key, value)) = word.split_once('=') {
            pairs.push((key, value.to_string()));
        } else if let Some((_, value)) = pairs.last_mut() {
            value.push(' ');
            value.push_str(word);
        } else {
            return Err(CommandError::Usage("search key=value ..."));
        }
    }

    let mut filters = Filters::default();
    for (key, value) in pairs {
        let slot = match key.to_lowercase().as_str() {
            "type" | "animal_type" => &mut filters.animal_type,
            "location" | "zip" => &mut filters.location,
            "age" => &mut filters.age,
            "size" => &mut filters.size,
            _ => return Err(CommandError::UnknownFilter(key.to_string())),
        };
        *slot = Some(value.trim_matches(|c| c == '"' || c == '\'').to_string());
    }
    Ok(filters)
}
