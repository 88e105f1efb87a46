//! Parsing of the commands typed at the news screen prompt.

use crate::models::{Category, CountryCode};
use std::str::FromStr;

/// A single line typed at the prompt.
///
/// Verbs are case-insensitive. `search`, `help` and `quit` also answer to
/// `s`, `?` and `q`/`exit`. A blank line parses to [`Command::Nothing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `country <cc>`: select a country
    Country(CountryCode),
    /// `category <name>`: select a category
    Category(Category),
    Search,
    /// `open <n>`: hand off the n-th article (1-based) to the browser
    Open(usize),
    Countries,
    Categories,
    Help,
    Quit,
    Nothing,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Command::Nothing);
        };
        let arg = words.next();
        if words.next().is_some() {
            return Err(format!("too many arguments to '{}'", verb));
        }

        let verb = verb.to_lowercase();
        match (verb.as_str(), arg) {
            ("country", Some(code)) => code.parse().map(Command::Country),
            ("category", Some(name)) => name.parse().map(Command::Category),
            ("open", Some(n)) => n
                .parse()
                .map(Command::Open)
                .map_err(|_| format!("'{}' is not an article number", n)),
            ("country" | "category" | "open", None) => Err(format!("'{}' needs an argument", verb)),
            ("search" | "s", None) => Ok(Command::Search),
            ("countries", None) => Ok(Command::Countries),
            ("categories", None) => Ok(Command::Categories),
            ("help" | "?", None) => Ok(Command::Help),
            ("quit" | "exit" | "q", None) => Ok(Command::Quit),
            ("search" | "s" | "countries" | "categories" | "help" | "?" | "quit" | "exit" | "q", Some(_)) => {
                Err(format!("'{}' takes no arguments", verb))
            }
            _ => Err(format!("unknown command '{}' (try 'help')", verb)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection_commands() {
        assert_eq!(
            "country DE".parse::<Command>().unwrap(),
            Command::Country("de".parse().unwrap())
        );
        assert_eq!(
            "category health".parse::<Command>().unwrap(),
            Command::Category(Category::Health)
        );
        assert_eq!("  open 3 ".parse::<Command>().unwrap(), Command::Open(3));
    }

    #[test]
    fn test_parse_bare_commands() {
        assert_eq!("search".parse::<Command>().unwrap(), Command::Search);
        assert_eq!("SEARCH".parse::<Command>().unwrap(), Command::Search);
        assert_eq!("countries".parse::<Command>().unwrap(), Command::Countries);
        assert_eq!("categories".parse::<Command>().unwrap(), Command::Categories);
        assert_eq!("help".parse::<Command>().unwrap(), Command::Help);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!("   ".parse::<Command>().unwrap(), Command::Nothing);
    }

    #[test]
    fn test_parse_errors() {
        assert!("country".parse::<Command>().is_err());
        assert!("country usa".parse::<Command>().is_err());
        assert!("category weather".parse::<Command>().is_err());
        assert!("open two".parse::<Command>().is_err());
        assert!("search now".parse::<Command>().is_err());
        assert!("country us gb".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }
}
