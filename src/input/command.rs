//! Text commands typed into the terminal front end.
//!
//! Lines starting with `:` are commands; anything else is free text, which
//! the front end feeds to the search overlay while it is open.
//!
//! | Line                     | Command                         |
//! |--------------------------|---------------------------------|
//! | `:login <user> <pass>`   | [`Command::Login`]              |
//! | `:logout`                | [`Command::Logout`]             |
//! | `:open <path>`           | [`Command::Open`]               |
//! | `:search`                | [`Command::Search`]             |
//! | `:esc`                   | [`Command::Key`] with Escape    |
//! | `:3`                     | [`Command::Select`] (1-based)   |
//! | `:delete`                | [`Command::Delete`]             |
//! | `:quit`, `:q`            | [`Command::Quit`]               |
//! | `hello world`            | [`Command::Text`]               |

use super::Key;
use crate::views::Route;

/// A parsed front end line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, password: String },
    Logout,
    Open(Route),
    Search,
    Key(Key),
    /// Open the N-th search result, counting from 1.
    Select(usize),
    Delete,
    Quit,
    /// Free text; search input while the overlay is open.
    Text(String),
    /// A `:` command that could not be parsed, with a usage hint.
    Invalid(String),
}

impl Command {
    /// Parses one input line. Never fails: bad commands become
    /// [`Command::Invalid`].
    ///
    /// ```rust
    /// use complexapp::input::{Command, Key};
    /// use complexapp::views::Route;
    ///
    /// assert_eq!(Command::parse(":open /post/7"), Command::Open(Route::post("7")));
    /// assert_eq!(Command::parse(":esc"), Command::Key(Key::Escape));
    /// assert_eq!(Command::parse("react"), Command::Text("react".to_string()));
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let Some(rest) = line.strip_prefix(':') else {
            return Self::Text(line.to_string());
        };

        let mut words = rest.split_whitespace();
        let Some(name) = words.next() else {
            return Self::Invalid("empty command".to_string());
        };

        match name {
            "login" => match (words.next(), words.next()) {
                (Some(username), Some(password)) => Self::Login {
                    username: username.to_string(),
                    password: password.to_string(),
                },
                _ => Self::Invalid("usage: :login <username> <password>".to_string()),
            },
            "logout" => Self::Logout,
            "open" => words.next().map_or_else(
                || Self::Invalid("usage: :open <path>".to_string()),
                |path| Self::Open(Route::parse(path)),
            ),
            "search" => Self::Search,
            "esc" => Self::Key(Key::Escape),
            "delete" => Self::Delete,
            "quit" | "q" => Self::Quit,
            other => match other.parse::<usize>() {
                Ok(index) if index > 0 => Self::Select(index),
                _ => Self::Invalid(format!("unknown command :{other}")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_needs_both_credentials() {
        assert_eq!(
            Command::parse(":login alice hunter2"),
            Command::Login {
                username: "alice".to_string(),
                password: "hunter2".to_string(),
            }
        );
        assert!(matches!(Command::parse(":login alice"), Command::Invalid(_)));
    }

    #[test]
    fn numbers_select_results_from_one() {
        assert_eq!(Command::parse(":2"), Command::Select(2));
        assert!(matches!(Command::parse(":0"), Command::Invalid(_)));
    }

    #[test]
    fn open_parses_the_route() {
        assert_eq!(
            Command::parse(":open /profile/alice/followers"),
            Command::Open(Route::profile("alice"))
        );
        assert_eq!(
            Command::parse(":open /nope"),
            Command::Open(Route::NotFound("/nope".to_string()))
        );
    }

    #[test]
    fn plain_text_is_kept_verbatim() {
        assert_eq!(Command::parse("  react "), Command::Text("  react ".to_string()));
        assert_eq!(Command::parse(""), Command::Text(String::new()));
        assert_eq!(Command::parse(":q"), Command::Quit);
        assert!(matches!(Command::parse(":"), Command::Invalid(_)));
    }
}
