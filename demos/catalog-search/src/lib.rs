//! Catalog search demo
//!
//! A small in-memory movie catalogue and the line commands the demo binary
//! understands.

use cinelog_search::Item;

/// Movies served by the demo's local provider.
#[must_use]
pub fn catalogue() -> Vec<Item> {
    [
        ("tt0078748", "Alien", "In space no one can hear you scream.", 1979),
        ("tt0090605", "Aliens", "This time it's war.", 1986),
        ("tt0103644", "Alien 3", "The bitch is back.", 1992),
        ("tt0083658", "Blade Runner", "Man has made his match.", 1982),
        ("tt1856101", "Blade Runner 2049", "The key to the future is finally unearthed.", 2017),
        ("tt0088247", "The Terminator", "Your future is in its hands.", 1984),
        ("tt0103064", "Terminator 2: Judgment Day", "It's nothing personal.", 1991),
        ("tt0133093", "The Matrix", "Welcome to the real world.", 1999),
        ("tt0113277", "Heat", "A Los Angeles crime saga.", 1995),
        (
            "tt0110912",
            "Pulp Fiction",
            "Just because you are a character doesn't mean you have character.",
            1994,
        ),
        (
            "tt0062622",
            "2001: A Space Odyssey",
            "An epic drama of adventure and exploration.",
            1968,
        ),
        (
            "tt0816692",
            "Interstellar",
            "Mankind was born on Earth. It was never meant to die here.",
            2014,
        ),
    ]
    .into_iter()
    .map(|(id, title, tagline, year)| {
        Item::new(id, title)
            .with_description(format!("{year} · {tagline}"))
            .with_image(format!("https://img.cinelog.test/posters/{id}.jpg"))
    })
    .collect()
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the query text.
    Type(String),
    /// Select the n-th result (1-based).
    Pick(usize),
    /// Deselect the n-th selected movie (1-based).
    Drop(usize),
    /// Clear the input, keeping the selection.
    Clear,
    /// Clear the input and the selection.
    ClearAll,
    /// Leave the demo.
    Quit,
    /// Unrecognised `:` command.
    Unknown(String),
}

impl Command {
    /// Parse a line. Anything not starting with `:` is query text.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(command) = line.strip_prefix(':') else {
            return Self::Type(line.to_string());
        };

        let mut parts = command.split_whitespace();
        let index =
            |arg: Option<&str>| arg.and_then(|n| n.parse::<usize>().ok()).filter(|n| *n > 0);
        let unknown = || Self::Unknown(line.to_string());

        match (parts.next(), parts.next()) {
            (Some("pick" | "p"), arg) => index(arg).map_or_else(unknown, Self::Pick),
            (Some("drop" | "d"), arg) => index(arg).map_or_else(unknown, Self::Drop),
            (Some("clear"), None) => Self::Clear,
            (Some("clear-all"), None) => Self::ClearAll,
            (Some("quit" | "q"), None) => Self::Quit,
            _ => unknown(),
        }
    }
}
