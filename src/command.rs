//! Command tokenizer
//!
//! A raw line becomes a verb (the first word, lowercased) and the rest of the
//! words as one argument string. Direction words double as movement commands.

use serde::Deserialize;
use std::fmt;

/// Verbs whose responses come from the narrative rule book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeVerb {
    Examine,
    Sit,
    Jump,
    Poke,
}

impl fmt::Display for NarrativeVerb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let word = match self {
            NarrativeVerb::Examine => "examine",
            NarrativeVerb::Sit => "sit",
            NarrativeVerb::Jump => "jump",
            NarrativeVerb::Poke => "poke",
        };
        write!(f, "{}", word)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Look,
    /// `go <dir>`; the direction is in the argument
    Go,
    /// A bare direction word, already expanded
    Move(String),
    Inventory,
    Take,
    Drop,
    Narrative(NarrativeVerb),
    Help,
    Clear,
    Quit,
    Unknown(String),
}

/// Full direction names accepted as bare commands
pub const DIRECTIONS: &[&str] = &[
    "north",
    "south",
    "east",
    "west",
    "northeast",
    "northwest",
    "southeast",
    "southwest",
    "up",
    "down",
];

/// Expand a direction abbreviation; other words pass through unchanged
pub fn expand_direction(word: &str) -> &str {
    match word {
        "n" => "north",
        "s" => "south",
        "e" => "east",
        "w" => "west",
        "ne" => "northeast",
        "nw" => "northwest",
        "se" => "southeast",
        "sw" => "southwest",
        "u" => "up",
        "d" => "down",
        other => other,
    }
}

impl Verb {
    pub fn from_word(word: &str) -> Verb {
        match word {
            "look" => Verb::Look,
            "go" => Verb::Go,
            "inventory" | "inv" | "bag" | "i" => Verb::Inventory,
            "take" => Verb::Take,
            "drop" | "leave" => Verb::Drop,
            "examine" => Verb::Narrative(NarrativeVerb::Examine),
            "sit" => Verb::Narrative(NarrativeVerb::Sit),
            "jump" => Verb::Narrative(NarrativeVerb::Jump),
            "poke" => Verb::Narrative(NarrativeVerb::Poke),
            "help" => Verb::Help,
            "clear" => Verb::Clear,
            "quit" => Verb::Quit,
            other => {
                let dir = expand_direction(other);
                if DIRECTIONS.contains(&dir) {
                    Verb::Move(dir.to_string())
                } else {
                    Verb::Unknown(other.to_string())
                }
            }
        }
    }
}

/// One tokenized line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// The normalized input, as echoed back
    pub raw: String,
    pub verb: Verb,
    /// Remaining words joined by single spaces; may be empty
    pub arg: String,
}

impl Command {
    /// Trim, lowercase and split a line; None for blank input
    pub fn parse(input: &str) -> Option<Command> {
        let raw = input.trim().to_lowercase();
        let mut words = raw.split_whitespace();
        let first = words.next()?;
        let verb = Verb::from_word(first);
        let arg = words.collect::<Vec<_>>().join(" ");
        Some(Command { raw, verb, arg })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn blank_input_is_not_a_command() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   \t "), None);
    }

    #[test]
    fn lowercases_and_splits_argument() {
        let cmd = Command::parse("  TAKE  Rusty   Key ").unwrap();
        assert_eq!(cmd.verb, Verb::Take);
        assert_eq!(cmd.arg, "rusty key");
        assert_eq!(cmd.raw, "take  rusty   key");
    }

    #[test]
    fn direction_words_and_abbreviations_move() {
        assert_eq!(Verb::from_word("east"), Verb::Move("east".into()));
        assert_eq!(Verb::from_word("ne"), Verb::Move("northeast".into()));
        assert_eq!(Verb::from_word("u"), Verb::Move("up".into()));
        assert_eq!(Verb::from_word("d"), Verb::Move("down".into()));
        assert_eq!(expand_direction("d"), "down");
        assert_eq!(Command::parse("go w").unwrap().verb, Verb::Go);
    }

    #[test]
    fn aliases_share_handlers() {
        assert_eq!(Verb::from_word("inv"), Verb::Inventory);
        assert_eq!(Verb::from_word("bag"), Verb::Inventory);
        assert_eq!(Verb::from_word("leave"), Verb::Drop);
        assert_eq!(
            Verb::from_word("poke"),
            Verb::Narrative(NarrativeVerb::Poke)
        );
    }

    #[test]
    fn anything_else_is_unknown() {
        assert_eq!(Verb::from_word("asdf"), Verb::Unknown("asdf".into()));
        assert_eq!(expand_direction("portal"), "portal");
    }
}
