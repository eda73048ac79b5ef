//! Ticket record and deck selection

use serde::{Deserialize, Serialize};
use std::fmt;
use template::choice_matches;

/// Passenger and trip details for one ticket
///
/// All fields are free-form text exactly as entered on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub passenger_name: String,
    pub date: String,
    pub from_location: String,
    pub to_location: String,
    pub dep_time: String,
    /// Raw deck value; see [`Deck::parse`]
    pub deck: String,
    pub seat_no: String,
    pub price: String,
}

impl TicketRecord {
    /// Selected deck, if the raw value names one
    pub fn deck(&self) -> Option<Deck> {
        Deck::parse(&self.deck)
    }
}

/// Ferry deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deck {
    Upper,
    Main,
    Lower,
}

impl Deck {
    pub const ALL: [Deck; 3] = [Deck::Upper, Deck::Main, Deck::Lower];

    /// Case-insensitive match, ignoring surrounding whitespace.
    ///
    /// Uses the same rule the layout's deck checkboxes are selected by.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|deck| choice_matches(deck.as_str(), value))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Deck::Upper => "UPPER",
            Deck::Main => "MAIN",
            Deck::Lower => "LOWER",
        }
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_parse_case_insensitive() {
        for value in ["upper", "Upper", "UPPER", "  uPPer\t"] {
            assert_eq!(Deck::parse(value), Some(Deck::Upper));
        }
        assert_eq!(Deck::parse("main"), Some(Deck::Main));
        assert_eq!(Deck::parse("Lower"), Some(Deck::Lower));
    }

    #[test]
    fn test_deck_parse_unknown() {
        assert_eq!(Deck::parse(""), None);
        assert_eq!(Deck::parse("middle"), None);
        assert_eq!(Deck::parse("UPPER DECK"), None);
    }

    #[test]
    fn test_record_serializes_field_names() {
        let record = TicketRecord {
            deck: "main".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["deck"], "main");
        assert!(value.get("passenger_name").is_some());
        assert_eq!(record.deck(), Some(Deck::Main));
    }
}
