//! Decklist parsing.
//!
//! A deck file is plain text, one entry per line:
//!
//! ```text
//! 20 Forest
//! 4 Grizzly Bears
//! SIDEBOARD
//! 2 Naturalize
//! ```
//!
//! Lines that do not start with a count are ignored. A line equal to the
//! sideboard marker ends the main deck; nothing after it is read.
//! Decks over `MAX_DECK_SIZE` cards are rejected when read.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TableError};

/// Most cards a main deck may hold.
pub const MAX_DECK_SIZE: u64 = 10_000;

/// One `(card_name, count)` line of a decklist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub name: String,
    pub count: u32,
}

/// Main-deck entries in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decklist {
    pub entries: Vec<DeckEntry>,
}

impl Decklist {
    /// Parse decklist text, stopping at `sideboard_marker`.
    ///
    /// ```
    /// use mtg_table::deck::Decklist;
    ///
    /// let deck = Decklist::parse("2 Forest\n1 Bear\nSIDEBOARD\n3 Plains\n", "SIDEBOARD");
    /// assert_eq!(deck.expand(), vec!["Forest", "Forest", "Bear"]);
    /// ```
    #[must_use]
    pub fn parse(text: &str, sideboard_marker: &str) -> Self {
        let mut entries = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line == sideboard_marker {
                break;
            }
            let Some((count, name)) = line.split_once(char::is_whitespace) else {
                continue;
            };
            let (Ok(count), name) = (count.parse::<u32>(), name.trim()) else {
                continue;
            };
            if !name.is_empty() {
                entries.push(DeckEntry { name: name.to_string(), count });
            }
        }
        Self { entries }
    }

    /// Read and parse a deck file.
    ///
    /// Any failure to read the file is `DeckNotFound`; an oversized deck is
    /// `DeckTooLarge`.
    pub fn read(path: &Path, sideboard_marker: &str) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|_| TableError::DeckNotFound(path.display().to_string()))?;
        let deck = Self::parse(&text, sideboard_marker);
        deck.validate()?;
        Ok(deck)
    }

    /// Check the deck is within `MAX_DECK_SIZE`.
    pub fn validate(&self) -> Result<()> {
        let cards = self.size();
        if cards > MAX_DECK_SIZE {
            return Err(TableError::DeckTooLarge { cards, limit: MAX_DECK_SIZE });
        }
        Ok(())
    }

    /// One name per physical card, in decklist order.
    #[must_use]
    pub fn expand(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|e| std::iter::repeat(e.name.clone()).take(e.count as usize))
            .collect()
    }

    /// Total number of cards.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |total, e| total.saturating_add(u64::from(e.count)))
    }
}
