//! Decklists and deck loading.
//!
//! - `Decklist`: main-deck `(name, count)` entries parsed from a deck file
//! - `DeckLoader`: mints identities for a decklist and deals opening zones

pub mod decklist;
pub mod loader;

pub use decklist::{DeckEntry, Decklist, MAX_DECK_SIZE};
pub use loader::DeckLoader;
