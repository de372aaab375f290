//! Player identification.
//!
//! A player is keyed by a stable string derived from the deck it loaded.
//! The key doubles as the file stem of the player's record, so
//! `PlayerKey::from_deck_name` folds anything that is not filename-safe.

use serde::{Deserialize, Serialize};

use super::config::file_stem;

/// Stable external key of one player's zone store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerKey(String);

impl PlayerKey {
    /// Create a key from an already clean string.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Derive the key for a deck name.
    ///
    /// Strips a trailing `.deck` extension and replaces characters outside
    /// `[A-Za-z0-9_-]` with `_`.
    ///
    /// ```
    /// use mtg_table::core::PlayerKey;
    ///
    /// assert_eq!(PlayerKey::from_deck_name("mono red.deck").as_str(), "mono_red");
    /// ```
    #[must_use]
    pub fn from_deck_name(deck: &str) -> Self {
        Self(file_stem(deck.trim().trim_end_matches(".deck")))
    }

    /// Borrow the key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
