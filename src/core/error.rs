//! Error type shared by every table operation.
//!
//! Domain failures (`EmptyLibrary`, `NotInZone`, ...) are local to the
//! command that raised them: the interpreter reports them and keeps going.
//! Persisted state is never written when an operation returns `Err`.

use std::fmt;
use std::io;
use std::path::PathBuf;

use super::identity::CardIdentity;
use super::player::PlayerKey;
use crate::zones::Zone;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, TableError>;

/// Everything that can go wrong while loading decks or moving cards.
#[derive(Debug)]
pub enum TableError {
    /// The named deck source does not exist or cannot be read.
    DeckNotFound(String),
    /// A card name is absent from the reference data.
    CardNotFound(String),
    /// The identity was never minted.
    UnknownIdentity(CardIdentity),
    /// `draw` with nothing left in the library.
    EmptyLibrary,
    /// The identity is not where the operation needs it.
    ///
    /// `found` is the zone actually holding it, if any.
    NotInZone {
        identity: CardIdentity,
        expected: Option<Zone>,
        found: Option<Zone>,
    },
    /// Zone name that is not one of the five zones.
    InvalidZone(String),
    /// A manual binding targeted an identity that already exists.
    IdentityTaken(CardIdentity),
    /// Minting `needed` more identities would run past `u32::MAX`.
    IdentitiesExhausted { needed: usize },
    /// A decklist holds more cards than a deck may have.
    DeckTooLarge { cards: u64, limit: u64 },
    /// The player already has a zone store; only a full reset removes it.
    PlayerExists(PlayerKey),
    /// No player record exists under this key.
    UnknownPlayer(PlayerKey),
    /// A player operation was issued before any player was selected.
    NoActivePlayer,
    /// No saved identity-map snapshot with this name.
    SnapshotNotFound(String),
    /// The command line could not be parsed.
    ParseCommand(String),
    /// Another process holds the data directory.
    StoreLocked(PathBuf),
    /// Filesystem failure.
    Io(io::Error),
    /// Record encoding or decoding failure.
    Serialization(String),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::DeckNotFound(deck) => write!(f, "No deck: {}", deck),
            TableError::CardNotFound(name) => write!(f, "Card not present: {}", name),
            TableError::UnknownIdentity(id) => write!(f, "Card ID not present: {}", id),
            TableError::EmptyLibrary => write!(f, "Library is empty"),
            TableError::NotInZone { identity, expected, found } => {
                match expected {
                    Some(zone) => write!(f, "Card {} is not in {}", identity, zone)?,
                    None => write!(f, "Card {} is not in any zone", identity)?,
                }
                if let Some(zone) = found {
                    write!(f, " (it is in {})", zone)?;
                }
                Ok(())
            }
            TableError::InvalidZone(name) => write!(f, "Unknown zone: {}", name),
            TableError::IdentityTaken(id) => write!(f, "Card ID already mapped: {}", id),
            TableError::IdentitiesExhausted { needed } => {
                write!(f, "No card IDs left to mint {} more cards", needed)
            }
            TableError::DeckTooLarge { cards, limit } => {
                write!(f, "Deck has {} cards; at most {} allowed", cards, limit)
            }
            TableError::PlayerExists(player) => {
                write!(f, "Player {} already loaded; CLEAR to start over", player)
            }
            TableError::UnknownPlayer(player) => write!(f, "No such player: {}", player),
            TableError::NoActivePlayer => write!(f, "No player selected; LOAD a deck or use PLAYER"),
            TableError::SnapshotNotFound(name) => write!(f, "No saved map: {}", name),
            TableError::ParseCommand(msg) => write!(f, "Bad command: {}", msg),
            TableError::StoreLocked(path) => {
                write!(f, "Data directory is locked by another process: {}", path.display())
            }
            TableError::Io(e) => write!(f, "I/O error: {}", e),
            TableError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TableError {
    fn from(e: io::Error) -> Self {
        TableError::Io(e)
    }
}

impl From<serde_json::Error> for TableError {
    fn from(e: serde_json::Error) -> Self {
        TableError::Serialization(e.to_string())
    }
}

impl From<bincode::Error> for TableError {
    fn from(e: bincode::Error) -> Self {
        TableError::Serialization(e.to_string())
    }
}
