//! # mtg-table
//!
//! Deck loading, card identity mapping and per-player zone tracking for a
//! personal tabletop card game interpreter.
//!
//! ## Design Principles
//!
//! 1. **Identities, not names**: Every physical card loaded from a decklist
//!    gets a unique, never-reused `CardIdentity`. Zones hold identities; the
//!    shared `CardIdentityMap` turns them back into card names.
//!
//! 2. **Zones partition cards**: Each player has five ordered zones
//!    (library, hand, board, graveyard, exile). A card is in at most one.
//!
//! 3. **All-or-nothing moves**: A `Transition` either fully applies, and is
//!    appended to the player's history in the same write, or changes
//!    nothing.
//!
//! ## Architecture
//!
//! - **Whole-record persistence**: The identity map and each player's
//!   `ZoneStore` are JSON records, read fully and written back atomically.
//!   One process owns a data directory at a time (lock file).
//!
//! - **Persistent Data Structures**: Zone sequences are `im::Vector`s, so
//!   the copy a transition works on is O(1).
//!
//! - **Replayable history**: Each record keeps its opening zones and RNG
//!   state, so the history can be re-run to the same zones, shuffles
//!   included.
//!
//! ## Modules
//!
//! - `core`: Identities, players, configuration, commands, errors, RNG
//! - `zones`: Zones, the per-player store, and transitions
//! - `cards`: Card reference data
//! - `deck`: Decklist parsing and deck loading
//! - `stats`: Mana curve and color statistics
//! - `storage`: Records, snapshots and the directory lock
//! - `session`: The interpreter context tying it together

pub mod core;
pub mod zones;
pub mod cards;
pub mod deck;
pub mod stats;
pub mod storage;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CardIdentity, CardIdentityMap, Command, GameRng, GameRngState, PlayerKey,
    Result, TableConfig, TableError,
};

pub use crate::zones::{Applied, Transition, Zone, ZonePosition, ZoneStore, Zones};

pub use crate::cards::{CardData, CardLookup, CardRegistry};

pub use crate::deck::{DeckEntry, DeckLoader, Decklist};

pub use crate::stats::{analyze, DeckReport, TypeCategory};

pub use crate::storage::RecordStore;

pub use crate::session::{CardView, LoadSummary, Outcome, Session};
