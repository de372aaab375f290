//! Core types: card identities, players, configuration, commands, errors, RNG.
//!
//! Everything else in the crate is built from these.

pub mod command;
pub mod config;
pub mod error;
pub mod identity;
pub mod player;
pub mod rng;

pub use command::{Command, Filters};
pub use config::{file_stem, TableConfig, DEFAULT_HAND_SIZE, DEFAULT_SIDEBOARD_MARKER};
pub use error::{Result, TableError};
pub use identity::{CardIdentity, CardIdentityMap};
pub use player::PlayerKey;
pub use rng::{GameRng, GameRngState};
