//! Zone system for card locations.
//!
//! Every player has the same five zones: library, hand, board, graveyard
//! and exile. Each is an ordered sequence of card identities, and together
//! they partition the player's cards.
//!
//! ## Key Types
//!
//! - `Zone`: Zone name
//! - `ZonePosition`: Insertion position (top, bottom, index)
//! - `ZoneStore`: One player's persisted record
//! - `Transition`: The state-changing operations on a `ZoneStore`

pub mod engine;
pub mod store;
pub mod zone;

pub use engine::{Applied, Transition};
pub use store::{ZoneStore, Zones};
pub use zone::{Zone, ZonePosition};
