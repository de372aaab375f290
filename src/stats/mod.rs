//! Deck statistics engine.
//!
//! Pure analysis of a decklist against reference data: per-card
//! frequencies, the mana curve by type category, and color symbol shares.

pub mod report;

pub use report::{analyze, CardFrequency, ColorShare, CurveRow, DeckReport, TypeCategory, COLOR_SYMBOLS};
