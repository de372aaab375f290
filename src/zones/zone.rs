//! The five zones and insertion positions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::TableError;

/// One of the five zones partitioning a player's cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Library,
    Hand,
    Board,
    Graveyard,
    Exile,
}

impl Zone {
    /// Every zone, in search order.
    ///
    /// Lookups by identity scan zones in this order and stop at the first hit.
    pub const ALL: [Zone; 5] = [
        Zone::Library,
        Zone::Hand,
        Zone::Board,
        Zone::Graveyard,
        Zone::Exile,
    ];

    /// Lowercase name used in commands and history.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Zone::Library => "library",
            Zone::Hand => "hand",
            Zone::Board => "board",
            Zone::Graveyard => "graveyard",
            Zone::Exile => "exile",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Zone {
    type Err = TableError;

    /// Case-insensitive zone name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Zone::ALL
            .into_iter()
            .find(|zone| zone.name() == lower)
            .ok_or_else(|| TableError::InvalidZone(s.trim().to_string()))
    }
}

/// Position for inserting a card into a zone.
///
/// Index 0 is the top (front) of a zone; for the library that is the next
/// card drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Front of the zone.
    Top,
    /// End of the zone.
    Bottom,
    /// Specific index, clamped to the zone length.
    Index(usize),
}

impl ZonePosition {
    /// Concrete insertion index for a zone currently holding `len` cards.
    #[must_use]
    pub fn resolve(self, len: usize) -> usize {
        match self {
            ZonePosition::Top => 0,
            ZonePosition::Bottom => len,
            ZonePosition::Index(i) => i.min(len),
        }
    }
}

impl Default for ZonePosition {
    fn default() -> Self {
        ZonePosition::Top
    }
}

impl std::fmt::Display for ZonePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZonePosition::Top => f.write_str("top"),
            ZonePosition::Bottom => f.write_str("bottom"),
            ZonePosition::Index(i) => write!(f, "{}", i),
        }
    }
}

impl FromStr for ZonePosition {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(ZonePosition::Top),
            "bottom" => Ok(ZonePosition::Bottom),
            other => other
                .parse()
                .map(ZonePosition::Index)
                .map_err(|_| TableError::ParseCommand(format!("bad position: {}", s))),
        }
    }
}
