//! Zone transitions.
//!
//! A `Transition` is the only way zones change after a deck load:
//! - `Draw`: library top → end of hand
//! - `Play(id)`: hand → end of board
//! - `Put { id, zone, position }`: wherever it is → `zone` at `position`
//! - `Shuffle(zone)`: uniform permutation of one zone
//!
//! `ZoneStore::apply` is all-or-nothing. The step runs against a copy of
//! the zones and RNG; the store is only updated, and the transition only
//! appended to the history, when the step succeeds.

use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use super::store::{ZoneStore, Zones};
use super::zone::{Zone, ZonePosition};
use crate::core::error::{Result, TableError};
use crate::core::identity::CardIdentity;
use crate::core::rng::GameRng;

/// A state-changing zone operation.
///
/// `Display` gives the canonical command text stored in history, and
/// `FromStr` parses it back for replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Draw,
    Play(CardIdentity),
    Put {
        identity: CardIdentity,
        zone: Zone,
        position: ZonePosition,
    },
    Shuffle(Zone),
}

/// What a successful transition did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// A card moved; `index` is its new position in `to`.
    Moved {
        identity: CardIdentity,
        from: Zone,
        to: Zone,
        index: usize,
    },
    /// A zone was shuffled.
    Shuffled { zone: Zone, cards: usize },
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::Draw => f.write_str("DRAW"),
            Transition::Play(id) => write!(f, "PLAY {}", id),
            Transition::Put { identity, zone, position } => {
                write!(f, "PUT {} {} {}", identity, zone, position)
            }
            Transition::Shuffle(zone) => write!(f, "SHUFFLE {}", zone),
        }
    }
}

impl std::fmt::Display for Applied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Applied::Moved { identity, from, to, index } => {
                write!(f, "Card {}: {} -> {} (position {})", identity, from, to, index)
            }
            Applied::Shuffled { zone, cards } => write!(f, "Shuffled {} ({} cards)", zone, cards),
        }
    }
}

impl FromStr for Transition {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let verb = words.first().map(|w| w.to_ascii_uppercase()).unwrap_or_default();
        let identity = |i: usize| -> Result<CardIdentity> {
            words
                .get(i)
                .ok_or_else(|| TableError::ParseCommand(format!("{}: missing card id", verb)))?
                .parse::<u32>()
                .map(CardIdentity)
                .map_err(|_| TableError::ParseCommand(format!("{}: bad card id", verb)))
        };
        let zone = |i: usize| -> Result<Zone> {
            words
                .get(i)
                .ok_or_else(|| TableError::ParseCommand(format!("{}: missing zone", verb)))?
                .parse()
        };

        match (verb.as_str(), words.len()) {
            ("DRAW", 1) => Ok(Transition::Draw),
            ("PLAY", 2) => Ok(Transition::Play(identity(1)?)),
            ("PUT", 3) | ("PUT", 4) => {
                // Zone first: an unknown zone fails before the id is read.
                let zone = zone(2)?;
                let position = match words.get(3) {
                    Some(p) => p.parse()?,
                    None => ZonePosition::Top,
                };
                Ok(Transition::Put {
                    identity: identity(1)?,
                    zone,
                    position,
                })
            }
            ("SHUFFLE", 2) => Ok(Transition::Shuffle(zone(1)?)),
            _ => Err(TableError::ParseCommand(s.trim().to_string())),
        }
    }
}

/// Run one transition against `zones`.
///
/// On `Err` the caller must discard `zones` and `rng`; they may be
/// partially updated.
fn step(zones: &mut Zones, rng: &mut GameRng, transition: Transition) -> Result<Applied> {
    match transition {
        Transition::Draw => {
            let identity = zones.library.pop_front().ok_or(TableError::EmptyLibrary)?;
            zones.hand.push_back(identity);
            Ok(Applied::Moved {
                identity,
                from: Zone::Library,
                to: Zone::Hand,
                index: zones.hand.len() - 1,
            })
        }
        Transition::Play(identity) => {
            let found = zones.locate(identity);
            match found {
                Some((Zone::Hand, index)) => {
                    zones.hand.remove(index);
                    zones.board.push_back(identity);
                    Ok(Applied::Moved {
                        identity,
                        from: Zone::Hand,
                        to: Zone::Board,
                        index: zones.board.len() - 1,
                    })
                }
                _ => Err(TableError::NotInZone {
                    identity,
                    expected: Some(Zone::Hand),
                    found: found.map(|(zone, _)| zone),
                }),
            }
        }
        Transition::Put { identity, zone, position } => {
            let (from, _) = zones.take(identity).ok_or(TableError::NotInZone {
                identity,
                expected: None,
                found: None,
            })?;
            let index = zones.insert(identity, zone, position);
            Ok(Applied::Moved { identity, from, to: zone, index })
        }
        Transition::Shuffle(zone) => {
            let cards = zones.get_mut(zone);
            if cards.len() > 1 {
                let mut order: Vec<CardIdentity> = cards.iter().copied().collect();
                rng.shuffle(&mut order);
                *cards = order.into_iter().collect();
            }
            Ok(Applied::Shuffled { zone, cards: cards.len() })
        }
    }
}

impl ZoneStore {
    /// Apply a transition atomically and log it to history.
    pub fn apply(&mut self, transition: Transition) -> Result<Applied> {
        let mut zones = self.zones.clone();
        let mut rng = GameRng::from_state(&self.rng);

        let applied = step(&mut zones, &mut rng, transition)?;

        self.zones = zones;
        self.rng = rng.state();
        self.history.push_back(transition.to_string());
        debug!("{}: {} -> {:?}", self.player, transition, applied);
        Ok(applied)
    }

    /// Rebuild the zones by re-running the history from the opening state.
    ///
    /// Shuffles replay identically because the opening RNG state is kept.
    pub fn replay(&self) -> Result<Zones> {
        let mut zones = self.opening.clone();
        let mut rng = GameRng::from_state(&self.opening_rng);
        for entry in &self.history {
            step(&mut zones, &mut rng, entry.parse()?)?;
        }
        Ok(zones)
    }
}
