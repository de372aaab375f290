//! Per-player zone store.
//!
//! A `ZoneStore` is the whole persisted record of one player: the five
//! zone sequences, the move history, and the RNG checkpoints needed to
//! replay that history. Zone sequences are `im::Vector`s, so copying a
//! store before a transition is O(1) and a failed transition simply drops
//! the copy.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::zone::{Zone, ZonePosition};
use crate::core::identity::{CardIdentity, CardIdentityMap};
use crate::core::player::PlayerKey;
use crate::core::rng::GameRngState;

/// The five zone sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zones {
    pub library: Vector<CardIdentity>,
    pub hand: Vector<CardIdentity>,
    pub board: Vector<CardIdentity>,
    pub graveyard: Vector<CardIdentity>,
    pub exile: Vector<CardIdentity>,
}

impl Zones {
    /// Borrow one zone.
    #[must_use]
    pub fn get(&self, zone: Zone) -> &Vector<CardIdentity> {
        match zone {
            Zone::Library => &self.library,
            Zone::Hand => &self.hand,
            Zone::Board => &self.board,
            Zone::Graveyard => &self.graveyard,
            Zone::Exile => &self.exile,
        }
    }

    /// Mutably borrow one zone.
    pub fn get_mut(&mut self, zone: Zone) -> &mut Vector<CardIdentity> {
        match zone {
            Zone::Library => &mut self.library,
            Zone::Hand => &mut self.hand,
            Zone::Board => &mut self.board,
            Zone::Graveyard => &mut self.graveyard,
            Zone::Exile => &mut self.exile,
        }
    }

    /// Find the zone and index holding `identity`.
    ///
    /// Zones are searched in `Zone::ALL` order; the first hit wins.
    #[must_use]
    pub fn locate(&self, identity: CardIdentity) -> Option<(Zone, usize)> {
        Zone::ALL.into_iter().find_map(|zone| {
            self.get(zone)
                .index_of(&identity)
                .map(|index| (zone, index))
        })
    }

    /// Remove `identity` from whichever zone holds it.
    ///
    /// Returns where it was, or `None` if no zone held it.
    pub fn take(&mut self, identity: CardIdentity) -> Option<(Zone, usize)> {
        let (zone, index) = self.locate(identity)?;
        self.get_mut(zone).remove(index);
        Some((zone, index))
    }

    /// Remove the first occurrence of `identity`; `true` if one was removed.
    pub fn remove_by_identity(&mut self, identity: CardIdentity) -> bool {
        self.take(identity).is_some()
    }

    /// Insert into `zone` at `position`; returns the index used.
    pub fn insert(&mut self, identity: CardIdentity, zone: Zone, position: ZonePosition) -> usize {
        let cards = self.get_mut(zone);
        let index = position.resolve(cards.len());
        cards.insert(index, identity);
        index
    }

    /// Every identity across all zones, zone by zone.
    pub fn identities(&self) -> impl Iterator<Item = CardIdentity> + '_ {
        Zone::ALL
            .into_iter()
            .flat_map(move |zone| self.get(zone).iter().copied())
    }

    /// Total number of cards across all zones.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        Zone::ALL.into_iter().map(|zone| self.get(zone).len()).sum()
    }

    /// Check that no identity appears twice across the zones.
    #[must_use]
    pub fn is_partition(&self) -> bool {
        let mut seen = rustc_hash::FxHashSet::default();
        self.identities().all(|id| seen.insert(id))
    }
}

/// Persisted state of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStore {
    /// Player this record belongs to.
    pub player: PlayerKey,

    /// Current zone contents.
    pub zones: Zones,

    /// Accepted state-changing commands, oldest first.
    pub history: Vector<String>,

    /// RNG position for the next shuffle.
    pub rng: GameRngState,

    /// Zones right after the deck load.
    pub opening: Zones,

    /// RNG position right after the deck load.
    pub opening_rng: GameRngState,
}

impl ZoneStore {
    /// Deal a freshly shuffled pool: the first `hand_size` identities go to
    /// hand, the rest to the library in the same order.
    #[must_use]
    pub fn deal(
        player: PlayerKey,
        shuffled: &[CardIdentity],
        hand_size: usize,
        rng: GameRngState,
    ) -> Self {
        let split = hand_size.min(shuffled.len());
        let zones = Zones {
            hand: shuffled[..split].iter().copied().collect(),
            library: shuffled[split..].iter().copied().collect(),
            ..Zones::default()
        };

        Self {
            player,
            opening: zones.clone(),
            opening_rng: rng.clone(),
            zones,
            history: Vector::new(),
            rng,
        }
    }

    /// Borrow one zone's cards in order.
    #[must_use]
    pub fn zone(&self, zone: Zone) -> &Vector<CardIdentity> {
        self.zones.get(zone)
    }

    /// Zone holding `identity`, if any.
    #[must_use]
    pub fn zone_of(&self, identity: CardIdentity) -> Option<Zone> {
        self.zones.locate(identity).map(|(zone, _)| zone)
    }

    /// Check a loaded record against the zone invariants.
    ///
    /// Both the live and the opening zones must hold each card once, hold
    /// the same cards, and every card must be minted in `identities`.
    #[must_use]
    pub fn is_consistent(&self, identities: &CardIdentityMap) -> bool {
        if !self.zones.is_partition() || !self.opening.is_partition() {
            return false;
        }
        let mut live: Vec<_> = self.zones.identities().collect();
        let mut opening: Vec<_> = self.opening.identities().collect();
        live.sort_unstable();
        opening.sort_unstable();
        live == opening && live.iter().all(|&id| identities.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u32]) -> Vec<CardIdentity> {
        raw.iter().copied().map(CardIdentity).collect()
    }

    #[test]
    fn test_deal_splits_hand_and_library() {
        let store = ZoneStore::deal(
            PlayerKey::new("p"),
            &ids(&[5, 3, 9, 1, 2, 8, 7, 4, 6]),
            7,
            GameRngState::default(),
        );

        assert_eq!(store.zones.hand.len(), 7);
        assert_eq!(store.zones.library, Vector::from(ids(&[4, 6])));
        assert!(store.zones.board.is_empty());
        assert!(store.history.is_empty());
        assert_eq!(store.opening, store.zones);
    }

    #[test]
    fn test_deal_short_pool() {
        let store = ZoneStore::deal(PlayerKey::new("p"), &ids(&[1, 2]), 7, GameRngState::default());
        assert_eq!(store.zones.hand.len(), 2);
        assert!(store.zones.library.is_empty());
    }

    #[test]
    fn test_locate_and_take() {
        let mut zones = Zones::default();
        zones.insert(CardIdentity(1), Zone::Board, ZonePosition::Bottom);
        zones.insert(CardIdentity(2), Zone::Board, ZonePosition::Bottom);
        zones.insert(CardIdentity(3), Zone::Exile, ZonePosition::Top);

        assert_eq!(zones.locate(CardIdentity(2)), Some((Zone::Board, 1)));
        assert_eq!(zones.take(CardIdentity(2)), Some((Zone::Board, 1)));
        assert_eq!(zones.locate(CardIdentity(2)), None);
        assert!(!zones.remove_by_identity(CardIdentity(2)));
        assert!(zones.remove_by_identity(CardIdentity(3)));
        assert_eq!(zones.total_cards(), 1);
    }

    #[test]
    fn test_insert_positions() {
        let mut zones = Zones::default();
        zones.insert(CardIdentity(1), Zone::Library, ZonePosition::Bottom);
        zones.insert(CardIdentity(2), Zone::Library, ZonePosition::Top);
        zones.insert(CardIdentity(3), Zone::Library, ZonePosition::Index(1));
        let index = zones.insert(CardIdentity(4), Zone::Library, ZonePosition::Index(50));

        assert_eq!(index, 3);
        assert_eq!(zones.library, Vector::from(ids(&[2, 3, 1, 4])));
    }

    #[test]
    fn test_partition_check() {
        let mut zones = Zones::default();
        zones.insert(CardIdentity(1), Zone::Hand, ZonePosition::Bottom);
        zones.insert(CardIdentity(2), Zone::Board, ZonePosition::Bottom);
        assert!(zones.is_partition());

        zones.insert(CardIdentity(1), Zone::Exile, ZonePosition::Bottom);
        assert!(!zones.is_partition());
    }

    fn minted(n: u32) -> CardIdentityMap {
        let mut map = CardIdentityMap::new();
        for _ in 0..n {
            map.mint("Forest").unwrap();
        }
        map
    }

    #[test]
    fn test_consistency_checks() {
        let store = ZoneStore::deal(PlayerKey::new("p"), &ids(&[1, 2, 3]), 2, GameRngState::default());
        assert!(store.is_consistent(&minted(3)));
        assert!(!store.is_consistent(&minted(2)));

        let mut doubled = store.clone();
        doubled.zones.board.push_back(CardIdentity(1));
        assert!(!doubled.is_consistent(&minted(3)));

        let mut lost = store.clone();
        lost.zones.hand.pop_back();
        assert!(!lost.is_consistent(&minted(3)));

        let mut bad_opening = store;
        bad_opening.opening.exile.push_back(CardIdentity(2));
        assert!(!bad_opening.is_consistent(&minted(3)));
    }

    #[test]
    fn test_json_roundtrip_preserves_order() {
        let mut store = ZoneStore::deal(
            PlayerKey::new("p"),
            &ids(&[9, 8, 7, 6, 5, 4, 3, 2, 1]),
            7,
            GameRngState { seed: 3, word_pos: 64 },
        );
        store.history.push_back("DRAW".to_string());
        store.history.push_back("PLAY 9".to_string());

        let json = serde_json::to_string(&store).unwrap();
        let back: ZoneStore = serde_json::from_str(&json).unwrap();

        assert_eq!(back, store);
        assert_eq!(back.history.iter().collect::<Vec<_>>(), vec!["DRAW", "PLAY 9"]);
    }
}
