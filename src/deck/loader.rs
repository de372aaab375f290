//! Deck loading: decklist → identities → shuffled opening zones.

use log::info;

use super::decklist::Decklist;
use crate::core::error::Result;
use crate::core::identity::{CardIdentity, CardIdentityMap};
use crate::core::player::PlayerKey;
use crate::core::rng::GameRng;
use crate::zones::ZoneStore;

/// Turns parsed decklists into fresh zone stores.
///
/// The loader borrows the identity allocator; it never owns global state.
pub struct DeckLoader<'a> {
    identities: &'a mut CardIdentityMap,
    hand_size: usize,
}

impl<'a> DeckLoader<'a> {
    #[must_use]
    pub fn new(identities: &'a mut CardIdentityMap, hand_size: usize) -> Self {
        Self { identities, hand_size }
    }

    /// Mint one identity per card, shuffle, and deal the opening hand.
    ///
    /// Decks shorter than the hand size deal everything to hand and leave
    /// the library empty. On error nothing has been minted.
    pub fn load(&mut self, player: PlayerKey, decklist: &Decklist, rng: &mut GameRng) -> Result<ZoneStore> {
        decklist.validate()?;
        let names = decklist.expand();
        let mut pool: Vec<CardIdentity> = self.identities.mint_all(names.as_slice())?;
        rng.shuffle(&mut pool);

        info!(
            "{}: loaded {} cards (ids {}..={})",
            player,
            pool.len(),
            pool.iter().min().map_or(0, |id| id.raw()),
            pool.iter().max().map_or(0, |id| id.raw()),
        );
        Ok(ZoneStore::deal(player, &pool, self.hand_size, rng.state()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::TableError;
    use crate::deck::decklist::DeckEntry;
    use crate::zones::Zone;

    fn decklist(entries: &[(&str, u32)]) -> Decklist {
        Decklist {
            entries: entries
                .iter()
                .map(|&(name, count)| DeckEntry { name: name.to_string(), count })
                .collect(),
        }
    }

    #[test]
    fn test_load_sixty() {
        let mut map = CardIdentityMap::new();
        let mut rng = GameRng::new(5);
        let deck = decklist(&[("Forest", 24), ("Grizzly Bears", 36)]);

        let store = DeckLoader::new(&mut map, 7).load(PlayerKey::new("green"), &deck, &mut rng).unwrap();

        assert_eq!(store.zone(Zone::Hand).len(), 7);
        assert_eq!(store.zone(Zone::Library).len(), 53);
        assert!(store.zone(Zone::Board).is_empty());
        assert!(store.zone(Zone::Graveyard).is_empty());
        assert!(store.zone(Zone::Exile).is_empty());
        assert!(store.history.is_empty());
        assert_eq!(map.len(), 60);

        let mut names: Vec<_> = store
            .zones
            .identities()
            .map(|id| map.resolve(id).unwrap().to_string())
            .collect();
        names.sort();
        let mut expected = deck.expand();
        expected.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_short_deck_cannot_draw() {
        let mut map = CardIdentityMap::new();
        let mut rng = GameRng::new(1);
        let deck = decklist(&[("Forest", 2), ("Bear", 1)]);

        let mut store = DeckLoader::new(&mut map, 7).load(PlayerKey::new("tiny"), &deck, &mut rng).unwrap();

        assert_eq!(map.resolve(CardIdentity(1)).unwrap(), "Forest");
        assert_eq!(map.resolve(CardIdentity(2)).unwrap(), "Forest");
        assert_eq!(map.resolve(CardIdentity(3)).unwrap(), "Bear");
        assert_eq!(store.zone(Zone::Hand).len(), 3);
        assert!(store.zone(Zone::Library).is_empty());
        assert!(store.apply(crate::zones::Transition::Draw).is_err());
    }

    #[test]
    fn test_exhausted_identities_mint_nothing() {
        let mut map = CardIdentityMap::new();
        map.bind(CardIdentity(u32::MAX), "Plains").unwrap();
        let mut rng = GameRng::new(3);
        let before = rng.state();

        let result = DeckLoader::new(&mut map, 7).load(PlayerKey::new("g"), &decklist(&[("Forest", 8)]), &mut rng);

        assert!(matches!(result, Err(TableError::IdentitiesExhausted { needed: 8 })));
        assert_eq!(map.len(), 1);
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn test_oversized_decklist_rejected() {
        let mut map = CardIdentityMap::new();
        let mut rng = GameRng::new(3);

        let result = DeckLoader::new(&mut map, 7).load(
            PlayerKey::new("g"),
            &decklist(&[("Forest", 3_000_000_000), ("Forest", 3_000_000_000)]),
            &mut rng,
        );

        assert!(matches!(result, Err(TableError::DeckTooLarge { .. })));
        assert!(map.is_empty());
    }

    #[test]
    fn test_second_load_mints_after_first() {
        let mut map = CardIdentityMap::new();
        let mut rng = GameRng::new(1);
        let deck = decklist(&[("Island", 10)]);

        let first = DeckLoader::new(&mut map, 7).load(PlayerKey::new("a"), &deck, &mut rng).unwrap();
        let second = DeckLoader::new(&mut map, 7).load(PlayerKey::new("b"), &deck, &mut rng).unwrap();

        assert!(first.zones.identities().all(|id| id.raw() <= 10));
        assert!(second.zones.identities().all(|id| (11..=20).contains(&id.raw())));
    }
}
