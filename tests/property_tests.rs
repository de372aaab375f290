//! Property tests for deck loading and zone transitions.

use proptest::prelude::*;

use mtg_table::{
    CardIdentity, CardIdentityMap, DeckEntry, DeckLoader, Decklist, GameRng, PlayerKey,
    Transition, Zone, ZonePosition, ZoneStore,
};

fn decklist(counts: &[u32]) -> Decklist {
    Decklist {
        entries: counts
            .iter()
            .enumerate()
            .map(|(i, &count)| DeckEntry { name: format!("Card {}", i), count })
            .collect(),
    }
}

fn zone() -> impl Strategy<Value = Zone> {
    prop::sample::select(Zone::ALL.to_vec())
}

fn position() -> impl Strategy<Value = ZonePosition> {
    prop_oneof![
        Just(ZonePosition::Top),
        Just(ZonePosition::Bottom),
        (0usize..80).prop_map(ZonePosition::Index),
    ]
}

/// Card ids drawn from a range a little wider than the deck, so some
/// transitions name cards that do not exist.
fn transition() -> impl Strategy<Value = Transition> {
    prop_oneof![
        Just(Transition::Draw),
        (1u32..70).prop_map(|id| Transition::Play(CardIdentity(id))),
        (1u32..70, zone(), position()).prop_map(|(id, zone, position)| Transition::Put {
            identity: CardIdentity(id),
            zone,
            position,
        }),
        zone().prop_map(Transition::Shuffle),
    ]
}

fn loaded(counts: &[u32], seed: u64) -> (CardIdentityMap, ZoneStore) {
    let mut identities = CardIdentityMap::new();
    let mut rng = GameRng::new(seed);
    let store = DeckLoader::new(&mut identities, 7).load(PlayerKey::new("p"), &decklist(counts), &mut rng)
        .unwrap();
    (identities, store)
}

fn sorted_ids(store: &ZoneStore) -> Vec<CardIdentity> {
    let mut ids: Vec<_> = store.zones.identities().collect();
    ids.sort();
    ids
}

proptest! {
    #[test]
    fn prop_load_sizes(counts in prop::collection::vec(1u32..5, 0..15), seed in any::<u64>()) {
        let (identities, store) = loaded(&counts, seed);
        let n: usize = counts.iter().map(|&c| c as usize).sum();

        prop_assert_eq!(store.zone(Zone::Hand).len(), n.min(7));
        prop_assert_eq!(store.zone(Zone::Library).len(), n.saturating_sub(7));
        prop_assert!(store.zone(Zone::Board).is_empty());
        prop_assert_eq!(identities.len(), n);

        let expected: Vec<_> = (1..=n as u32).map(CardIdentity).collect();
        prop_assert_eq!(sorted_ids(&store), expected);
    }

    #[test]
    fn prop_transitions_keep_partition(
        seed in any::<u64>(),
        moves in prop::collection::vec(transition(), 0..60),
    ) {
        let (_, mut store) = loaded(&[20, 20, 20], seed);
        let before = sorted_ids(&store);
        let mut accepted = 0;

        for transition in moves {
            let snapshot = store.clone();
            match store.apply(transition) {
                Ok(_) => accepted += 1,
                Err(_) => prop_assert_eq!(&store, &snapshot),
            }
            prop_assert!(store.zones.is_partition());
            prop_assert_eq!(store.zones.total_cards(), 60);
        }

        prop_assert_eq!(sorted_ids(&store), before);
        prop_assert_eq!(store.history.len(), accepted);
        prop_assert_eq!(store.replay().unwrap(), store.zones.clone());
    }

    #[test]
    fn prop_history_text_parses_back(transition in transition()) {
        let text = transition.to_string();
        prop_assert_eq!(text.parse::<Transition>().unwrap(), transition);
    }
}
