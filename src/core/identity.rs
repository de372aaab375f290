//! Card identities and the allocator that mints them.
//!
//! Every physical card ever loaded gets a `CardIdentity`. Identities are
//! global across players and strictly increasing: the next one minted is
//! always one above the largest in the map, so an identity is never reused
//! even after its card leaves every zone.
//!
//! ## Usage
//!
//! ```
//! use mtg_table::core::{CardIdentity, CardIdentityMap};
//!
//! let mut map = CardIdentityMap::new();
//! let forest = map.mint("Forest")?;
//! let bear = map.mint("Grizzly Bears")?;
//!
//! assert_eq!(forest, CardIdentity(1));
//! assert_eq!(bear, CardIdentity(2));
//! assert_eq!(map.resolve(bear)?, "Grizzly Bears");
//! # Ok::<(), mtg_table::TableError>(())
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::{Result, TableError};

/// Unique identifier of one physical card instance.
///
/// Serialized as a bare integer so the identity map stays a plain
/// `{"1": "Forest", ...}` JSON object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardIdentity(pub u32);

impl CardIdentity {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardIdentity {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Append-only map from identity to card name, shared by all players.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardIdentityMap {
    entries: FxHashMap<CardIdentity, String>,
}

impl CardIdentityMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The identity the next `mint` will hand out.
    ///
    /// `None` once `u32::MAX` has been minted or bound.
    #[must_use]
    pub fn next_identity(&self) -> Option<CardIdentity> {
        match self.entries.keys().max() {
            Some(id) => id.0.checked_add(1).map(CardIdentity),
            None => Some(CardIdentity(1)),
        }
    }

    /// Allocate a fresh identity bound to `card_name`.
    pub fn mint(&mut self, card_name: impl Into<String>) -> Result<CardIdentity> {
        let id = self
            .next_identity()
            .ok_or(TableError::IdentitiesExhausted { needed: 1 })?;
        self.entries.insert(id, card_name.into());
        Ok(id)
    }

    /// Mint one identity per name, in order.
    ///
    /// Returns the identities parallel to `names`. The whole range is
    /// checked first: on `IdentitiesExhausted` nothing is minted.
    pub fn mint_all<S: AsRef<str>>(&mut self, names: &[S]) -> Result<Vec<CardIdentity>> {
        let exhausted = || TableError::IdentitiesExhausted { needed: names.len() };
        let Some(last_offset) = names.len().checked_sub(1) else {
            return Ok(Vec::new());
        };
        let first = self.next_identity().ok_or_else(exhausted)?.0;
        let span = u32::try_from(last_offset).map_err(|_| exhausted())?;
        first.checked_add(span).ok_or_else(exhausted)?;

        Ok(names
            .iter()
            .zip(0..=span)
            .map(|(name, offset)| {
                let id = CardIdentity(first + offset);
                self.entries.insert(id, name.as_ref().to_string());
                id
            })
            .collect())
    }

    /// Bind a specific identity by hand.
    ///
    /// Fails with `IdentityTaken` if it already exists; the map never
    /// rebinds an identity.
    pub fn bind(&mut self, identity: CardIdentity, card_name: impl Into<String>) -> Result<()> {
        if self.entries.contains_key(&identity) {
            return Err(TableError::IdentityTaken(identity));
        }
        self.entries.insert(identity, card_name.into());
        Ok(())
    }

    /// Card name for an identity.
    pub fn resolve(&self, identity: CardIdentity) -> Result<&str> {
        self.entries
            .get(&identity)
            .map(String::as_str)
            .ok_or(TableError::UnknownIdentity(identity))
    }

    /// Check if an identity has been minted.
    #[must_use]
    pub fn contains(&self, identity: CardIdentity) -> bool {
        self.entries.contains_key(&identity)
    }

    /// All minted identities, ascending.
    #[must_use]
    pub fn all_mapped(&self) -> Vec<CardIdentity> {
        let mut ids: Vec<_> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// `(identity, name)` pairs sorted by identity.
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<(CardIdentity, &str)> {
        let mut pairs: Vec<_> = self
            .entries
            .iter()
            .map(|(&id, name)| (id, name.as_str()))
            .collect();
        pairs.sort_unstable_by_key(|&(id, _)| id);
        pairs
    }

    /// Number of minted identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been minted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_starts_at_one() {
        let mut map = CardIdentityMap::new();
        assert_eq!(map.next_identity(), Some(CardIdentity(1)));
        assert_eq!(map.mint("Forest").unwrap(), CardIdentity(1));
        assert_eq!(map.mint("Forest").unwrap(), CardIdentity(2));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_mint_all_is_contiguous_after_existing() {
        let mut map = CardIdentityMap::new();
        map.mint("Island").unwrap();

        let ids = map.mint_all(&["Forest", "Forest", "Bear"][..]).unwrap();
        assert_eq!(ids, vec![CardIdentity(2), CardIdentity(3), CardIdentity(4)]);
        assert_eq!(map.resolve(CardIdentity(4)).unwrap(), "Bear");
    }

    #[test]
    fn test_resolve_unknown() {
        let map = CardIdentityMap::new();
        assert!(matches!(
            map.resolve(CardIdentity(7)),
            Err(TableError::UnknownIdentity(CardIdentity(7)))
        ));
    }

    #[test]
    fn test_bind_keeps_counter_above() {
        let mut map = CardIdentityMap::new();
        map.bind(CardIdentity(40), "Plains").unwrap();
        assert_eq!(map.mint("Swamp").unwrap(), CardIdentity(41));

        assert!(matches!(
            map.bind(CardIdentity(40), "Mountain"),
            Err(TableError::IdentityTaken(CardIdentity(40)))
        ));
        assert_eq!(map.resolve(CardIdentity(40)).unwrap(), "Plains");
    }

    #[test]
    fn test_minting_stops_at_u32_max() {
        let mut map = CardIdentityMap::new();
        map.bind(CardIdentity(u32::MAX - 2), "Plains").unwrap();

        assert!(matches!(
            map.mint_all(&["A", "B", "C"][..]),
            Err(TableError::IdentitiesExhausted { needed: 3 })
        ));
        assert_eq!(map.len(), 1);

        let ids = map.mint_all(&["A", "B"][..]).unwrap();
        assert_eq!(ids, vec![CardIdentity(u32::MAX - 1), CardIdentity(u32::MAX)]);
        assert_eq!(map.next_identity(), None);
        assert!(matches!(map.mint("C"), Err(TableError::IdentitiesExhausted { needed: 1 })));
        assert_eq!(map.resolve(CardIdentity(0)).ok(), None);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_mint_all_empty() {
        let mut map = CardIdentityMap::new();
        map.bind(CardIdentity(u32::MAX), "Plains").unwrap();
        assert_eq!(map.mint_all::<&str>(&[]).unwrap(), vec![]);
    }

    #[test]
    fn test_sorted_views() {
        let mut map = CardIdentityMap::new();
        map.bind(CardIdentity(3), "C").unwrap();
        map.bind(CardIdentity(1), "A").unwrap();
        map.bind(CardIdentity(2), "B").unwrap();

        assert_eq!(
            map.all_mapped(),
            vec![CardIdentity(1), CardIdentity(2), CardIdentity(3)]
        );
        assert_eq!(
            map.sorted_entries(),
            vec![(CardIdentity(1), "A"), (CardIdentity(2), "B"), (CardIdentity(3), "C")]
        );
    }

    #[test]
    fn test_json_shape() {
        let mut map = CardIdentityMap::new();
        map.mint("Forest").unwrap();

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"1":"Forest"}"#);

        let back: CardIdentityMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
