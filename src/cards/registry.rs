//! Card registry for reference data lookup.
//!
//! The `CardRegistry` holds the reference data keyed by card name. It is
//! loaded from one or more JSON files (name → card object); later files
//! override earlier ones, which is how custom cards are layered over the
//! full card list. Missing files contribute nothing.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::definition::CardData;
use crate::core::error::{Result, TableError};

/// Separator between the halves of a split card name.
pub const SPLIT_SEPARATOR: &str = " // ";

/// Reference data lookup by card name.
pub trait CardLookup {
    /// Card data for `name`, or `CardNotFound`.
    fn get_card(&self, name: &str) -> Result<&CardData>;

    /// The faces that make up `name`.
    ///
    /// A name found as-is is a single face. Otherwise a split name
    /// (`"Fire // Ice"`) resolves to each half in order.
    fn faces(&self, name: &str) -> Result<SmallVec<[&CardData; 2]>> {
        if let Ok(card) = self.get_card(name) {
            return Ok(smallvec::smallvec![card]);
        }
        if !name.contains(SPLIT_SEPARATOR) {
            return Err(TableError::CardNotFound(name.to_string()));
        }
        name.split(SPLIT_SEPARATOR)
            .map(|half| self.get_card(half.trim()))
            .collect()
    }
}

/// Registry of card reference data.
///
/// ## Example
///
/// ```
/// use mtg_table::cards::{CardData, CardLookup, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardData::new("Lightning Bolt").with_cmc(1.0).with_type("Instant"));
///
/// let bolt = registry.get_card("Lightning Bolt").unwrap();
/// assert!(bolt.has_type("Instant"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<String, CardData>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and merge reference files in order.
    ///
    /// Missing files are skipped. Unreadable or malformed files are skipped
    /// with a warning rather than failing the whole load.
    pub fn load<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Self {
        let mut registry = Self::new();
        for path in paths {
            let path = path.as_ref();
            match registry.merge_file(path) {
                Ok(0) => debug!("no reference data in {}", path.display()),
                Ok(n) => info!("loaded {} cards from {}", n, path.display()),
                Err(e) => warn!("skipping reference file {}: {}", path.display(), e),
            }
        }
        registry
    }

    /// Merge one reference file; returns the number of cards read.
    ///
    /// A file that does not exist reads as zero cards.
    pub fn merge_file(&mut self, path: &Path) -> Result<usize> {
        if !path.exists() {
            return Ok(0);
        }
        let text = fs::read_to_string(path)?;
        let cards: FxHashMap<String, CardData> = serde_json::from_str(&text)?;
        let count = cards.len();
        self.cards.extend(cards);
        Ok(count)
    }

    /// Register one card, replacing any card of the same name.
    pub fn register(&mut self, card: CardData) {
        self.cards.insert(card.name.clone(), card);
    }

    /// Get a card by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CardData> {
        self.cards.get(name)
    }

    /// Check if a card name is known.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(name)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All card names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.cards.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names of cards matching every `(attribute, value)` filter, sorted.
    ///
    /// See `CardData::matches_attr` for the matching rule.
    #[must_use]
    pub fn filter(&self, filters: &[(String, String)]) -> Vec<&str> {
        let mut names: Vec<_> = self
            .cards
            .values()
            .filter(|card| filters.iter().all(|(k, v)| card.matches_attr(k, v)))
            .map(|card| card.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

impl CardLookup for CardRegistry {
    fn get_card(&self, name: &str) -> Result<&CardData> {
        self.cards
            .get(name)
            .ok_or_else(|| TableError::CardNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CardRegistry {
        let mut registry = CardRegistry::new();
        registry.register(CardData::new("Forest").with_type("Land").with_color("G"));
        registry.register(
            CardData::new("Grizzly Bears")
                .with_mana_cost("{1}{G}")
                .with_cmc(2.0)
                .with_type("Creature")
                .with_color("G"),
        );
        registry.register(
            CardData::new("Fire")
                .with_mana_cost("{1}{R}")
                .with_cmc(2.0)
                .with_type("Instant")
                .with_color("R"),
        );
        registry.register(
            CardData::new("Ice")
                .with_mana_cost("{1}{U}")
                .with_cmc(2.0)
                .with_type("Instant")
                .with_color("U"),
        );
        registry
    }

    #[test]
    fn test_get_card() {
        let registry = sample();
        assert_eq!(registry.get_card("Forest").unwrap().name, "Forest");
        assert!(matches!(
            registry.get_card("Black Lotus"),
            Err(TableError::CardNotFound(name)) if name == "Black Lotus"
        ));
    }

    #[test]
    fn test_split_faces() {
        let registry = sample();

        let faces = registry.faces("Fire // Ice").unwrap();
        assert_eq!(faces.len(), 2);
        assert_eq!(faces[0].name, "Fire");
        assert_eq!(faces[1].name, "Ice");

        assert_eq!(registry.faces("Forest").unwrap().len(), 1);
        assert!(registry.faces("Fire // Water").is_err());
        assert!(registry.faces("Water").is_err());
    }

    #[test]
    fn test_filter_all_must_hit() {
        let registry = sample();

        let green = registry.filter(&[("colorIdentity".into(), "G".into())]);
        assert_eq!(green, vec!["Forest", "Grizzly Bears"]);

        let green_creatures = registry.filter(&[
            ("colorIdentity".into(), "G".into()),
            ("types".into(), "Creature".into()),
        ]);
        assert_eq!(green_creatures, vec!["Grizzly Bears"]);

        assert!(registry.filter(&[("types".into(), "Planeswalker".into())]).is_empty());
    }

    #[test]
    fn test_names_sorted() {
        let registry = sample();
        assert_eq!(registry.names(), vec!["Fire", "Forest", "Grizzly Bears", "Ice"]);
    }

    #[test]
    fn test_merge_missing_file_is_empty() {
        let mut registry = CardRegistry::new();
        let count = registry
            .merge_file(Path::new("/definitely/not/here/cards.json"))
            .unwrap();
        assert_eq!(count, 0);
        assert!(registry.is_empty());
    }
}
