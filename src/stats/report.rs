//! Deck statistics: card frequencies, mana curve, color symbols.
//!
//! Read-only. `analyze` looks every decklist name up once and fails the
//! whole report on the first unknown name.

use serde::Serialize;

use crate::cards::{CardData, CardLookup};
use crate::core::error::Result;
use crate::deck::Decklist;

/// Type categories of the mana curve, in priority order.
///
/// A card is counted under the first category it matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TypeCategory {
    Land,
    Creature,
    Sorcery,
    Instant,
    Artifact,
    Enchantment,
    Planeswalker,
}

impl TypeCategory {
    pub const ALL: [TypeCategory; 7] = [
        TypeCategory::Land,
        TypeCategory::Creature,
        TypeCategory::Sorcery,
        TypeCategory::Instant,
        TypeCategory::Artifact,
        TypeCategory::Enchantment,
        TypeCategory::Planeswalker,
    ];

    /// Type line name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TypeCategory::Land => "Land",
            TypeCategory::Creature => "Creature",
            TypeCategory::Sorcery => "Sorcery",
            TypeCategory::Instant => "Instant",
            TypeCategory::Artifact => "Artifact",
            TypeCategory::Enchantment => "Enchantment",
            TypeCategory::Planeswalker => "Planeswalker",
        }
    }

    /// Column letter.
    #[must_use]
    pub const fn initial(self) -> char {
        match self {
            TypeCategory::Land => 'L',
            TypeCategory::Creature => 'C',
            TypeCategory::Sorcery => 'S',
            TypeCategory::Instant => 'I',
            TypeCategory::Artifact => 'A',
            TypeCategory::Enchantment => 'E',
            TypeCategory::Planeswalker => 'P',
        }
    }

    /// First category `card` matches, if any.
    #[must_use]
    pub fn of(card: &CardData) -> Option<Self> {
        Self::ALL.into_iter().find(|c| card.has_type(c.name()))
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// The five color symbols counted in mana costs.
pub const COLOR_SYMBOLS: [char; 5] = ['W', 'U', 'B', 'R', 'G'];

/// One distinct card name of the deck.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardFrequency {
    pub name: String,
    pub count: u32,
    /// Share of deck size, 0-100.
    pub percent: f64,
    /// Converted cost; split cards sum both halves.
    pub cmc: f64,
    /// Mana cost text of the first face.
    pub mana_cost: String,
    /// Category initial of the first face.
    pub type_initial: Option<char>,
}

/// One cost bucket of the mana curve.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CurveRow {
    pub cmc: u32,
    /// Counts per `TypeCategory`, indexed in `TypeCategory::ALL` order.
    pub by_category: [u32; 7],
    /// All cards at this cost, categorized or not.
    pub total: u32,
    /// Share of deck size, 0-100.
    pub percent: f64,
}

impl CurveRow {
    /// Count for one category.
    #[must_use]
    pub fn count(&self, category: TypeCategory) -> u32 {
        self.by_category[category.index()]
    }
}

/// Occurrences of one color symbol.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColorShare {
    pub symbol: char,
    pub count: u32,
    /// Share of all symbol occurrences, 0-100.
    pub percent: f64,
}

/// Complete statistics for one decklist.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeckReport {
    pub deck_size: u32,
    /// Sorted ascending by cost; equal costs keep decklist order.
    pub cards: Vec<CardFrequency>,
    /// Ascending by cost, one row per cost present in the deck.
    pub curve: Vec<CurveRow>,
    /// In `W U B R G` order.
    pub colors: Vec<ColorShare>,
}

fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) * 100.0 / f64::from(whole)
    }
}

/// Build the statistics report for `decklist`.
///
/// Fails with `DeckTooLarge` before any lookup when the deck is oversized.
pub fn analyze<L: CardLookup>(decklist: &Decklist, lookup: &L) -> Result<DeckReport> {
    decklist.validate()?;

    // Merge repeated lines of the same name, keeping first-seen order.
    let mut counts: Vec<(&str, u32)> = Vec::new();
    for entry in &decklist.entries {
        match counts.iter_mut().find(|(name, _)| *name == entry.name) {
            Some((_, count)) => *count += entry.count,
            None => counts.push((entry.name.as_str(), entry.count)),
        }
    }
    let deck_size: u32 = counts.iter().map(|&(_, n)| n).sum();

    let mut cards = Vec::with_capacity(counts.len());
    let mut curve: Vec<CurveRow> = Vec::new();
    let mut symbols = [0u32; 5];

    for &(name, count) in &counts {
        let faces = lookup.faces(name)?;
        let first = faces[0];
        let cmc: f64 = faces.iter().map(|f| f.converted_mana_cost).sum();
        let category = TypeCategory::of(first);

        for face in &faces {
            for c in face.mana_cost_text().chars() {
                if let Some(i) = COLOR_SYMBOLS.iter().position(|&s| s == c) {
                    symbols[i] = symbols[i].saturating_add(count);
                }
            }
        }

        let bucket = cmc as u32;
        let index = match curve.iter().position(|r| r.cmc == bucket) {
            Some(i) => i,
            None => {
                curve.push(CurveRow { cmc: bucket, by_category: [0; 7], total: 0, percent: 0.0 });
                curve.len() - 1
            }
        };
        let row = &mut curve[index];
        if let Some(category) = category {
            row.by_category[category.index()] += count;
        }
        row.total += count;

        cards.push(CardFrequency {
            name: name.to_string(),
            count,
            percent: percent(count, deck_size),
            cmc,
            mana_cost: first.mana_cost_text().to_string(),
            type_initial: category.map(TypeCategory::initial),
        });
    }

    cards.sort_by(|a, b| a.cmc.total_cmp(&b.cmc));
    curve.sort_by_key(|r| r.cmc);
    for row in &mut curve {
        row.percent = percent(row.total, deck_size);
    }

    let symbol_total = symbols.iter().fold(0u32, |total, &n| total.saturating_add(n));
    let colors = COLOR_SYMBOLS
        .iter()
        .zip(symbols)
        .map(|(&symbol, count)| ColorShare {
            symbol,
            count,
            percent: percent(count, symbol_total),
        })
        .collect();

    Ok(DeckReport { deck_size, cards, curve, colors })
}
