//! Interpreter session: explicit context for every operation.
//!
//! A `Session` owns the locked record store, the reference data, the deck
//! shuffling RNG and the current player. Each operation reads the records
//! it needs, works in memory, and writes back only on success.
//!
//! ## Usage
//!
//! ```no_run
//! use mtg_table::{Command, Session, TableConfig};
//!
//! let mut session = Session::open(TableConfig::from_env())?;
//! session.execute(&Command::Load("elves".into()))?;
//! session.execute(&Command::parse("DRAW")?.unwrap())?;
//! # Ok::<(), mtg_table::TableError>(())
//! ```

use log::{info, warn};

use crate::cards::{CardData, CardLookup, CardRegistry};
use crate::core::command::{Command, Filters};
use crate::core::config::{file_stem, TableConfig};
use crate::core::error::{Result, TableError};
use crate::core::identity::{CardIdentity, CardIdentityMap};
use crate::core::player::PlayerKey;
use crate::core::rng::GameRng;
use crate::deck::{DeckLoader, Decklist};
use crate::stats::{self, DeckReport};
use crate::storage::RecordStore;
use crate::zones::{Applied, Transition, Zone, ZoneStore};

/// Summary of a deck load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadSummary {
    pub player: PlayerKey,
    pub cards: usize,
    pub hand: usize,
    pub library: usize,
}

/// A card as seen in a zone or an identity lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct CardView {
    pub identity: CardIdentity,
    pub name: String,
    /// Reference data, when the name is known.
    pub data: Option<CardData>,
}

/// Structured result of one command.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Loaded(LoadSummary),
    PlayerSelected(PlayerKey),
    Players(Vec<PlayerKey>),
    Moved(Applied),
    Zone { zone: Zone, cards: Vec<CardView> },
    ZoneCounts(Vec<(Zone, usize)>),
    History(Vec<String>),
    Replayed { entries: usize, matches: bool },
    Stats(DeckReport),
    Names(Vec<String>),
    Identities(Vec<CardIdentity>),
    Mappings(Vec<(CardIdentity, String)>),
    Snapshots(Vec<String>),
    Cleared,
    Saved { name: String, cards: usize },
    MapLoaded { name: String, cards: usize },
    Colors,
    Card(CardData),
    Attributes(Vec<(String, String)>),
    Identity(CardView),
    Bound(CardIdentity, String),
    Exit,
}

/// Explicit interpreter context.
pub struct Session {
    store: RecordStore,
    registry: CardRegistry,
    rng: GameRng,
    current: Option<PlayerKey>,
}

impl Session {
    /// Open the data directory and load the configured reference data.
    pub fn open(config: TableConfig) -> Result<Self> {
        let registry = CardRegistry::load(config.card_paths());
        Self::with_registry(config, registry)
    }

    /// Open with reference data supplied by the caller.
    pub fn with_registry(config: TableConfig, registry: CardRegistry) -> Result<Self> {
        let rng = GameRng::seeded_or_random(config.seed);
        let store = RecordStore::open(config)?;
        Ok(Self { store, registry, rng, current: None })
    }

    /// The current player, if one is selected.
    #[must_use]
    pub fn current_player(&self) -> Option<&PlayerKey> {
        self.current.as_ref()
    }

    /// Reference data.
    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        self.store.config()
    }

    fn read_decklist(&self, deck: &str) -> Result<Decklist> {
        let config = self.store.config();
        Decklist::read(&config.deck_path(deck), &config.sideboard_marker)
    }

    /// Load a deck for the player named after it and make them current.
    ///
    /// The decklist is read before anything is minted, and the identity map
    /// is written before the player record, so a failure never leaves a
    /// record pointing at unmapped identities. A player that already has a
    /// record is `PlayerExists`; only `clear` removes it.
    pub fn load_deck(&mut self, deck: &str) -> Result<LoadSummary> {
        let decklist = self.read_decklist(deck)?;
        let player = PlayerKey::from_deck_name(deck);
        if self.store.load_player(&player)?.is_some() {
            return Err(TableError::PlayerExists(player));
        }

        let mut identities = self.store.load_identities()?;
        let hand_size = self.store.config().hand_size;
        let record = DeckLoader::new(&mut identities, hand_size).load(player.clone(), &decklist, &mut self.rng)?;

        self.store.save_identities(&identities)?;
        self.store.save_player(&record)?;

        self.current = Some(player.clone());
        Ok(LoadSummary {
            player,
            cards: record.zones.total_cards(),
            hand: record.zone(Zone::Hand).len(),
            library: record.zone(Zone::Library).len(),
        })
    }

    /// Make `player` current; it must have a record.
    pub fn select_player(&mut self, player: PlayerKey) -> Result<()> {
        self.store.require_player(&player)?;
        info!("switched to player {}", player);
        self.current = Some(player);
        Ok(())
    }

    fn current_record(&self) -> Result<ZoneStore> {
        let player = self.current.as_ref().ok_or(TableError::NoActivePlayer)?;
        self.store.require_player(player)
    }

    /// Apply a transition to the current player and persist it.
    ///
    /// On failure nothing is written.
    pub fn apply(&mut self, transition: Transition) -> Result<Applied> {
        let mut record = self.current_record()?;
        let applied = record.apply(transition)?;
        self.store.save_player(&record)?;
        Ok(applied)
    }

    fn view(&self, identities: &CardIdentityMap, identity: CardIdentity) -> Result<CardView> {
        let name = identities.resolve(identity)?.to_string();
        let data = self.registry.get(&name).cloned();
        Ok(CardView { identity, name, data })
    }

    /// Cards of one of the current player's zones, in order.
    pub fn zone(&self, zone: Zone) -> Result<Vec<CardView>> {
        let record = self.current_record()?;
        let identities = self.store.load_identities()?;
        record
            .zone(zone)
            .iter()
            .map(|&id| self.view(&identities, id))
            .collect()
    }

    /// Card count of each of the current player's zones.
    pub fn zone_counts(&self) -> Result<Vec<(Zone, usize)>> {
        let record = self.current_record()?;
        Ok(Zone::ALL.into_iter().map(|z| (z, record.zone(z).len())).collect())
    }

    /// The current player's move history.
    pub fn history(&self) -> Result<Vec<String>> {
        Ok(self.current_record()?.history.iter().cloned().collect())
    }

    /// Replay the current player's history; `true` when it matches.
    pub fn replay(&self) -> Result<(usize, bool)> {
        let record = self.current_record()?;
        let rebuilt = record.replay()?;
        let matches = rebuilt == record.zones;
        if !matches {
            warn!("{}: replay diverges from stored zones", record.player);
        }
        Ok((record.history.len(), matches))
    }

    /// Statistics for a deck file.
    pub fn stats(&self, deck: &str) -> Result<DeckReport> {
        let decklist = self.read_decklist(deck)?;
        stats::analyze(&decklist, &self.registry)
    }

    /// Look up a minted identity.
    pub fn resolve(&self, identity: CardIdentity) -> Result<CardView> {
        self.view(&self.store.load_identities()?, identity)
    }

    /// Bind an identity to a card name by hand.
    pub fn bind(&mut self, identity: CardIdentity, name: &str) -> Result<()> {
        let mut identities = self.store.load_identities()?;
        identities.bind(identity, name)?;
        self.store.save_identities(&identities)
    }

    /// Full reset: every player and mapping is removed.
    pub fn clear(&mut self) -> Result<()> {
        self.store.clear_all()?;
        self.current = None;
        Ok(())
    }

    /// Reset and install a saved identity map.
    pub fn load_map(&mut self, name: &str) -> Result<usize> {
        let cards = self.store.restore_snapshot(name)?;
        self.current = None;
        Ok(cards)
    }

    fn filter(&self, filters: &Filters) -> Vec<String> {
        self.registry
            .filter(filters)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Run one parsed command.
    pub fn execute(&mut self, command: &Command) -> Result<Outcome> {
        let outcome = match command {
            Command::Load(deck) => Outcome::Loaded(self.load_deck(deck)?),
            Command::Player(player) => {
                self.select_player(player.clone())?;
                Outcome::PlayerSelected(player.clone())
            }
            Command::Players => Outcome::Players(self.store.players()?),
            Command::Move(transition) => Outcome::Moved(self.apply(*transition)?),
            Command::Show(zone) => Outcome::Zone { zone: *zone, cards: self.zone(*zone)? },
            Command::Zones => Outcome::ZoneCounts(self.zone_counts()?),
            Command::History => Outcome::History(self.history()?),
            Command::Replay => {
                let (entries, matches) = self.replay()?;
                Outcome::Replayed { entries, matches }
            }
            Command::Stats(deck) => Outcome::Stats(self.stats(deck)?),
            Command::All => {
                Outcome::Names(self.registry.names().into_iter().map(str::to_string).collect())
            }
            Command::Mapped => Outcome::Identities(self.store.load_identities()?.all_mapped()),
            Command::List => Outcome::Mappings(
                self.store
                    .load_identities()?
                    .sorted_entries()
                    .into_iter()
                    .map(|(id, name)| (id, name.to_string()))
                    .collect(),
            ),
            Command::ListSaved => Outcome::Snapshots(self.store.snapshots()?),
            Command::Clear => {
                self.clear()?;
                Outcome::Cleared
            }
            Command::Save(name) => Outcome::Saved {
                cards: self.store.save_snapshot(name)?,
                name: file_stem(name),
            },
            Command::LoadMap(name) => Outcome::MapLoaded {
                cards: self.load_map(name)?,
                name: file_stem(name),
            },
            Command::Colors => Outcome::Colors,
            Command::Filter(filters) => Outcome::Names(self.filter(filters)),
            Command::Full(name) => Outcome::Attributes(self.registry.get_card(name)?.attributes()),
            Command::Card(name) => Outcome::Card(self.registry.get_card(name)?.clone()),
            Command::Resolve(identity) => Outcome::Identity(self.resolve(*identity)?),
            Command::Bind(identity, name) => {
                self.bind(*identity, name)?;
                Outcome::Bound(*identity, name.clone())
            }
            Command::Exit => Outcome::Exit,
        };
        Ok(outcome)
    }
}
