//! Table configuration.
//!
//! Where data lives on disk and the few numbers that shape a deck load.
//! Built from defaults with builder methods, optionally overridden from
//! the environment:
//!
//! - `MTG_TABLE_DIR`: data directory (default: current directory)
//! - `MTG_TABLE_SEED`: fixed shuffle seed, for reproducible sessions

use std::path::{Path, PathBuf};

use log::warn;

use super::player::PlayerKey;

/// Default opening hand size.
pub const DEFAULT_HAND_SIZE: usize = 7;

/// Line that ends the main deck in a decklist.
pub const DEFAULT_SIDEBOARD_MARKER: &str = "SIDEBOARD";

/// Fold a user-supplied name into a safe file stem.
///
/// Characters outside `[A-Za-z0-9_-]` become `_`, so the result never
/// names a path outside its directory.
#[must_use]
pub fn file_stem(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// Complete table configuration.
#[derive(Clone, Debug)]
pub struct TableConfig {
    /// Directory holding every record, reference file and the lock.
    pub data_dir: PathBuf,

    /// Deck directory, relative to `data_dir`.
    pub deck_dir: PathBuf,

    /// Reference data files, merged in order (later files win).
    pub card_files: Vec<PathBuf>,

    /// Identity map record file name.
    pub card_map_file: String,

    /// Suffix of per-player record files.
    pub player_suffix: String,

    /// Suffix of saved identity-map snapshots.
    pub snapshot_suffix: String,

    /// Cards dealt to hand on load.
    pub hand_size: usize,

    /// Line that terminates the main deck.
    pub sideboard_marker: String,

    /// Fixed shuffle seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            deck_dir: PathBuf::from("decks"),
            card_files: vec![
                PathBuf::from("magic_all_cards.json"),
                PathBuf::from("magic_custom_cards.json"),
            ],
            card_map_file: "magic_card_map.json".to_string(),
            player_suffix: ".player.json".to_string(),
            snapshot_suffix: ".magiccardmap".to_string(),
            hand_size: DEFAULT_HAND_SIZE,
            sideboard_marker: DEFAULT_SIDEBOARD_MARKER.to_string(),
            seed: None,
        }
    }
}

impl TableConfig {
    /// Create a configuration rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Defaults with `MTG_TABLE_DIR` / `MTG_TABLE_SEED` applied.
    ///
    /// An unparsable seed is ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var("MTG_TABLE_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(seed) = std::env::var("MTG_TABLE_SEED") {
            match seed.trim().parse() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => warn!("ignoring MTG_TABLE_SEED={:?}: not a u64", seed),
            }
        }
        config
    }

    /// Set the deck directory.
    #[must_use]
    pub fn with_deck_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.deck_dir = dir.into();
        self
    }

    /// Replace the reference data files.
    #[must_use]
    pub fn with_card_files(mut self, files: Vec<PathBuf>) -> Self {
        self.card_files = files;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Fix the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Path of a deck source by name; `.deck` is appended when missing.
    ///
    /// Path separators are folded to `_`, so the file is always directly
    /// inside the deck directory.
    #[must_use]
    pub fn deck_path(&self, deck: &str) -> PathBuf {
        let deck = deck.trim().replace(['/', '\\'], "_");
        let file = if deck.ends_with(".deck") {
            deck
        } else {
            format!("{}.deck", deck)
        };
        self.data_dir.join(&self.deck_dir).join(file)
    }

    /// Path of the identity map record.
    #[must_use]
    pub fn card_map_path(&self) -> PathBuf {
        self.data_dir.join(&self.card_map_file)
    }

    /// Path of a player's zone store record.
    #[must_use]
    pub fn player_path(&self, player: &PlayerKey) -> PathBuf {
        self.data_dir.join(format!("{}{}", player, self.player_suffix))
    }

    /// Path of a named identity-map snapshot; the name is folded with
    /// `file_stem`.
    #[must_use]
    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}{}", file_stem(name), self.snapshot_suffix))
    }

    /// Reference data files resolved against `data_dir`.
    pub fn card_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.card_files.iter().map(|f| self.data_dir.join(f))
    }

    /// Path of the single-writer lock file.
    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        self.data_dir.join(".mtg-table.lock")
    }

    /// Data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
