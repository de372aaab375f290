//! Whole-record JSON persistence.
//!
//! Every record is read fully, changed in memory, and written back fully.
//! Writes go to a sibling `.tmp` file that is then renamed over the
//! record, so a reader never sees a half-written file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::lock::StoreLock;
use crate::core::config::TableConfig;
use crate::core::error::{Result, TableError};
use crate::core::identity::CardIdentityMap;
use crate::core::player::PlayerKey;
use crate::zones::ZoneStore;

/// Read a JSON record.
///
/// `Ok(None)` when the file does not exist. A file that exists but does not
/// decode is also `Ok(None)`, with a warning: malformed records reset.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    match serde_json::from_str(&text) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("{} is malformed, treating as absent: {}", path.display(), e);
            Ok(None)
        }
    }
}

/// Write a JSON record atomically.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let tmp = tmp_path(path);
    fs::write(&tmp, serde_json::to_vec(value)?)?;
    fs::rename(&tmp, path)?;
    debug!("wrote {}", path.display());
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Record storage for one data directory.
///
/// Holds the directory's lock for as long as it lives.
#[derive(Debug)]
pub struct RecordStore {
    config: TableConfig,
    _lock: StoreLock,
}

impl RecordStore {
    /// Open (creating if needed) the configured data directory and lock it.
    pub fn open(config: TableConfig) -> Result<Self> {
        fs::create_dir_all(config.data_dir())?;
        let lock = StoreLock::acquire(config.lock_path())?;
        Ok(Self { config, _lock: lock })
    }

    /// Configuration this store was opened with.
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Load the identity map, empty if absent or malformed.
    pub fn load_identities(&self) -> Result<CardIdentityMap> {
        Ok(read_json(&self.config.card_map_path())?.unwrap_or_default())
    }

    /// Persist the identity map.
    pub fn save_identities(&self, map: &CardIdentityMap) -> Result<()> {
        write_json(&self.config.card_map_path(), map)
    }

    /// Load a player's record, `None` if absent or malformed.
    ///
    /// A record that decodes but breaks the zone invariants (a card in two
    /// zones, cards missing from the identity map, a different player key)
    /// is malformed too.
    pub fn load_player(&self, player: &PlayerKey) -> Result<Option<ZoneStore>> {
        let path = self.config.player_path(player);
        let Some(record) = read_json::<ZoneStore>(&path)? else {
            return Ok(None);
        };
        if record.player != *player || !record.is_consistent(&self.load_identities()?) {
            warn!("{} is inconsistent, treating as absent", path.display());
            return Ok(None);
        }
        Ok(Some(record))
    }

    /// Load a player's record or fail with `UnknownPlayer`.
    pub fn require_player(&self, player: &PlayerKey) -> Result<ZoneStore> {
        self.load_player(player)?
            .ok_or_else(|| TableError::UnknownPlayer(player.clone()))
    }

    /// Persist a player's record.
    pub fn save_player(&self, store: &ZoneStore) -> Result<()> {
        write_json(&self.config.player_path(&store.player), store)
    }

    /// Every player with a record, sorted.
    pub fn players(&self) -> Result<Vec<PlayerKey>> {
        let mut players: Vec<_> = self
            .files_with_suffix(&self.config.player_suffix)?
            .into_iter()
            .map(PlayerKey::new)
            .collect();
        players.sort();
        Ok(players)
    }

    /// Remove every player record and empty the identity map.
    pub fn clear_all(&self) -> Result<()> {
        for player in self.players()? {
            fs::remove_file(self.config.player_path(&player))?;
        }
        self.save_identities(&CardIdentityMap::new())?;
        info!("cleared all players and card mappings");
        Ok(())
    }

    /// File stems in the data directory ending with `suffix`, sorted.
    pub(crate) fn files_with_suffix(&self, suffix: &str) -> Result<Vec<String>> {
        let mut stems = Vec::new();
        for entry in fs::read_dir(self.config.data_dir())? {
            let name = entry?.file_name();
            if let Some(stem) = name.to_str().and_then(|n| n.strip_suffix(suffix)) {
                stems.push(stem.to_string());
            }
        }
        stems.sort();
        Ok(stems)
    }
}
