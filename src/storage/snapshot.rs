//! Named identity-map snapshots (`SAVE` / `LOADMAP`).
//!
//! Snapshots are bincode files next to the live records. Restoring one is
//! a full reset: every player record is dropped and the snapshot becomes
//! the identity map.

use std::fs;
use std::io::ErrorKind;

use log::info;

use super::records::RecordStore;
use crate::core::error::{Result, TableError};
use crate::core::identity::CardIdentityMap;

impl RecordStore {
    /// Save the current identity map as `name`.
    pub fn save_snapshot(&self, name: &str) -> Result<usize> {
        let map = self.load_identities()?;
        fs::write(self.config().snapshot_path(name), bincode::serialize(&map)?)?;
        info!("saved {} card mappings as {}", map.len(), name);
        Ok(map.len())
    }

    /// Read a saved snapshot without installing it.
    pub fn read_snapshot(&self, name: &str) -> Result<CardIdentityMap> {
        let bytes = match fs::read(self.config().snapshot_path(name)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(TableError::SnapshotNotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(bincode::deserialize(&bytes)?)
    }

    /// Reset everything and install snapshot `name` as the identity map.
    ///
    /// The snapshot is read before anything is cleared.
    pub fn restore_snapshot(&self, name: &str) -> Result<usize> {
        let map = self.read_snapshot(name)?;
        self.clear_all()?;
        self.save_identities(&map)?;
        info!("restored {} card mappings from {}", map.len(), name);
        Ok(map.len())
    }

    /// Names of saved snapshots, sorted.
    pub fn snapshots(&self) -> Result<Vec<String>> {
        self.files_with_suffix(&self.config().snapshot_suffix)
    }
}
