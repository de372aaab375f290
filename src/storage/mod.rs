//! Persistence for the identity map and player records.
//!
//! - `RecordStore`: JSON records in one locked data directory
//! - `StoreLock`: the single-writer lock file guard
//! - snapshots: bincode copies of the identity map

pub mod lock;
pub mod records;
pub mod snapshot;

pub use lock::StoreLock;
pub use records::{read_json, write_json, RecordStore};
