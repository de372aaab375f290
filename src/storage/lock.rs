//! Single-writer lock on a data directory.
//!
//! The lock is a file created with create-new semantics: whoever creates
//! it owns the directory until the guard drops. A second process gets
//! `StoreLocked`. A lock left behind by a crashed process has to be
//! removed by hand; the error names its path.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use log::{debug, warn};

use crate::core::error::{Result, TableError};

/// Guard owning the data directory lock file.
#[derive(Debug)]
pub struct StoreLock {
    path: PathBuf,
}

impl StoreLock {
    /// Take the lock at `path`.
    pub fn acquire(path: PathBuf) -> Result<Self> {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(TableError::StoreLocked(path));
            }
            Err(e) => return Err(e.into()),
        };
        writeln!(file, "{}", std::process::id())?;
        debug!("locked {}", path.display());
        Ok(Self { path })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!("could not release lock {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_fails_until_drop() {
        let dir = std::env::temp_dir().join(format!("mtg-table-lock-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(".lock");
        let _ = fs::remove_file(&path);

        let first = StoreLock::acquire(path.clone()).unwrap();
        assert!(matches!(
            StoreLock::acquire(path.clone()),
            Err(TableError::StoreLocked(p)) if p == path
        ));

        drop(first);
        assert!(!path.exists());
        let _again = StoreLock::acquire(path).unwrap();
    }
}
