//! Persistence adapter: cart snapshots in durable local storage.
//!
//! # Design
//! One record under one fixed name. `load` is deliberately forgiving — a
//! missing file, unreadable storage, or a malformed record all come back as
//! `None`, never as an error, so a corrupt snapshot can at worst cost the
//! diner their saved cart. `save` reports failures so the caller can log
//! them, but no caller treats them as fatal.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::StoreError;
use crate::types::CartSnapshot;

/// File name of the single persisted cart record.
pub const CART_FILE: &str = "cart.json";

/// Where cart snapshots go between page loads.
pub trait CartStore {
    fn save(&mut self, snapshot: &CartSnapshot) -> Result<(), StoreError>;

    /// The last saved snapshot, or `None` if there is none or it cannot be
    /// read back. Never fails.
    fn load(&mut self) -> Option<CartSnapshot>;
}

/// Snapshot storage in a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store at the fixed [`CART_FILE`] name inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(CART_FILE))
    }
}

impl CartStore for FileStore {
    fn save(&mut self, snapshot: &CartSnapshot) -> Result<(), StoreError> {
        let json = serde_json::to_string(snapshot)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn load(&mut self) -> Option<CartSnapshot> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(%err, path = %self.path.display(), "cart snapshot unreadable");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(%err, "discarding malformed cart snapshot");
                None
            }
        }
    }
}

/// In-process snapshot slot for tests and hosts without durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<CartSnapshot>,
}

impl CartStore for MemoryStore {
    fn save(&mut self, snapshot: &CartSnapshot) -> Result<(), StoreError> {
        self.snapshot = Some(snapshot.clone());
        Ok(())
    }

    fn load(&mut self) -> Option<CartSnapshot> {
        self.snapshot.clone()
    }
}
