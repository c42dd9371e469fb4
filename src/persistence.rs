//! Save slots. The format is JSON: a [`SaveData`] wrapper holding the
//! session and a write timestamp. Storage is behind [`SaveStore`] so tests
//! and embedders can keep saves in memory.

use crate::errors::{PersistenceError, PersistenceResult};
use crate::game::GameSession;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub trait SaveStore {
    fn write(&mut self, slot: u8, bytes: &[u8]) -> io::Result<()>;
    /// `Ok(None)` means the slot has never been written.
    fn read(&self, slot: u8) -> io::Result<Option<Vec<u8>>>;
}

/// One file per slot under a root directory.
pub struct FileSaveStore {
    root: PathBuf,
}

impl FileSaveStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        FileSaveStore {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn slot_path(&self, slot: u8) -> PathBuf {
        self.root.join(format!("objectmon_save_{}.json", slot))
    }
}

impl SaveStore for FileSaveStore {
    fn write(&mut self, slot: u8, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.slot_path(slot), bytes)
    }

    fn read(&self, slot: u8) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.slot_path(slot)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[derive(Default)]
pub struct MemorySaveStore {
    slots: HashMap<u8, Vec<u8>>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        MemorySaveStore::default()
    }
}

impl SaveStore for MemorySaveStore {
    fn write(&mut self, slot: u8, bytes: &[u8]) -> io::Result<()> {
        self.slots.insert(slot, bytes.to_vec());
        Ok(())
    }

    fn read(&self, slot: u8) -> io::Result<Option<Vec<u8>>> {
        Ok(self.slots.get(&slot).cloned())
    }
}

#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Seconds since the Unix epoch at write time.
    pub timestamp: u64,
    pub session: GameSession,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub fn save(
    session: &GameSession,
    slot: u8,
    store: &mut dyn SaveStore,
) -> PersistenceResult<()> {
    let data = SaveData {
        timestamp: unix_now(),
        session: session.clone(),
    };
    let bytes =
        serde_json::to_vec(&data).map_err(|err| PersistenceError::Corrupt(err.to_string()))?;
    store.write(slot, &bytes)?;
    Ok(())
}

pub fn load(slot: u8, store: &dyn SaveStore) -> PersistenceResult<GameSession> {
    let bytes = store
        .read(slot)?
        .ok_or(PersistenceError::MissingSlot(slot))?;
    let data: SaveData =
        serde_json::from_slice(&bytes).map_err(|err| PersistenceError::Corrupt(err.to_string()))?;
    Ok(data.session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameSession;

    #[test]
    fn memory_round_trip_preserves_the_player() {
        let mut session = GameSession::new_game(7);
        session.create_player("Casey");
        let mut store = MemorySaveStore::new();
        save(&session, 1, &mut store).unwrap();
        let loaded = load(1, &store).unwrap();
        assert_eq!(
            loaded.player.as_ref().map(|p| p.name.as_str()),
            Some("Casey")
        );
        assert_eq!(loaded.rng_seed(), 7);
    }

    #[test]
    fn empty_slot_is_a_missing_slot_error() {
        let store = MemorySaveStore::new();
        match load(2, &store) {
            Err(PersistenceError::MissingSlot(2)) => {}
            other => panic!("expected MissingSlot, got {:?}", other.err()),
        }
    }

    #[test]
    fn garbage_bytes_are_reported_as_corrupt() {
        let mut store = MemorySaveStore::new();
        store.write(1, b"not json at all").unwrap();
        match load(1, &store) {
            Err(PersistenceError::Corrupt(_)) => {}
            other => panic!("expected Corrupt, got {:?}", other.err()),
        }
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSaveStore::new(dir.path());
        let session = GameSession::new_game(11);
        save(&session, 3, &mut store).unwrap();
        assert!(dir.path().join("objectmon_save_3.json").exists());
        let loaded = load(3, &store).unwrap();
        assert_eq!(loaded.rng_seed(), 11);
        assert!(load(1, &store).is_err());
    }
}
