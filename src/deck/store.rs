//! Key-value persistence for the current deck.
//!
//! Writes are fire-and-forget and last-write-wins: a failed save is logged
//! and otherwise ignored, so a broken disk never blocks deck editing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cards::{CardCatalog, CardId};
use crate::deck::DeckComposition;

/// Key holding the current deck.
pub const CURRENT_DECK_KEY: &str = "deck.current";

/// Key holding the limit-release flag.
pub const LIMIT_RELEASE_KEY: &str = "deck.limit_release";

/// Host-provided string store.
pub trait DeckStore {
    /// Read a value; `None` if the key was never written or cannot be read.
    fn load(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn save(&mut self, key: &str, value: String);
}

/// In-process store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeckStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

/// One `<key>.json` file per key under a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl DeckStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to read deck store entry");
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: String) {
        let path = self.path(key);
        if let Err(err) = fs::write(&path, value) {
            warn!(path = %path.display(), %err, "failed to write deck store entry");
        }
    }
}

/// One persisted pick, with the display name cached at save time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPick {
    pub id: CardId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Persisted form of the current deck: every pick in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDeck {
    pub picks: Vec<SavedPick>,
}

impl SavedDeck {
    /// Capture a composition, caching names from the catalog.
    pub fn capture<C>(composition: &DeckComposition, catalog: &C) -> Self
    where
        C: CardCatalog + ?Sized,
    {
        let picks = composition
            .picks()
            .map(|id| SavedPick {
                id,
                name: catalog.lookup(id).map(|record| record.name.clone()),
            })
            .collect();
        Self { picks }
    }

    /// Rebuild a composition, dropping picks the catalog no longer has.
    pub fn restore<C>(&self, catalog: &C) -> DeckComposition
    where
        C: CardCatalog + ?Sized,
    {
        let (known, dropped): (Vec<_>, Vec<_>) =
            self.picks.iter().map(|p| p.id).partition(|&id| catalog.contains(id));
        if !dropped.is_empty() {
            warn!(dropped = ?dropped, "saved deck references unknown cards; dropping them");
        }
        DeckComposition::from_picks(known)
    }
}
