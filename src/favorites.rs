use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const FAVORITES_FILE: &str = "favorites.json";

/// The user's saved movie ids. Add and remove are idempotent; the snapshot
/// keeps insertion order, which is the display order of the favorites view.
pub trait FavoritesStore: Send + Sync {
    fn is_favorite(&self, id: u64) -> bool;
    fn add_favorite(&self, id: u64) -> Result<()>;
    fn remove_favorite(&self, id: u64) -> Result<()>;
    fn favorites(&self) -> Vec<u64>;
}

/// File-backed store: a JSON array of ids at `<data-dir>/favorites.json`.
/// A missing file loads as the empty set; a no-op mutation does not rewrite
/// the file.
pub struct JsonFavoritesStore {
    path: PathBuf,
    ids: Mutex<Vec<u64>>,
}

impl JsonFavoritesStore {
    pub fn open(dir: &Path) -> Result<Self> {
        let path = dir.join(FAVORITES_FILE);
        let ids = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid favorites file {}", path.display()))?
        } else {
            Vec::new()
        };
        Ok(Self {
            path,
            ids: Mutex::new(ids),
        })
    }

    fn save(&self, ids: &[u64]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string(ids).context("Failed to serialize favorites")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<u64>> {
        // Mutations are infallible in-memory ops, so the lock cannot be poisoned
        // by a panic mid-update.
        match self.ids.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl FavoritesStore for JsonFavoritesStore {
    fn is_favorite(&self, id: u64) -> bool {
        self.lock().contains(&id)
    }

    fn add_favorite(&self, id: u64) -> Result<()> {
        let mut ids = self.lock();
        if ids.contains(&id) {
            return Ok(());
        }
        ids.push(id);
        self.save(&ids)
    }

    fn remove_favorite(&self, id: u64) -> Result<()> {
        let mut ids = self.lock();
        let before = ids.len();
        ids.retain(|existing| *existing != id);
        if ids.len() == before {
            return Ok(());
        }
        self.save(&ids)
    }

    fn favorites(&self) -> Vec<u64> {
        self.lock().clone()
    }
}

/// Resolve the data directory holding the favorites file, by priority:
/// explicit path, `CINESHELF_DATA_DIR`, XDG data dir, `~/.cineshelf`.
pub fn resolve_data_dir(explicit: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(PathBuf::from(path));
    }
    if let Ok(env_path) = std::env::var("CINESHELF_DATA_DIR") {
        return Ok(PathBuf::from(env_path));
    }
    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("cineshelf"));
    }
    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".cineshelf"));
    }
    anyhow::bail!("Could not determine data directory: no HOME or XDG data directory found")
}
