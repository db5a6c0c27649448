use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::Result;
use crate::types::Bookmark;

/// Key the bookmark list is stored under.
pub const REPOS_KEY: &str = "repos";

/// Persistence port for the bookmark list. Implementations are synchronous;
/// the last `save` wins.
pub trait BookmarkStore {
    /// Empty when nothing has been saved yet.
    fn load(&self) -> Result<Vec<Bookmark>>;
    fn save(&self, bookmarks: &[Bookmark]) -> Result<()>;
}

/// File-backed key-value storage: each key is `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// XDG data directory: ~/.local/share/repofav/ (Linux) or
    /// ~/Library/Application Support/repofav/ (macOS)
    pub fn default_dir() -> Option<PathBuf> {
        Some(dirs::data_dir()?.join("repofav"))
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.item_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.item_path(key), value)?;
        Ok(())
    }
}

impl BookmarkStore for LocalStorage {
    fn load(&self) -> Result<Vec<Bookmark>> {
        match self.get_item(REPOS_KEY)? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, bookmarks: &[Bookmark]) -> Result<()> {
        let data = serde_json::to_string(bookmarks)?;
        self.set_item(REPOS_KEY, &data)?;
        tracing::debug!(count = bookmarks.len(), dir = %self.dir.display(), "bookmarks saved");
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemoryStore;
