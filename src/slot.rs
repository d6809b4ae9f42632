// Named JSON slots in a storage directory

use eyre::{Context, Result, eyre};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persistent key-value storage where each key owns one `{key}.json` file.
///
/// This is the crate's stand-in for the browser's local storage: a handful of
/// named string-valued slots, read whole and written whole.
pub struct SlotStorage {
    base_path: PathBuf,
}

impl SlotStorage {
    /// Open or create slot storage rooted at the given directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).context("Failed to create storage directory")?;
        Ok(Self { base_path })
    }

    /// Root directory of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Whether the slot currently holds data.
    pub fn exists(&self, key: &str) -> bool {
        self.slot_path(key).exists()
    }

    /// Read a slot's contents. A slot that was never written reads as `None`.
    pub fn read(&self, key: &str) -> Result<Option<String>> {
        Self::validate_key(key)?;
        let path = self.slot_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).context("Failed to read slot file")?;
        Ok(Some(contents))
    }

    /// Replace a slot's contents, flushing to disk before returning.
    pub fn write(&self, key: &str, contents: &str) -> Result<()> {
        Self::validate_key(key)?;
        let path = self.slot_path(key);

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&path)
            .context("Failed to open slot file for writing")?;

        // Exclusive lock before truncating so a concurrent reader never sees
        // a half-written slot
        file.lock_exclusive().context("Failed to acquire slot file lock")?;

        file.set_len(0)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;

        debug!(key, bytes = contents.len(), "Wrote slot");

        // Lock is released when file is dropped
        Ok(())
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }

    fn validate_key(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(eyre!("Slot key cannot be empty"));
        }
        if key.len() > 64 {
            return Err(eyre!("Slot key too long: {} (max 64 chars)", key));
        }
        if !key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
            return Err(eyre!("Invalid slot key: {} (must be alphanumeric with _/-)", key));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("store");

        let storage = SlotStorage::open(&dir).unwrap();
        assert!(dir.exists());
        assert_eq!(storage.base_path(), dir);
    }

    #[test]
    fn test_read_missing_slot() {
        let temp = TempDir::new().unwrap();
        let storage = SlotStorage::open(temp.path()).unwrap();

        assert!(!storage.exists("tasks"));
        assert_eq!(storage.read("tasks").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let storage = SlotStorage::open(temp.path()).unwrap();

        storage.write("tasks", "[1,2,3]").unwrap();
        assert!(storage.exists("tasks"));
        assert_eq!(storage.read("tasks").unwrap().unwrap(), "[1,2,3]");
        assert!(temp.path().join("tasks.json").exists());
    }

    #[test]
    fn test_write_replaces_longer_contents() {
        let temp = TempDir::new().unwrap();
        let storage = SlotStorage::open(temp.path()).unwrap();

        storage.write("tasks", "a long initial payload").unwrap();
        storage.write("tasks", "[]").unwrap();
        assert_eq!(storage.read("tasks").unwrap().unwrap(), "[]");
    }

    #[test]
    fn test_validate_key() {
        let temp = TempDir::new().unwrap();
        let storage = SlotStorage::open(temp.path()).unwrap();

        assert!(storage.write("", "x").is_err());
        assert!(storage.write("bad/key", "x").is_err());
        assert!(storage.write(&"a".repeat(65), "x").is_err());
        assert!(storage.write("ok_key-1", "x").is_ok());
    }
}
