//! On-disk storage of drive uploads, one file per storage key.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::types::StorageKey;

#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the upload directory if needed.
    pub fn ensure_root(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root)
    }

    pub fn path_for(&self, key: &StorageKey) -> PathBuf {
        self.root.join(key.to_string())
    }

    /// Copies `source` under `key` and returns the number of bytes written.
    pub fn store(&self, key: &StorageKey, source: &Path) -> io::Result<u64> {
        self.ensure_root()?;
        fs::copy(source, self.path_for(key))
    }

    /// Removes the stored file. A file that is already gone is not an error.
    pub fn remove(&self, key: &StorageKey) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn store_and_remove_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("uploads"));
        let mut source = tempfile::NamedTempFile::new().unwrap();
        source.write_all(b"jaarverslag").unwrap();

        let key = StorageKey::new();
        let written = store.store(&key, source.path()).unwrap();

        assert_eq!(written, 11);
        assert_eq!(fs::read(store.path_for(&key)).unwrap(), b"jaarverslag");

        store.remove(&key).unwrap();
        assert!(!store.path_for(&key).exists());
        store.remove(&key).unwrap();
    }
}
