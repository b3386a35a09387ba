//! File-backed blob store

use std::{
    fs,
    io::ErrorKind,
    path::PathBuf,
};

use tracing::{debug, info};

use super::BlobStore;
use crate::error::{StorageError, StorageResult};

/// Stores each blob as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        info!("Using data directory {}", dir.display());
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No blob at {}", path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, contents: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        // Write then rename so a crash never leaves a half-written list
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &path)?;
        debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_blob_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::open(dir.path()).unwrap();
        assert!(store.read("exercises").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBlobStore::open(dir.path().join("nested")).unwrap();
        store.write("exercises", r#"[{"id":1}]"#).unwrap();
        assert_eq!(
            store.read("exercises").unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
        assert!(dir.path().join("nested").join("exercises.json").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBlobStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.write("../escape", "[]"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(store.read("").is_err());
    }
}
