//! In-memory blob store

use std::{cell::RefCell, collections::HashMap, io, rc::Rc};

use tracing::debug;

use super::BlobStore;
use crate::error::{StorageError, StorageResult};

#[derive(Debug, Default)]
struct Inner {
    blobs: HashMap<String, String>,
    fail_writes: bool,
}

/// Blob store that lives only as long as the process.
///
/// Clones share the same contents, so a test can keep a handle while the
/// exercise store owns another one.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one blob
    pub fn with_blob(key: &str, contents: &str) -> Self {
        let store = Self::new();
        store
            .inner
            .borrow_mut()
            .blobs
            .insert(key.to_string(), contents.to_string());
        store
    }

    /// Current contents of a blob
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().blobs.get(key).cloned()
    }

    /// Make every subsequent write fail, simulating an unwritable backend
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&mut self, key: &str, contents: &str) -> StorageResult<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::Other,
                "writes disabled",
            )));
        }
        debug!("Writing {} bytes to in-memory blob '{}'", contents.len(), key);
        inner.blobs.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_contents() {
        let store = MemoryBlobStore::new();
        let mut writer = store.clone();
        writer.write("exercises", "[]").unwrap();
        assert_eq!(store.read("exercises").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_failing_writes() {
        let mut store = MemoryBlobStore::with_blob("exercises", "[]");
        store.set_fail_writes(true);
        assert!(store.write("exercises", "[1]").is_err());
        assert_eq!(store.get("exercises").as_deref(), Some("[]"));
    }
}
