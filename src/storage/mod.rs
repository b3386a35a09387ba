//! Persistence backends
//!
//! The exercise store talks to storage only through the `BlobStore` port, so
//! any backend that can read and write a named string blob can hold the list.

pub mod file;
pub mod memory;

use crate::error::StorageResult;

// Re-export main types
pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

/// Read/write access to named string blobs
pub trait BlobStore {
    /// Fetch the blob stored under `key`, or `None` if nothing was written yet
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the blob stored under `key`
    fn write(&mut self, key: &str, contents: &str) -> StorageResult<()>;
}
