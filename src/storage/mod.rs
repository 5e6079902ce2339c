//! Storage module
//!
//! This module holds the persistent key-value layer the data store caches into.

pub mod backend;
pub mod keys;
pub mod kv;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use kv::KeyValueStore;
