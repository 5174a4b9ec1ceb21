//! Durable storage for the record store.
//!
//! [`RecordStore`] gives typed whole-collection access on top of a
//! [`StorageBackend`](worktrack_core::storage::StorageBackend). Two backends
//! are provided: a JSON file for normal use and an in-memory one for tests.

mod json_file;
mod memory;
mod record_store;

pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;
pub use record_store::RecordStore;
