//! Functional core for worktrack.
//!
//! Pure data types, validation, date arithmetic and the policies that the
//! shell crate applies around I/O. Nothing in here touches the filesystem or
//! the network; the async seams the shell implements are declared as traits
//! ([`storage::StorageBackend`], [`holiday::JsonFetcher`]).

pub mod absence;
pub mod calendar;
pub mod holiday;
pub mod serde;
pub mod settings;
pub mod storage;
pub mod todo;
