//! Storage layer
//!
//! Persists the item collection as a single pretty-printed JSON document
//! under a fixed file name in the data directory. Writes are atomic
//! (temp file, then rename) so the document is never left half-written.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::JsonPersistence;
