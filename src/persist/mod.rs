//! Progress persistence.
//!
//! - `storage`: key/value backends (JSON files, in-memory)
//! - `progress`: date-scoped, debounced daily progress store

pub mod storage;
pub mod progress;

pub use storage::{JsonFileStorage, MemoryStorage, ProgressStorage, StorageError};
pub use progress::{ProgressStore, PROGRESS_KEY};
