//! Local store implementations - SQLite and in-memory.

mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::InMemoryLocalStore;

#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteConfig, SqliteLocalStore};
