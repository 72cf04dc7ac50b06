//! # Feedsync Infrastructure
//!
//! Concrete implementations of the ports defined in `feedsync-core`:
//! the connectivity monitor, local stores and a simulated remote.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `sqlite` - SQLite local store via SeaORM

pub mod connectivity;
pub mod remote;
pub mod store;

// Re-exports - In-Memory
pub use connectivity::{NetworkMonitor, SimulatedNetwork};
pub use remote::{RemoteConfig, RemoteDataStore, SimulatedRemote};
pub use store::InMemoryLocalStore;

// Re-exports - SQLite
#[cfg(feature = "sqlite")]
pub use store::{SqliteConfig, SqliteLocalStore};
