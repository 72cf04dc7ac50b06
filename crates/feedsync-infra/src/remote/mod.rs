//! Simulated remote source.
//!
//! A stand-in for a real backend: an authoritative post/comment store,
//! optionally persisted to JSON files, behind artificial latency.

mod data_store;
mod simulated;

pub use data_store::{DataStoreError, RemoteDataStore};
pub use simulated::{RemoteConfig, SimulatedRemote};
