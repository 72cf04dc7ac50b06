//! # Feedsync Core
//!
//! The online-first synchronization layer.
//! This crate owns the domain entities, the ports the engine talks through, the
//! per-entity sync repositories and the pagination controller. It has no
//! infrastructure dependencies: stores, remotes and network sources are
//! injected as trait objects.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod sync;

pub use error::{ConnectivityError, RemoteError, StoreError, SyncError};
pub use pagination::{LoadOutcome, Page, PageSource, PagerState, PaginationController};
pub use sync::{CommentSyncRepository, Freshness, PostSyncRepository, Synced, WriteOutcome};
