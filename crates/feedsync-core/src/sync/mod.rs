//! Online-first sync repositories.
//!
//! Every read snapshots connectivity, fills the local store from the remote
//! when online, and then answers from the local store. Writes go to the remote
//! first and are mirrored locally only after the remote accepted them; offline
//! writes are dropped, not queued.

mod comment_repository;
mod post_repository;

#[cfg(test)]
pub(crate) mod test_support;

use std::future::Future;

use crate::error::RemoteError;
use crate::ports::{Connectivity, RemoteResult, ResponseExt};

pub use comment_repository::CommentSyncRepository;
pub use post_repository::PostSyncRepository;

/// Where the value handed back by a read came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    /// The remote was consulted and the cache was refilled from it.
    Remote,
    /// No connectivity; the cache answered alone.
    Offline,
    /// Online, but the remote failed. The cached copy may be stale.
    Stale(RemoteError),
}

impl Freshness {
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale(_))
    }
}

/// A value read from the local store plus how fresh it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synced<T> {
    pub value: T,
    pub source: Freshness,
}

/// Outcome of an online-first write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome<T> {
    /// The remote accepted the write and the local store mirrors it.
    Committed(T),
    /// No connectivity; the write was dropped and the local store is untouched.
    Offline,
    /// The remote refused or could not be reached; the local store is untouched.
    Rejected(RemoteError),
}

impl<T> WriteOutcome<T> {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// Result of asking the remote, before anything touches the local store.
pub(crate) enum Consulted<T> {
    Offline,
    Fetched(T),
    Failed(RemoteError),
}

/// Calls `fetch` only when `connectivity` reports online.
pub(crate) async fn consult<T, F, Fut>(
    connectivity: &dyn Connectivity,
    operation: &'static str,
    fetch: F,
) -> Consulted<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = RemoteResult<T>>,
{
    if !connectivity.is_online() {
        return Consulted::Offline;
    }

    match fetch().await.into_payload(operation) {
        Ok(payload) => Consulted::Fetched(payload),
        Err(e) => {
            tracing::debug!(operation, error = %e, "Remote call failed");
            Consulted::Failed(e)
        }
    }
}
