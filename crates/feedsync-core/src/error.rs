//! Error types for each layer of the engine.

use thiserror::Error;

/// Hard failures of a sync operation.
///
/// Remote failures are deliberately absent: they are soft and surface through
/// [`Freshness::Stale`](crate::sync::Freshness) or
/// [`WriteOutcome::Rejected`](crate::sync::WriteOutcome) instead.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Local store failure: {0}")]
    Store(#[from] StoreError),
}

/// Local store errors.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Store connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Remote source errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("Remote transport failed: {0}")]
    Transport(String),

    #[error("Remote rejected {operation}")]
    Rejected { operation: &'static str },

    #[error("Remote returned no payload for {operation}")]
    MissingPayload { operation: &'static str },
}

/// Network source errors.
#[derive(Debug, Error)]
pub enum ConnectivityError {
    #[error("Network callback registration failed: {0}")]
    Registration(String),
}
