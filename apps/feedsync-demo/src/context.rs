//! Application context - owns every long-lived component of the engine.

use std::sync::Arc;

use feedsync_core::ports::{InterfaceId, LocalStore};
use feedsync_core::{CommentSyncRepository, PaginationController, PostSyncRepository};
use feedsync_infra::{InMemoryLocalStore, NetworkMonitor, SimulatedNetwork, SimulatedRemote};

#[cfg(feature = "sqlite")]
use feedsync_infra::SqliteLocalStore;

use crate::config::{AppConfig, LocalStoreKind};

/// The interface the simulated network brings up at startup.
pub const PRIMARY_INTERFACE: InterfaceId = 1;

/// Process-wide context, built once at startup.
pub struct AppContext {
    pub network: Arc<SimulatedNetwork>,
    pub monitor: Arc<NetworkMonitor>,
    pub remote: Arc<SimulatedRemote>,
    pub posts: Arc<PostSyncRepository>,
    pub comments: CommentSyncRepository,
    pub pager: PaginationController<PostSyncRepository>,
}

impl AppContext {
    /// Wire network, monitor, stores and repositories from `config`.
    pub async fn build(config: &AppConfig) -> anyhow::Result<Self> {
        let network = Arc::new(if config.start_online {
            SimulatedNetwork::with_interfaces([PRIMARY_INTERFACE])
        } else {
            SimulatedNetwork::offline()
        });
        let monitor = Arc::new(NetworkMonitor::start(network.clone())?);

        let store = build_store(config).await;
        let remote = Arc::new(SimulatedRemote::from_config(&config.remote).await?);

        let posts = Arc::new(PostSyncRepository::new(
            store.clone(),
            remote.clone(),
            monitor.clone(),
        ));
        let comments = CommentSyncRepository::new(store, remote.clone(), monitor.clone());
        let pager = PaginationController::new(posts.clone(), config.page_size);

        tracing::info!(online = config.start_online, "Application context initialized");

        Ok(Self {
            network,
            monitor,
            remote,
            posts,
            comments,
            pager,
        })
    }

    /// Unregister from the network source. Safe to call more than once.
    pub fn shutdown(&self) {
        self.monitor.shutdown();
        tracing::info!(remote_calls = self.remote.call_count(), "Application context shut down");
    }
}

#[cfg(feature = "sqlite")]
async fn build_store(config: &AppConfig) -> Arc<dyn LocalStore> {
    match config.store {
        LocalStoreKind::Sqlite => match SqliteLocalStore::connect(&config.sqlite).await {
            Ok(store) => {
                tracing::info!(url = %config.sqlite.url, "Using SQLite local store");
                Arc::new(store)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Failed to open SQLite store. Using in-memory fallback."
                );
                Arc::new(InMemoryLocalStore::new())
            }
        },
        LocalStoreKind::Memory => Arc::new(InMemoryLocalStore::new()),
    }
}

#[cfg(not(feature = "sqlite"))]
async fn build_store(config: &AppConfig) -> Arc<dyn LocalStore> {
    if config.store == LocalStoreKind::Sqlite {
        tracing::warn!("Built without sqlite feature - using in-memory local store");
    }
    Arc::new(InMemoryLocalStore::new())
}
