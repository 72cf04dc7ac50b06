//! Remote source with artificial latency over a [`RemoteDataStore`].

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use feedsync_core::RemoteError;
use feedsync_core::ports::{RemoteResult, RemoteSource};
use feedsync_shared::{ActionResult, ApiResponse, RemoteComment, RemotePost, RemotePostPage};

use super::data_store::{DataStoreError, RemoteDataStore};

/// Simulated remote configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Delay added to every call.
    pub latency: Duration,
    /// Where the remote dataset is persisted. In-memory when `None`.
    pub data_dir: Option<PathBuf>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_secs(2),
            data_dir: None,
        }
    }
}

impl RemoteConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            latency: Duration::from_millis(
                std::env::var("REMOTE_LATENCY_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2000),
            ),
            data_dir: std::env::var("REMOTE_DATA_DIR").ok().map(PathBuf::from),
        }
    }
}

/// Fake remote. Every call sleeps for the configured latency first.
pub struct SimulatedRemote {
    data: RemoteDataStore,
    latency: Duration,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl SimulatedRemote {
    pub fn new(data: RemoteDataStore, latency: Duration) -> Self {
        Self {
            data,
            latency,
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// Open (or seed) the dataset described by `config`.
    pub async fn from_config(config: &RemoteConfig) -> Result<Self, DataStoreError> {
        let data = match &config.data_dir {
            Some(dir) => RemoteDataStore::open(dir).await?,
            None => RemoteDataStore::seeded()?,
        };
        Ok(Self::new(data, config.latency))
    }

    /// Make every subsequent call fail at the transport level.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Calls received so far, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn data(&self) -> &RemoteDataStore {
        &self.data
    }

    async fn round_trip(&self, operation: &'static str) -> Result<(), RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(operation, latency_ms = self.latency.as_millis() as u64, "Remote call");

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(RemoteError::Transport(format!("{operation}: connection refused")));
        }
        Ok(())
    }
}

fn transport(e: DataStoreError) -> RemoteError {
    RemoteError::Transport(e.to_string())
}

#[async_trait]
impl RemoteSource for SimulatedRemote {
    async fn get_posts(&self, page: u32, page_size: u32) -> RemoteResult<RemotePostPage> {
        self.round_trip("get_posts").await?;
        Ok(ApiResponse::ok(self.data.get_posts(page, page_size).await))
    }

    async fn get_post(&self, id: i64) -> RemoteResult<RemotePost> {
        self.round_trip("get_post").await?;
        Ok(ApiResponse::from_option(self.data.get_post(id).await))
    }

    async fn update_post_liked(&self, id: i64, liked: bool) -> RemoteResult<ActionResult> {
        self.round_trip("update_post_liked").await?;
        let success = self.data.update_post_liked(id, liked).await.map_err(transport)?;
        Ok(ApiResponse {
            success,
            data: Some(ActionResult { success }),
            message: None,
        })
    }

    async fn get_comments(&self, post_id: i64) -> RemoteResult<Vec<RemoteComment>> {
        self.round_trip("get_comments").await?;
        Ok(ApiResponse::ok(self.data.get_comments(post_id).await))
    }

    async fn insert_comment(&self, post_id: i64, text: &str) -> RemoteResult<RemoteComment> {
        self.round_trip("insert_comment").await?;
        let comment = self
            .data
            .insert_comment(post_id, text)
            .await
            .map_err(transport)?;
        Ok(match comment {
            Some(comment) => ApiResponse::ok(comment),
            None => ApiResponse::failed(format!("unknown post {post_id}")),
        })
    }
}
