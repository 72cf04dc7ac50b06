use std::sync::Arc;

use crate::domain::PostComment;
use crate::error::SyncError;
use crate::ports::{Connectivity, LocalStore, RemoteSource};

use super::{Consulted, Freshness, Synced, WriteOutcome, consult};

/// Online-first repository for [`PostComment`]s.
pub struct CommentSyncRepository {
    store: Arc<dyn LocalStore>,
    remote: Arc<dyn RemoteSource>,
    connectivity: Arc<dyn Connectivity>,
}

impl CommentSyncRepository {
    pub fn new(
        store: Arc<dyn LocalStore>,
        remote: Arc<dyn RemoteSource>,
        connectivity: Arc<dyn Connectivity>,
    ) -> Self {
        Self {
            store,
            remote,
            connectivity,
        }
    }

    /// Comments of a post, refreshed from the remote when online.
    pub async fn read(&self, post_id: i64) -> Result<Synced<Vec<PostComment>>, SyncError> {
        let consulted = consult(self.connectivity.as_ref(), "get_comments", || {
            self.remote.get_comments(post_id)
        })
        .await;

        let source = match consulted {
            Consulted::Fetched(remote_comments) => {
                let comments: Vec<PostComment> =
                    remote_comments.into_iter().map(PostComment::from).collect();
                tracing::debug!(post_id, fetched = comments.len(), "Writing comments through");
                self.store.insert_comments(comments).await?;
                Freshness::Remote
            }
            Consulted::Failed(e) => {
                tracing::warn!(post_id, error = %e, "Serving cached comments after remote failure");
                Freshness::Stale(e)
            }
            Consulted::Offline => Freshness::Offline,
        };

        let value = self.store.get_comments(post_id).await?;
        Ok(Synced { value, source })
    }

    /// Append a comment remotely, then cache the comment the remote created.
    ///
    /// Offline the comment is dropped. No idempotency key is sent, so a retry
    /// after an interrupted call can create the comment twice.
    pub async fn add_comment(
        &self,
        post_id: i64,
        text: &str,
    ) -> Result<WriteOutcome<PostComment>, SyncError> {
        let consulted = consult(self.connectivity.as_ref(), "insert_comment", || {
            self.remote.insert_comment(post_id, text)
        })
        .await;

        match consulted {
            Consulted::Fetched(remote_comment) => {
                let comment = PostComment::from(remote_comment);
                self.store.insert_comments(vec![comment.clone()]).await?;
                tracing::debug!(post_id, comment_id = comment.comment_id, "Comment committed");
                Ok(WriteOutcome::Committed(comment))
            }
            Consulted::Failed(e) => {
                tracing::warn!(post_id, error = %e, "Comment not added");
                Ok(WriteOutcome::Rejected(e))
            }
            Consulted::Offline => {
                tracing::warn!(post_id, "Offline, dropping comment");
                Ok(WriteOutcome::Offline)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;
    use crate::sync::test_support::{FakeRemote, MemoryStore, Toggle};

    fn repository(
        remote: &Arc<FakeRemote>,
        store: &Arc<MemoryStore>,
        online: &Arc<Toggle>,
    ) -> CommentSyncRepository {
        CommentSyncRepository::new(store.clone(), remote.clone(), online.clone())
    }

    #[tokio::test]
    async fn test_add_then_read_online() {
        let remote = Arc::new(FakeRemote::with_posts(5));
        let store = Arc::new(MemoryStore::default());
        let online = Toggle::new(true);
        let repo = repository(&remote, &store, &online);

        let outcome = repo.add_comment(3, "first").await.unwrap();
        let WriteOutcome::Committed(comment) = outcome else {
            panic!("expected committed comment, got {outcome:?}");
        };
        assert_eq!(comment.post_id, 3);

        let synced = repo.read(3).await.unwrap();
        assert_eq!(synced.source, Freshness::Remote);
        assert_eq!(synced.value, vec![comment]);
    }

    #[tokio::test]
    async fn test_offline_comment_is_dropped() {
        let remote = Arc::new(FakeRemote::with_posts(5));
        let store = Arc::new(MemoryStore::default());
        let online = Toggle::new(false);
        let repo = repository(&remote, &store, &online);

        assert_eq!(repo.add_comment(3, "lost").await.unwrap(), WriteOutcome::Offline);
        assert!(store.get_comments(3).await.unwrap().is_empty());
        assert_eq!(remote.calls(), 0);
    }

    #[tokio::test]
    async fn test_comment_on_unknown_post_is_rejected() {
        let remote = Arc::new(FakeRemote::with_posts(2));
        let store = Arc::new(MemoryStore::default());
        let online = Toggle::new(true);
        let repo = repository(&remote, &store, &online);

        let outcome = repo.add_comment(99, "nobody home").await.unwrap();

        assert_eq!(
            outcome,
            WriteOutcome::Rejected(RemoteError::Rejected {
                operation: "insert_comment"
            })
        );
    }

    #[tokio::test]
    async fn test_read_offline_serves_cache() {
        let remote = Arc::new(FakeRemote::with_posts(5));
        let store = Arc::new(MemoryStore::default());
        let online = Toggle::new(true);
        let repo = repository(&remote, &store, &online);
        repo.add_comment(1, "cached").await.unwrap();
        online.set(false);

        let synced = repo.read(1).await.unwrap();

        assert_eq!(synced.source, Freshness::Offline);
        assert_eq!(synced.value.len(), 1);
        assert_eq!(remote.calls(), 1);
    }

    #[tokio::test]
    async fn test_read_falls_back_when_remote_fails() {
        let remote = Arc::new(FakeRemote::with_posts(5));
        let store = Arc::new(MemoryStore::default());
        let online = Toggle::new(true);
        let repo = repository(&remote, &store, &online);
        repo.add_comment(1, "cached").await.unwrap();
        remote.set_failing(true);

        let synced = repo.read(1).await.unwrap();

        assert!(synced.source.is_stale());
        assert_eq!(synced.value[0].comment, "cached");
    }
}
