use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Post, PostPage};
use crate::error::{RemoteError, SyncError};
use crate::pagination::{Page, PageSource};
use crate::ports::{Connectivity, LocalStore, RemoteSource};

use super::{Consulted, Freshness, Synced, WriteOutcome, consult};

/// Online-first repository for [`Post`]s and their page metadata.
pub struct PostSyncRepository {
    store: Arc<dyn LocalStore>,
    remote: Arc<dyn RemoteSource>,
    connectivity: Arc<dyn Connectivity>,
}

impl PostSyncRepository {
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

    /// Read one page of posts together with its cached metadata.
    ///
    /// When online the remote page is written through first: posts, then the
    /// page row, so a cached page row implies its posts were cached too.
    pub async fn read_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Synced<Page<Post>>, SyncError> {
        let consulted = consult(self.connectivity.as_ref(), "get_posts", || {
            self.remote.get_posts(page, page_size)
        })
        .await;

        let source = match consulted {
            Consulted::Fetched(remote_page) => {
                let meta = PostPage::from(&remote_page);
                let posts: Vec<Post> = remote_page.posts.into_iter().map(Post::from).collect();
                tracing::debug!(page, page_size, fetched = posts.len(), "Writing page through");

                self.store.insert_posts(posts).await?;
                self.store.insert_post_page(meta).await?;
                Freshness::Remote
            }
            Consulted::Failed(e) => {
                tracing::warn!(
                    page,
                    page_size,
                    error = %e,
                    "Serving cached page after remote failure"
                );
                Freshness::Stale(e)
            }
            Consulted::Offline => Freshness::Offline,
        };

        let meta = self.store.get_post_page(page, page_size).await?;
        let items = self.store.get_posts(page, page_size).await?;

        Ok(Synced {
            value: Page { meta, items },
            source,
        })
    }

    /// Read a single post. `None` when neither tier knows the id.
    pub async fn read(&self, id: i64) -> Result<Synced<Option<Post>>, SyncError> {
        let consulted = consult(self.connectivity.as_ref(), "get_post", || {
            self.remote.get_post(id)
        })
        .await;

        let source = match consulted {
            Consulted::Fetched(remote_post) => {
                self.store.insert_posts(vec![Post::from(remote_post)]).await?;
                Freshness::Remote
            }
            // An unknown id is an answer, not a failure.
            Consulted::Failed(RemoteError::Rejected { .. }) => {
                tracing::debug!(post_id = id, "Post unknown to remote");
                Freshness::Remote
            }
            Consulted::Failed(e) => {
                tracing::warn!(
                    post_id = id,
                    error = %e,
                    "Serving cached post after remote failure"
                );
                Freshness::Stale(e)
            }
            Consulted::Offline => Freshness::Offline,
        };

        let value = self.store.get_post(id).await?;
        Ok(Synced { value, source })
    }

    /// Set the liked flag remotely, then mirror it locally.
    ///
    /// Offline the change is dropped. No idempotency key is sent, so a retry
    /// after an interrupted call repeats the remote write.
    pub async fn update_like(&self, id: i64, liked: bool) -> Result<WriteOutcome<()>, SyncError> {
        let consulted = consult(self.connectivity.as_ref(), "update_post_liked", || {
            self.remote.update_post_liked(id, liked)
        })
        .await;

        match consulted {
            Consulted::Fetched(result) if result.success => {
                self.store.update_like(id, liked).await?;
                tracing::debug!(post_id = id, liked, "Like committed");
                Ok(WriteOutcome::Committed(()))
            }
            Consulted::Fetched(_) => {
                let e = RemoteError::Rejected {
                    operation: "update_post_liked",
                };
                tracing::warn!(post_id = id, error = %e, "Like not applied");
                Ok(WriteOutcome::Rejected(e))
            }
            Consulted::Failed(e) => {
                tracing::warn!(post_id = id, error = %e, "Like not applied");
                Ok(WriteOutcome::Rejected(e))
            }
            Consulted::Offline => {
                tracing::warn!(post_id = id, liked, "Offline, dropping like");
                Ok(WriteOutcome::Offline)
            }
        }
    }
}

#[async_trait]
impl PageSource for PostSyncRepository {
    type Item = Post;

    async fn read_page(&self, page: u32, page_size: u32) -> Result<Synced<Page<Post>>, SyncError> {
        PostSyncRepository::read_page(self, page, page_size).await
    }
}
