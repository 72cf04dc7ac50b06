//! In-memory local store - used when no database is configured.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use feedsync_core::StoreError;
use feedsync_core::domain::{Post, PostComment, PostPage};
use feedsync_core::ports::LocalStore;

#[derive(Default)]
struct Tables {
    posts: BTreeMap<i64, Post>,
    pages: HashMap<(u32, u32), PostPage>,
    comments: BTreeMap<i64, PostComment>,
}

/// In-memory local store using ordered maps behind an async RwLock.
///
/// Ordered maps give id-ascending iteration for free.
/// Note: Data is lost on process restart.
pub struct InMemoryLocalStore {
    tables: RwLock<Tables>,
}

impl InMemoryLocalStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryLocalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocalStore for InMemoryLocalStore {
    async fn get_posts(&self, page: u32, page_size: u32) -> Result<Vec<Post>, StoreError> {
        let tables = self.tables.read().await;
        let offset = usize::try_from(PostPage::offset(page, page_size))
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(tables
            .posts
            .values()
            .skip(offset)
            .take(page_size as usize)
            .cloned()
            .collect())
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, StoreError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn insert_posts(&self, posts: Vec<Post>) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        for post in posts {
            tables.posts.insert(post.id, post);
        }
        Ok(())
    }

    async fn get_post_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Option<PostPage>, StoreError> {
        Ok(self.tables.read().await.pages.get(&(page, page_size)).copied())
    }

    async fn insert_post_page(&self, page: PostPage) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.pages.insert((page.page, page.page_size), page);
        Ok(())
    }

    async fn update_like(&self, id: i64, liked: bool) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(post) = tables.posts.get_mut(&id) {
            post.liked = liked;
        }
        Ok(())
    }

    async fn get_comments(&self, post_id: i64) -> Result<Vec<PostComment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn insert_comments(&self, comments: Vec<PostComment>) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        for comment in comments {
            tables.comments.insert(comment.comment_id, comment);
        }
        Ok(())
    }
}
