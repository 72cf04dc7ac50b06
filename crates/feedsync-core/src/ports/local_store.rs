use async_trait::async_trait;

use crate::domain::{Post, PostComment, PostPage};
use crate::error::StoreError;

/// Durable keyed storage for cached entities and pagination metadata.
///
/// Every `insert_*` is an upsert that replaces any row sharing the same key.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Posts ordered by id ascending, skipping `page * page_size` and taking
    /// at most `page_size`.
    async fn get_posts(&self, page: u32, page_size: u32) -> Result<Vec<Post>, StoreError>;

    async fn get_post(&self, id: i64) -> Result<Option<Post>, StoreError>;

    async fn insert_posts(&self, posts: Vec<Post>) -> Result<(), StoreError>;

    async fn get_post_page(&self, page: u32, page_size: u32)
    -> Result<Option<PostPage>, StoreError>;

    async fn insert_post_page(&self, page: PostPage) -> Result<(), StoreError>;

    /// Set the liked flag of a cached post. Unknown ids are left alone.
    async fn update_like(&self, id: i64, liked: bool) -> Result<(), StoreError>;

    /// Comments of one post, ordered by comment id.
    async fn get_comments(&self, post_id: i64) -> Result<Vec<PostComment>, StoreError>;

    async fn insert_comments(&self, comments: Vec<PostComment>) -> Result<(), StoreError>;
}
