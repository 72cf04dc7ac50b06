use feedsync_shared::{RemotePost, RemotePostPage};
use serde::{Deserialize, Serialize};

/// Post entity - a feed item as held in the local cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub image_url: String,
    pub title: String,
    pub content: String,
    pub liked: bool,
    /// Epoch millis.
    pub created_at: i64,
}

impl From<RemotePost> for Post {
    fn from(remote: RemotePost) -> Self {
        Self {
            id: remote.id,
            image_url: remote.image_url,
            title: remote.title,
            content: remote.content,
            liked: remote.liked,
            created_at: remote.created_at,
        }
    }
}

/// Pagination metadata cached per `(page, page_size)`.
///
/// `end_of_page` is always `page * page_size >= total`; use [`PostPage::new`]
/// so the flag cannot drift from `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPage {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub end_of_page: bool,
}

impl PostPage {
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        Self {
            page,
            page_size,
            total,
            end_of_page: u64::from(page) * u64::from(page_size) >= total,
        }
    }

    /// Whether a page after this one holds any entities. Never true for a
    /// zero page size, whose pages are all empty.
    pub fn has_next(&self) -> bool {
        self.page_size > 0
            && (u64::from(self.page) + 1) * u64::from(self.page_size) < self.total
    }

    /// Offset of the first entity of this page.
    pub fn offset(page: u32, page_size: u32) -> u64 {
        u64::from(page) * u64::from(page_size)
    }
}

impl From<&RemotePostPage> for PostPage {
    fn from(remote: &RemotePostPage) -> Self {
        Self::new(remote.page, remote.page_size, remote.total)
    }
}
