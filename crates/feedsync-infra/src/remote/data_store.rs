//! Authoritative data behind the simulated remote.
//!
//! Posts start from the bundled dataset the first time a data directory is
//! opened. Every mutation is written back to `posts.json` / `comments.json`
//! in the same envelope shape the bundle uses.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use feedsync_core::domain::PostPage;
use feedsync_shared::{ApiResponse, RemoteComment, RemotePost, RemotePostPage};

const POSTS_FILE: &str = "posts.json";
const COMMENTS_FILE: &str = "comments.json";
const SEED_POSTS: &str = include_str!("../../seed/posts.json");

/// Data store errors.
#[derive(Debug, thiserror::Error)]
pub enum DataStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

struct Collections {
    posts: Vec<RemotePost>,
    comments: Vec<RemoteComment>,
}

/// Post and comment collections, in insertion order.
pub struct RemoteDataStore {
    data_dir: Option<PathBuf>,
    collections: Mutex<Collections>,
}

impl RemoteDataStore {
    /// The bundled dataset, kept in memory only.
    pub fn seeded() -> Result<Self, DataStoreError> {
        Ok(Self::with_posts(seed_posts()?))
    }

    /// An in-memory store holding exactly `posts`.
    pub fn with_posts(posts: Vec<RemotePost>) -> Self {
        Self {
            data_dir: None,
            collections: Mutex::new(Collections {
                posts,
                comments: Vec::new(),
            }),
        }
    }

    /// Open a persisted store, seeding it on first run.
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self, DataStoreError> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir).await?;

        let persisted = read_collection::<RemotePost>(&data_dir.join(POSTS_FILE)).await?;
        let (posts, seeded) = match persisted {
            Some(posts) if !posts.is_empty() => (posts, false),
            _ => (seed_posts()?, true),
        };
        let comments = read_collection::<RemoteComment>(&data_dir.join(COMMENTS_FILE))
            .await?
            .unwrap_or_default();

        tracing::info!(
            dir = %data_dir.display(),
            posts = posts.len(),
            comments = comments.len(),
            seeded,
            "Remote data store opened"
        );

        let store = Self {
            data_dir: Some(data_dir),
            collections: Mutex::new(Collections { posts, comments }),
        };
        if seeded {
            let collections = store.collections.lock().await;
            store.write_collection(POSTS_FILE, &collections.posts).await?;
        }
        Ok(store)
    }

    pub async fn post_count(&self) -> usize {
        self.collections.lock().await.posts.len()
    }

    pub async fn get_posts(&self, page: u32, page_size: u32) -> RemotePostPage {
        let collections = self.collections.lock().await;
        let total = collections.posts.len() as u64;
        let offset = usize::try_from(PostPage::offset(page, page_size)).unwrap_or(usize::MAX);

        RemotePostPage {
            page,
            page_size,
            posts: collections
                .posts
                .iter()
                .skip(offset)
                .take(page_size as usize)
                .cloned()
                .collect(),
            total,
            end_of_page: PostPage::new(page, page_size, total).end_of_page,
        }
    }

    pub async fn get_post(&self, id: i64) -> Option<RemotePost> {
        let collections = self.collections.lock().await;
        collections.posts.iter().find(|p| p.id == id).cloned()
    }

    /// Returns false when the post does not exist. Memory is only updated
    /// once the change is persisted.
    pub async fn update_post_liked(&self, id: i64, liked: bool) -> Result<bool, DataStoreError> {
        let mut collections = self.collections.lock().await;
        let Some(index) = collections.posts.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        let mut staged = collections.posts.clone();
        staged[index].liked = liked;
        self.write_collection(POSTS_FILE, &staged).await?;

        collections.posts = staged;
        Ok(true)
    }

    pub async fn get_comments(&self, post_id: i64) -> Vec<RemoteComment> {
        let collections = self.collections.lock().await;
        collections
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect()
    }

    /// Append a comment. `None` when the post does not exist. Memory is only
    /// updated once the comment is persisted.
    pub async fn insert_comment(
        &self,
        post_id: i64,
        text: &str,
    ) -> Result<Option<RemoteComment>, DataStoreError> {
        let mut collections = self.collections.lock().await;
        if !collections.posts.iter().any(|p| p.id == post_id) {
            return Ok(None);
        }

        let comment = RemoteComment {
            comment_id: collections.comments.len() as i64,
            post_id,
            comment: text.to_string(),
            created_at: chrono::Utc::now().timestamp_millis(),
        };
        let mut staged = collections.comments.clone();
        staged.push(comment.clone());
        self.write_collection(COMMENTS_FILE, &staged).await?;

        collections.comments = staged;
        Ok(Some(comment))
    }

    async fn write_collection<T: Serialize>(
        &self,
        file: &str,
        items: &[T],
    ) -> Result<(), DataStoreError> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };

        let json = serde_json::to_string(&ApiResponse::ok(items))?;
        tokio::fs::write(dir.join(file), json).await?;
        Ok(())
    }
}

fn seed_posts() -> Result<Vec<RemotePost>, DataStoreError> {
    let response: ApiResponse<Vec<RemotePost>> = serde_json::from_str(SEED_POSTS)?;
    Ok(response.into_data().unwrap_or_default())
}

/// `None` when the file is missing or unreadable as a collection.
async fn read_collection<T: DeserializeOwned>(
    path: &Path,
) -> Result<Option<Vec<T>>, DataStoreError> {
    let json = match tokio::fs::read_to_string(path).await {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_str::<ApiResponse<Vec<T>>>(&json) {
        Ok(response) => Ok(response.into_data()),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable collection");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "feedsync-{name}-{}-{}",
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_bundled_seed_parses() {
        let posts = seed_posts().unwrap();
        assert_eq!(posts.len(), 30);
        assert!(posts.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_paging_clamps_to_total() {
        let store = RemoteDataStore::seeded().unwrap();

        let last = store.get_posts(2, 12).await;
        assert_eq!(last.posts.len(), 6);
        assert_eq!(last.total, 30);
        assert!(!last.end_of_page);

        let past = store.get_posts(3, 12).await;
        assert!(past.posts.is_empty());
        assert!(past.end_of_page);
    }

    #[tokio::test]
    async fn test_mutations_on_unknown_post() {
        let store = RemoteDataStore::seeded().unwrap();
        assert!(!store.update_post_liked(999, true).await.unwrap());
        assert_eq!(store.insert_comment(999, "hi").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_comment_ids_follow_insertion_order() {
        let store = RemoteDataStore::seeded().unwrap();
        let first = store.insert_comment(1, "a").await.unwrap().unwrap();
        let second = store.insert_comment(2, "b").await.unwrap().unwrap();

        assert_eq!(first.comment_id, 0);
        assert_eq!(second.comment_id, 1);
        assert_eq!(store.get_comments(2).await, vec![second]);
    }

    #[tokio::test]
    async fn test_open_seeds_then_reloads_persisted_state() {
        let dir = scratch_dir("reload");

        let store = RemoteDataStore::open(&dir).await.unwrap();
        assert_eq!(store.post_count().await, 30);
        assert!(store.update_post_liked(1, true).await.unwrap());
        store.insert_comment(1, "persisted").await.unwrap();
        drop(store);

        let reopened = RemoteDataStore::open(&dir).await.unwrap();
        assert!(reopened.get_post(1).await.unwrap().liked);
        assert_eq!(reopened.get_comments(1).await[0].comment, "persisted");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_failed_persist_leaves_memory_untouched() {
        let dir = scratch_dir("unwritable");
        let store = RemoteDataStore::open(&dir).await.unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(store.update_post_liked(1, true).await.is_err());
        assert!(!store.get_post(1).await.unwrap().liked);

        assert!(store.insert_comment(1, "lost").await.is_err());
        assert!(store.get_comments(1).await.is_empty());

        // Once the directory is back the next comment still gets id 0.
        std::fs::create_dir_all(&dir).unwrap();
        let comment = store.insert_comment(1, "kept").await.unwrap().unwrap();
        assert_eq!(comment.comment_id, 0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_corrupt_posts_file_reseeds() {
        let dir = scratch_dir("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(POSTS_FILE), "not json").unwrap();

        let store = RemoteDataStore::open(&dir).await.unwrap();
        assert_eq!(store.post_count().await, 30);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
