//! Hand-written port fakes shared by the core's unit tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use feedsync_shared::{ActionResult, ApiResponse, RemoteComment, RemotePost, RemotePostPage};

use crate::domain::{Post, PostComment, PostPage};
use crate::error::{RemoteError, StoreError};
use crate::ports::{Connectivity, LocalStore, RemoteResult, RemoteSource};

pub(crate) fn post(id: i64) -> Post {
    Post {
        id,
        image_url: format!("https://picsum.photos/id/{id}/600/400"),
        title: format!("Post {id}"),
        content: format!("Content of post {id}"),
        liked: false,
        created_at: 1_700_000_000_000 + id,
    }
}

/// Connectivity flag flipped by hand.
pub(crate) struct Toggle(AtomicBool);

impl Toggle {
    pub(crate) fn new(online: bool) -> Arc<Self> {
        Arc::new(Self(AtomicBool::new(online)))
    }

    pub(crate) fn set(&self, online: bool) {
        self.0.store(online, Ordering::SeqCst);
    }
}

impl Connectivity for Toggle {
    fn is_online(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
struct Tables {
    posts: BTreeMap<i64, Post>,
    pages: HashMap<(u32, u32), PostPage>,
    comments: BTreeMap<i64, PostComment>,
}

#[derive(Default)]
pub(crate) struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub(crate) fn post_count(&self) -> usize {
        self.tables.lock().unwrap().posts.len()
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn get_posts(&self, page: u32, page_size: u32) -> Result<Vec<Post>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .posts
            .values()
            .skip(PostPage::offset(page, page_size) as usize)
            .take(page_size as usize)
            .cloned()
            .collect())
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, StoreError> {
        Ok(self.tables.lock().unwrap().posts.get(&id).cloned())
    }

    async fn insert_posts(&self, posts: Vec<Post>) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
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
        Ok(self.tables.lock().unwrap().pages.get(&(page, page_size)).copied())
    }

    async fn insert_post_page(&self, page: PostPage) -> Result<(), StoreError> {
        self.tables
            .lock()
            .unwrap()
            .pages
            .insert((page.page, page.page_size), page);
        Ok(())
    }

    async fn update_like(&self, id: i64, liked: bool) -> Result<(), StoreError> {
        if let Some(post) = self.tables.lock().unwrap().posts.get_mut(&id) {
            post.liked = liked;
        }
        Ok(())
    }

    async fn get_comments(&self, post_id: i64) -> Result<Vec<PostComment>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn insert_comments(&self, comments: Vec<PostComment>) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        for comment in comments {
            tables.comments.insert(comment.comment_id, comment);
        }
        Ok(())
    }
}

/// Remote holding `1..=n` posts, counting every call.
pub(crate) struct FakeRemote {
    posts: Mutex<Vec<Post>>,
    comments: Mutex<Vec<RemoteComment>>,
    calls: AtomicUsize,
    failing: AtomicBool,
    latency: Duration,
}

impl FakeRemote {
    pub(crate) fn with_posts(n: i64) -> Self {
        Self {
            posts: Mutex::new((1..=n).map(post).collect()),
            comments: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
            latency: Duration::ZERO,
        }
    }

    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    async fn enter(&self) -> Result<(), RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(RemoteError::Transport("connection reset".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteSource for FakeRemote {
    async fn get_posts(&self, page: u32, page_size: u32) -> RemoteResult<RemotePostPage> {
        self.enter().await?;
        let posts = self.posts.lock().unwrap();
        let total = posts.len() as u64;
        let slice = posts
            .iter()
            .skip(PostPage::offset(page, page_size) as usize)
            .take(page_size as usize)
            .cloned()
            .map(RemotePost::from_post)
            .collect();
        Ok(ApiResponse::ok(RemotePostPage {
            page,
            page_size,
            posts: slice,
            total,
            end_of_page: PostPage::new(page, page_size, total).end_of_page,
        }))
    }

    async fn get_post(&self, id: i64) -> RemoteResult<RemotePost> {
        self.enter().await?;
        let posts = self.posts.lock().unwrap();
        let found = posts.iter().find(|p| p.id == id).cloned();
        Ok(ApiResponse::from_option(found.map(RemotePost::from_post)))
    }

    async fn update_post_liked(&self, id: i64, liked: bool) -> RemoteResult<ActionResult> {
        self.enter().await?;
        let mut posts = self.posts.lock().unwrap();
        let success = match posts.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                post.liked = liked;
                true
            }
            None => false,
        };
        Ok(ApiResponse {
            success,
            data: Some(ActionResult { success }),
            message: None,
        })
    }

    async fn get_comments(&self, post_id: i64) -> RemoteResult<Vec<RemoteComment>> {
        self.enter().await?;
        let comments = self.comments.lock().unwrap();
        Ok(ApiResponse::ok(
            comments.iter().filter(|c| c.post_id == post_id).cloned().collect(),
        ))
    }

    async fn insert_comment(&self, post_id: i64, text: &str) -> RemoteResult<RemoteComment> {
        self.enter().await?;
        if !self.posts.lock().unwrap().iter().any(|p| p.id == post_id) {
            return Ok(ApiResponse::failed("unknown post"));
        }
        let mut comments = self.comments.lock().unwrap();
        let comment = RemoteComment {
            comment_id: comments.len() as i64,
            post_id,
            comment: text.to_string(),
            created_at: 1_700_000_000_000,
        };
        comments.push(comment.clone());
        Ok(ApiResponse::ok(comment))
    }
}

trait FromPost {
    fn from_post(post: Post) -> Self;
}

impl FromPost for RemotePost {
    fn from_post(post: Post) -> Self {
        RemotePost {
            id: post.id,
            image_url: post.image_url,
            title: post.title,
            content: post.content,
            liked: post.liked,
            created_at: post.created_at,
        }
    }
}
