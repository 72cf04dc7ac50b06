//! Data Transfer Objects - payloads carried inside an [`ApiResponse`](crate::ApiResponse).

use serde::{Deserialize, Serialize};

/// A post as the remote source reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePost {
    pub id: i64,
    pub image_url: String,
    pub title: String,
    pub content: String,
    pub liked: bool,
    /// Epoch millis.
    pub created_at: i64,
}

/// One page of posts plus the paging metadata known at fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePostPage {
    pub page: u32,
    pub page_size: u32,
    pub posts: Vec<RemotePost>,
    pub total: u64,
    pub end_of_page: bool,
}

/// A comment as the remote source reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteComment {
    pub comment_id: i64,
    pub post_id: i64,
    pub comment: String,
    pub created_at: i64,
}

/// Result of a remote mutation that carries no entity back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
}
