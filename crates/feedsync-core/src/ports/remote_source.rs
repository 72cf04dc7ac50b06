use async_trait::async_trait;
use feedsync_shared::{ActionResult, ApiResponse, RemoteComment, RemotePost, RemotePostPage};

use crate::error::RemoteError;

/// What a remote call yields: a transport-level result around the envelope.
pub type RemoteResult<T> = Result<ApiResponse<T>, RemoteError>;

/// The remote side of the engine.
///
/// None of these calls carry an idempotency key; retrying a mutation can
/// repeat its effect remotely.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn get_posts(&self, page: u32, page_size: u32) -> RemoteResult<RemotePostPage>;

    async fn get_post(&self, id: i64) -> RemoteResult<RemotePost>;

    async fn update_post_liked(&self, id: i64, liked: bool) -> RemoteResult<ActionResult>;

    async fn get_comments(&self, post_id: i64) -> RemoteResult<Vec<RemoteComment>>;

    async fn insert_comment(&self, post_id: i64, text: &str) -> RemoteResult<RemoteComment>;
}

/// Forces every caller through the failure branch of an [`ApiResponse`].
pub trait ResponseExt<T> {
    fn into_payload(self, operation: &'static str) -> Result<T, RemoteError>;
}

impl<T> ResponseExt<T> for ApiResponse<T> {
    fn into_payload(self, operation: &'static str) -> Result<T, RemoteError> {
        if !self.success {
            return Err(RemoteError::Rejected { operation });
        }
        self.data.ok_or(RemoteError::MissingPayload { operation })
    }
}

impl<T> ResponseExt<T> for RemoteResult<T> {
    fn into_payload(self, operation: &'static str) -> Result<T, RemoteError> {
        self.and_then(|response| response.into_payload(operation))
    }
}
