use feedsync_shared::RemoteComment;
use serde::{Deserialize, Serialize};

/// Comment entity. `post_id` is a lookup key, not an enforced reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostComment {
    pub comment_id: i64,
    pub post_id: i64,
    pub comment: String,
    pub created_at: i64,
}

impl From<RemoteComment> for PostComment {
    fn from(remote: RemoteComment) -> Self {
        Self {
            comment_id: remote.comment_id,
            post_id: remote.post_id,
            comment: remote.comment,
            created_at: remote.created_at,
        }
    }
}
