//! Domain entities - the cached shapes of remote data.

mod comment;
mod post;

pub use comment::PostComment;
pub use post::{Post, PostPage};
