//! # Feedsync Shared
//!
//! Wire types shared between the remote source and the client.
//! Both the simulated remote and the sync engine speak these types.

pub mod dto;
pub mod response;

pub use dto::{ActionResult, RemoteComment, RemotePost, RemotePostPage};
pub use response::ApiResponse;
