//! SeaORM entities for the cache tables.

pub mod post;
pub mod post_comment;
pub mod post_page;
