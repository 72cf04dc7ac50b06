//! The scripted demo session.

use futures::future::try_join_all;

use feedsync_core::{LoadOutcome, WriteOutcome};

use crate::context::AppContext;

const PREVIEW_POSTS: usize = 3;

/// What the session observed, for the final log line.
#[derive(Debug)]
pub struct SessionReport {
    pub pages_loaded: u32,
    pub posts_loaded: usize,
    pub liked_online: bool,
    pub offline_like_dropped: bool,
    pub offline_posts: usize,
    pub offline_comments: usize,
}

/// Refresh, page to the end, interact with one post, drop connectivity and
/// read everything back from the cache.
pub async fn run(ctx: &AppContext) -> anyhow::Result<SessionReport> {
    let first = ctx.pager.refresh().await?;
    tracing::info!(page_size = ctx.pager.page_size(), ?first, "Refreshed feed");

    let mut pages_loaded = 1;
    loop {
        match ctx.pager.load_more().await? {
            LoadOutcome::Loaded { added, source } => {
                pages_loaded += 1;
                tracing::info!(added, ?source, "Loaded next page");
            }
            outcome => {
                tracing::info!(?outcome, "Stopped paging");
                break;
            }
        }
    }

    let state = ctx.pager.state();
    let posts_loaded = state.items.len();
    let Some(target) = state.items.first().cloned() else {
        tracing::warn!("Feed is empty, nothing to interact with");
        return Ok(SessionReport {
            pages_loaded,
            posts_loaded,
            liked_online: false,
            offline_like_dropped: false,
            offline_posts: 0,
            offline_comments: 0,
        });
    };

    let previews = try_join_all(
        state
            .items
            .iter()
            .take(PREVIEW_POSTS)
            .map(|post| ctx.comments.read(post.id)),
    )
    .await?;
    for (post, comments) in state.items.iter().zip(&previews) {
        tracing::info!(
            post_id = post.id,
            comments = comments.value.len(),
            source = ?comments.source,
            "Comment preview"
        );
    }

    let opened = ctx.posts.read(target.id).await?;
    tracing::info!(
        post_id = target.id,
        source = ?opened.source,
        found = opened.value.is_some(),
        "Opened post"
    );

    let like = ctx.posts.update_like(target.id, !target.liked).await?;
    tracing::info!(post_id = target.id, ?like, "Toggled like");

    let added = ctx.comments.add_comment(target.id, "Nice shot!").await?;
    tracing::info!(post_id = target.id, ?added, "Added comment");

    ctx.network.disconnect_all();
    tracing::info!(online = *ctx.monitor.subscribe().borrow(), "Network dropped");

    let offline_feed = ctx.pager.refresh().await?;
    tracing::info!(?offline_feed, "Refreshed feed offline");

    let cached = ctx.posts.read(target.id).await?;
    let comments = ctx.comments.read(target.id).await?;
    tracing::info!(
        post_id = target.id,
        liked = cached.value.as_ref().map(|p| p.liked),
        comments = comments.value.len(),
        "Read post back from cache"
    );

    let offline_like = ctx.posts.update_like(target.id, target.liked).await?;
    tracing::info!(post_id = target.id, ?offline_like, "Attempted like while offline");

    Ok(SessionReport {
        pages_loaded,
        posts_loaded,
        liked_online: like.is_committed(),
        offline_like_dropped: offline_like == WriteOutcome::Offline,
        offline_posts: ctx.pager.state().items.len(),
        offline_comments: comments.value.len(),
    })
}
