//! SQLite implementation of the local store port.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use feedsync_core::StoreError;
use feedsync_core::domain::{Post, PostComment, PostPage};
use feedsync_core::ports::LocalStore;

use super::connection::{self, SqliteConfig};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_comment::{self, Entity as CommentEntity};
use super::entity::post_page::{self, Entity as PageEntity};

fn query_error(e: DbErr) -> StoreError {
    StoreError::Query(e.to_string())
}

/// SQLite local store. Upserts use `ON CONFLICT ... DO UPDATE`.
pub struct SqliteLocalStore {
    db: DbConn,
}

impl SqliteLocalStore {
    /// Wrap an existing connection. The tables must already exist.
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Connect and create the cache tables if needed.
    pub async fn connect(config: &SqliteConfig) -> Result<Self, StoreError> {
        let db = connection::connect(config)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self::new(db))
    }
}

#[async_trait]
impl LocalStore for SqliteLocalStore {
    async fn get_posts(&self, page: u32, page_size: u32) -> Result<Vec<Post>, StoreError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .offset(PostPage::offset(page, page_size))
            .limit(u64::from(page_size))
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn insert_posts(&self, posts: Vec<Post>) -> Result<(), StoreError> {
        if posts.is_empty() {
            return Ok(());
        }
        tracing::debug!(count = posts.len(), "Upserting posts");

        PostEntity::insert_many(posts.into_iter().map(post::ActiveModel::from))
            .on_conflict(
                OnConflict::column(post::Column::Id)
                    .update_columns([
                        post::Column::ImageUrl,
                        post::Column::Title,
                        post::Column::Content,
                        post::Column::Liked,
                        post::Column::CreatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(query_error)?;

        Ok(())
    }

    async fn get_post_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Option<PostPage>, StoreError> {
        let result = PageEntity::find_by_id((i64::from(page), i64::from(page_size)))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        result.map(PostPage::try_from).transpose()
    }

    async fn insert_post_page(&self, page: PostPage) -> Result<(), StoreError> {
        let model = post_page::ActiveModel::try_from(page)?;

        PageEntity::insert(model)
            .on_conflict(
                OnConflict::columns([post_page::Column::Page, post_page::Column::PageSize])
                    .update_columns([post_page::Column::Total, post_page::Column::EndOfPage])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(query_error)?;

        Ok(())
    }

    async fn update_like(&self, id: i64, liked: bool) -> Result<(), StoreError> {
        PostEntity::update_many()
            .col_expr(post::Column::Liked, Expr::value(liked))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        Ok(())
    }

    async fn get_comments(&self, post_id: i64) -> Result<Vec<PostComment>, StoreError> {
        let result = CommentEntity::find()
            .filter(post_comment::Column::PostId.eq(post_id))
            .order_by_asc(post_comment::Column::CommentId)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert_comments(&self, comments: Vec<PostComment>) -> Result<(), StoreError> {
        if comments.is_empty() {
            return Ok(());
        }

        CommentEntity::insert_many(comments.into_iter().map(post_comment::ActiveModel::from))
            .on_conflict(
                OnConflict::column(post_comment::Column::CommentId)
                    .update_columns([
                        post_comment::Column::PostId,
                        post_comment::Column::Comment,
                        post_comment::Column::CreatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(query_error)?;

        Ok(())
    }
}
