//! Comment entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "post_comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub comment_id: i64,
    pub post_id: i64,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub created_at: i64,
}

// post_id is a lookup column only; no foreign key.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for feedsync_core::domain::PostComment {
    fn from(model: Model) -> Self {
        Self {
            comment_id: model.comment_id,
            post_id: model.post_id,
            comment: model.comment,
            created_at: model.created_at,
        }
    }
}

impl From<feedsync_core::domain::PostComment> for ActiveModel {
    fn from(comment: feedsync_core::domain::PostComment) -> Self {
        Self {
            comment_id: Set(comment.comment_id),
            post_id: Set(comment.post_id),
            comment: Set(comment.comment),
            created_at: Set(comment.created_at),
        }
    }
}
