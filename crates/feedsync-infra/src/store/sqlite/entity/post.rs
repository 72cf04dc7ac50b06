//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub image_url: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub liked: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for feedsync_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            image_url: model.image_url,
            title: model.title,
            content: model.content,
            liked: model.liked,
            created_at: model.created_at,
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<feedsync_core::domain::Post> for ActiveModel {
    fn from(post: feedsync_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            image_url: Set(post.image_url),
            title: Set(post.title),
            content: Set(post.content),
            liked: Set(post.liked),
            created_at: Set(post.created_at),
        }
    }
}
