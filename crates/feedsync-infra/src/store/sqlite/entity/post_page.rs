//! Page metadata entity, keyed by `(page, page_size)`.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use feedsync_core::StoreError;
use feedsync_core::domain::PostPage;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "post_pages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub page: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub page_size: i64,
    pub total: i64,
    pub end_of_page: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for PostPage {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let narrow = |e: std::num::TryFromIntError| StoreError::Serialization(e.to_string());
        Ok(Self {
            page: u32::try_from(model.page).map_err(narrow)?,
            page_size: u32::try_from(model.page_size).map_err(narrow)?,
            total: u64::try_from(model.total).map_err(narrow)?,
            end_of_page: model.end_of_page,
        })
    }
}

impl TryFrom<PostPage> for ActiveModel {
    type Error = StoreError;

    fn try_from(page: PostPage) -> Result<Self, Self::Error> {
        let total =
            i64::try_from(page.total).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Self {
            page: Set(i64::from(page.page)),
            page_size: Set(i64::from(page.page_size)),
            total: Set(total),
            end_of_page: Set(page.end_of_page),
        })
    }
}
