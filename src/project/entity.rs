use sea_orm::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord user id, hex encoded
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub kind: String,
    pub url: String,
    pub code_url: Option<String>,
    pub image_url: Option<String>,
    pub tags: Json,
    pub created_at: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
