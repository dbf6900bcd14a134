use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const GALLERY_CATEGORIES: &[&str] = &[
    "Puertas",
    "Ventanas",
    "Rejas",
    "Portones",
    "Escaleras",
    "Barandales",
    "Estructuras",
    "Decorativo",
    "Otros",
];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gallery")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub profile_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub image_url: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::ProfileId",
        to = "super::profile::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Profile,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
