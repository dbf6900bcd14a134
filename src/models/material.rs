use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub profile_id: i32,
    pub name: String,
    pub unit: String, // 'metro', 'kilogramo', 'pieza', 'litro', 'metro²'
    pub price: f64,   // MXN
    pub stock: Option<i32>,
    pub min_stock: Option<i32>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
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
    #[sea_orm(has_many = "super::job_material::Entity")]
    JobMaterial,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::job_material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobMaterial.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API requests/responses
#[derive(Debug, Serialize, Deserialize)]
pub struct MaterialDto {
    pub id: Option<i32>,
    pub name: String,
    pub unit: String,
    pub price: f64,
    pub stock: Option<i32>,
    pub min_stock: Option<i32>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl From<Model> for MaterialDto {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            unit: model.unit,
            price: model.price,
            stock: model.stock,
            min_stock: model.min_stock,
            category: model.category,
            description: model.description,
        }
    }
}
