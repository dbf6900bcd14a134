use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A piece of work inside a quote (a gate, a staircase, a railing).
/// Dimensions are informational only - the totals come from materials,
/// labor and additional costs.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub quote_id: i32,
    pub r#type: String,
    pub description: String,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
    pub quantity: i32,
    pub labor_cost: f64,
    pub additional_costs: f64,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quote::Entity",
        from = "Column::QuoteId",
        to = "super::quote::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Quote,
    #[sea_orm(has_many = "super::job_material::Entity")]
    JobMaterial,
}

impl Related<super::quote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quote.def()
    }
}

impl Related<super::job_material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobMaterial.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
