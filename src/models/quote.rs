use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Statuses a quote moves through. Monetary fields are a snapshot
/// taken when the quote is created; status changes never reprice.
pub const QUOTE_STATUSES: &[&str] = &["draft", "sent", "approved", "rejected", "expired"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quotes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub profile_id: i32,
    pub client_id: i32,
    pub quote_number: String,
    pub status: String,
    pub requires_invoice: bool,
    pub subtotal: f64,
    pub discount_percentage: f64,
    pub discount_amount: f64,
    pub profit_percentage: f64,
    pub tax_amount: f64,
    pub total: f64,
    pub advance_payment: f64,
    pub remaining_payment: f64,
    pub notes: Option<String>,
    pub valid_until: String, // YYYY-MM-DD
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
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Client,
    #[sea_orm(has_many = "super::job::Entity")]
    Job,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
