use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub profile_id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub rfc: Option<String>,
    pub fiscal_regime: Option<String>,
    pub cfdi_use: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
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
    #[sea_orm(has_many = "super::quote::Entity")]
    Quote,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::quote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quote.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API requests/responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientDto {
    pub id: Option<i32>,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub rfc: Option<String>,
    pub fiscal_regime: Option<String>,
    pub cfdi_use: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

impl From<Model> for ClientDto {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            phone: model.phone,
            email: model.email,
            address: model.address,
            rfc: model.rfc,
            fiscal_regime: model.fiscal_regime,
            cfdi_use: model.cfdi_use,
            payment_method: model.payment_method,
            notes: model.notes,
        }
    }
}
