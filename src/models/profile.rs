use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The tenant record: one workshop/business per user. Everything else
/// (clients, materials, quotes) hangs off `profile_id`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub business_name: String,
    pub address: String,
    pub state: String,
    pub rfc: String,
    pub phone: String,
    pub email: String,
    pub fiscal_regime: Option<String>,
    pub cfdi_use: Option<String>,
    pub payment_method: Option<String>,
    pub logo_url: Option<String>,
    pub is_pro: bool,
    pub pro_expires_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses and the onboarding payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileDto {
    pub id: Option<i32>,
    pub business_name: String,
    pub address: String,
    pub state: String,
    pub rfc: String,
    pub phone: String,
    pub email: String,
    pub fiscal_regime: Option<String>,
    pub cfdi_use: Option<String>,
    pub payment_method: Option<String>,
    pub logo_url: Option<String>,
    #[serde(default)]
    pub is_pro: bool,
}

impl From<Model> for ProfileDto {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            business_name: model.business_name,
            address: model.address,
            state: model.state,
            rfc: model.rfc,
            phone: model.phone,
            email: model.email,
            fiscal_regime: model.fiscal_regime,
            cfdi_use: model.cfdi_use,
            payment_method: model.payment_method,
            logo_url: model.logo_url,
            is_pro: model.is_pro,
        }
    }
}
