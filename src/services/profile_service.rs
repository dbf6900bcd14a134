//! Profile service - tenant onboarding and business data.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use super::{material_service, ServiceError};
use crate::models::profile::{self, Entity as Profile, ProfileDto};
use crate::models::user::{self, Entity as User};
use crate::utils::validation;

fn validate_profile(dto: &ProfileDto) -> Result<(), ServiceError> {
    if !validation::is_required(&dto.business_name) {
        return Err(ServiceError::Validation(
            "El nombre del negocio es requerido".into(),
        ));
    }
    if !validation::is_required(&dto.address) {
        return Err(ServiceError::Validation("La dirección es requerida".into()));
    }
    if !validation::is_required(&dto.state) {
        return Err(ServiceError::Validation("El estado es requerido".into()));
    }
    if !validation::is_valid_rfc(&dto.rfc) {
        return Err(ServiceError::Validation("RFC inválido".into()));
    }
    if !validation::is_valid_phone(&dto.phone) {
        return Err(ServiceError::Validation("Teléfono inválido".into()));
    }
    if !validation::is_valid_email(&dto.email) {
        return Err(ServiceError::Validation("Email inválido".into()));
    }
    Ok(())
}

/// Look up the user record behind a JWT subject (email).
pub async fn find_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<user::Model, ServiceError> {
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)
}

pub async fn get_by_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<profile::Model, ServiceError> {
    Profile::find()
        .filter(profile::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)
}

/// Onboarding: create the business profile and seed its material
/// catalog with prices adjusted for the registered state.
pub async fn create_profile(
    db: &DatabaseConnection,
    user_id: i32,
    dto: ProfileDto,
) -> Result<profile::Model, ServiceError> {
    validate_profile(&dto)?;

    if get_by_user(db, user_id).await.is_ok() {
        return Err(ServiceError::InvalidState(
            "El usuario ya tiene un perfil".into(),
        ));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let new_profile = profile::ActiveModel {
        user_id: Set(user_id),
        business_name: Set(dto.business_name.trim().to_owned()),
        address: Set(dto.address.trim().to_owned()),
        state: Set(dto.state.trim().to_owned()),
        rfc: Set(dto.rfc.trim().to_uppercase()),
        phone: Set(dto.phone.trim().to_owned()),
        email: Set(dto.email.trim().to_owned()),
        fiscal_regime: Set(dto.fiscal_regime),
        cfdi_use: Set(dto.cfdi_use),
        payment_method: Set(dto.payment_method),
        logo_url: Set(dto.logo_url),
        is_pro: Set(false),
        pro_expires_at: Set(None),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let saved = new_profile.insert(db).await?;

    let seeded = material_service::seed_catalog(db, saved.id, &saved.state).await?;
    tracing::info!(
        "Seeded {} catalog materials for profile {} ({})",
        seeded,
        saved.id,
        saved.state
    );

    Ok(saved)
}

/// Update business data. Changing `state` does not reprice the
/// already-seeded catalog.
pub async fn update_profile(
    db: &DatabaseConnection,
    user_id: i32,
    dto: ProfileDto,
) -> Result<profile::Model, ServiceError> {
    validate_profile(&dto)?;

    let existing = get_by_user(db, user_id).await?;

    let mut active: profile::ActiveModel = existing.into();
    active.business_name = Set(dto.business_name.trim().to_owned());
    active.address = Set(dto.address.trim().to_owned());
    active.state = Set(dto.state.trim().to_owned());
    active.rfc = Set(dto.rfc.trim().to_uppercase());
    active.phone = Set(dto.phone.trim().to_owned());
    active.email = Set(dto.email.trim().to_owned());
    active.fiscal_regime = Set(dto.fiscal_regime);
    active.cfdi_use = Set(dto.cfdi_use);
    active.payment_method = Set(dto.payment_method);
    active.logo_url = Set(dto.logo_url);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    let updated = active.update(db).await?;
    Ok(updated)
}
