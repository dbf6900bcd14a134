//! Client service - tenant-scoped CRUD for the client book.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::ServiceError;
use crate::models::client::{self, ClientDto, Entity as Client};
use crate::utils::validation;

/// Filter parameters for listing clients
#[derive(Debug, Default, Clone)]
pub struct ClientFilter {
    pub search: Option<String>,
}

fn validate_client(dto: &ClientDto) -> Result<(), ServiceError> {
    if !validation::is_required(&dto.name) {
        return Err(ServiceError::Validation("El nombre es requerido".into()));
    }
    if let Some(email) = dto.email.as_deref() {
        if !email.is_empty() && !validation::is_valid_email(email) {
            return Err(ServiceError::Validation("Email inválido".into()));
        }
    }
    if let Some(phone) = dto.phone.as_deref() {
        if !phone.is_empty() && !validation::is_valid_phone(phone) {
            return Err(ServiceError::Validation("Teléfono inválido".into()));
        }
    }
    if let Some(rfc) = dto.rfc.as_deref() {
        if !rfc.is_empty() && !validation::is_valid_rfc(rfc) {
            return Err(ServiceError::Validation("RFC inválido".into()));
        }
    }
    Ok(())
}

/// List the profile's clients, optionally filtered by a name search.
pub async fn list_clients(
    db: &DatabaseConnection,
    profile_id: i32,
    filter: ClientFilter,
) -> Result<Vec<ClientDto>, ServiceError> {
    let mut query = Client::find().filter(client::Column::ProfileId.eq(profile_id));

    if let Some(search) = filter.search {
        if !search.trim().is_empty() {
            query = query.filter(client::Column::Name.contains(search.trim()));
        }
    }

    let clients = query.order_by_asc(client::Column::Name).all(db).await?;
    Ok(clients.into_iter().map(ClientDto::from).collect())
}

/// Get a single client. A client belonging to another profile is
/// reported as not found, never as forbidden.
pub async fn get_client(
    db: &DatabaseConnection,
    profile_id: i32,
    id: i32,
) -> Result<ClientDto, ServiceError> {
    let found = Client::find_by_id(id)
        .filter(client::Column::ProfileId.eq(profile_id))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    Ok(ClientDto::from(found))
}

pub async fn create_client(
    db: &DatabaseConnection,
    profile_id: i32,
    dto: ClientDto,
) -> Result<ClientDto, ServiceError> {
    validate_client(&dto)?;

    let now = chrono::Utc::now().to_rfc3339();
    let new_client = client::ActiveModel {
        profile_id: Set(profile_id),
        name: Set(dto.name.trim().to_owned()),
        phone: Set(dto.phone),
        email: Set(dto.email),
        address: Set(dto.address),
        rfc: Set(dto.rfc.map(|r| r.trim().to_uppercase())),
        fiscal_regime: Set(dto.fiscal_regime),
        cfdi_use: Set(dto.cfdi_use),
        payment_method: Set(dto.payment_method),
        notes: Set(dto.notes),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let saved = new_client.insert(db).await?;
    Ok(ClientDto::from(saved))
}

pub async fn update_client(
    db: &DatabaseConnection,
    profile_id: i32,
    id: i32,
    dto: ClientDto,
) -> Result<ClientDto, ServiceError> {
    validate_client(&dto)?;

    let existing = Client::find_by_id(id)
        .filter(client::Column::ProfileId.eq(profile_id))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let mut active: client::ActiveModel = existing.into();
    active.name = Set(dto.name.trim().to_owned());
    active.phone = Set(dto.phone);
    active.email = Set(dto.email);
    active.address = Set(dto.address);
    active.rfc = Set(dto.rfc.map(|r| r.trim().to_uppercase()));
    active.fiscal_regime = Set(dto.fiscal_regime);
    active.cfdi_use = Set(dto.cfdi_use);
    active.payment_method = Set(dto.payment_method);
    active.notes = Set(dto.notes);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    let updated = active.update(db).await?;
    Ok(ClientDto::from(updated))
}

pub async fn delete_client(
    db: &DatabaseConnection,
    profile_id: i32,
    id: i32,
) -> Result<(), ServiceError> {
    let existing = Client::find_by_id(id)
        .filter(client::Column::ProfileId.eq(profile_id))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    Client::delete_by_id(existing.id).exec(db).await?;
    Ok(())
}
