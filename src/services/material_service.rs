//! Material service - the tenant's price catalog.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::ServiceError;
use crate::catalog::{self, MATERIAL_UNITS};
use crate::models::material::{self, Entity as Material, MaterialDto};
use crate::utils::validation;

/// Filter parameters for listing materials
#[derive(Debug, Default, Clone)]
pub struct MaterialFilter {
    pub category: Option<String>,
    pub low_stock: bool,
}

fn validate_material(dto: &MaterialDto) -> Result<(), ServiceError> {
    if !validation::is_required(&dto.name) {
        return Err(ServiceError::Validation("El nombre es requerido".into()));
    }
    if !MATERIAL_UNITS.contains(&dto.unit.as_str()) {
        return Err(ServiceError::Validation(format!(
            "Unidad desconocida: {}",
            dto.unit
        )));
    }
    if !validation::is_non_negative(dto.price) {
        return Err(ServiceError::Validation(
            "El precio debe ser mayor o igual a cero".into(),
        ));
    }
    if dto.stock.is_some_and(|s| s < 0) || dto.min_stock.is_some_and(|s| s < 0) {
        return Err(ServiceError::Validation(
            "El inventario no puede ser negativo".into(),
        ));
    }
    Ok(())
}

pub async fn list_materials(
    db: &DatabaseConnection,
    profile_id: i32,
    filter: MaterialFilter,
) -> Result<Vec<MaterialDto>, ServiceError> {
    let mut query = Material::find().filter(material::Column::ProfileId.eq(profile_id));

    if let Some(category) = filter.category {
        query = query.filter(material::Column::Category.eq(category));
    }

    let materials = query.order_by_asc(material::Column::Name).all(db).await?;

    let mut dtos: Vec<MaterialDto> = materials.into_iter().map(MaterialDto::from).collect();

    // Low-stock means stock tracking is enabled and at or under the minimum.
    if filter.low_stock {
        dtos.retain(|m| match (m.stock, m.min_stock) {
            (Some(stock), Some(min)) => stock <= min,
            _ => false,
        });
    }

    Ok(dtos)
}

pub async fn get_material(
    db: &DatabaseConnection,
    profile_id: i32,
    id: i32,
) -> Result<MaterialDto, ServiceError> {
    let found = Material::find_by_id(id)
        .filter(material::Column::ProfileId.eq(profile_id))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    Ok(MaterialDto::from(found))
}

pub async fn create_material(
    db: &DatabaseConnection,
    profile_id: i32,
    dto: MaterialDto,
) -> Result<MaterialDto, ServiceError> {
    validate_material(&dto)?;

    let now = chrono::Utc::now().to_rfc3339();
    let new_material = material::ActiveModel {
        profile_id: Set(profile_id),
        name: Set(dto.name.trim().to_owned()),
        unit: Set(dto.unit),
        price: Set(dto.price),
        stock: Set(dto.stock),
        min_stock: Set(dto.min_stock),
        category: Set(dto.category),
        description: Set(dto.description),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let saved = new_material.insert(db).await?;
    Ok(MaterialDto::from(saved))
}

/// Update a material. Quotes created before the change keep their
/// snapshot prices.
pub async fn update_material(
    db: &DatabaseConnection,
    profile_id: i32,
    id: i32,
    dto: MaterialDto,
) -> Result<MaterialDto, ServiceError> {
    validate_material(&dto)?;

    let existing = Material::find_by_id(id)
        .filter(material::Column::ProfileId.eq(profile_id))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let mut active: material::ActiveModel = existing.into();
    active.name = Set(dto.name.trim().to_owned());
    active.unit = Set(dto.unit);
    active.price = Set(dto.price);
    active.stock = Set(dto.stock);
    active.min_stock = Set(dto.min_stock);
    active.category = Set(dto.category);
    active.description = Set(dto.description);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    let updated = active.update(db).await?;
    Ok(MaterialDto::from(updated))
}

pub async fn delete_material(
    db: &DatabaseConnection,
    profile_id: i32,
    id: i32,
) -> Result<(), ServiceError> {
    let existing = Material::find_by_id(id)
        .filter(material::Column::ProfileId.eq(profile_id))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    Material::delete_by_id(existing.id).exec(db).await?;
    Ok(())
}

/// Seed the default catalog for a freshly onboarded profile, with
/// prices adjusted once for the registered state. Later changes to the
/// profile's state do not reprice the catalog.
pub async fn seed_catalog(
    db: &DatabaseConnection,
    profile_id: i32,
    state: &str,
) -> Result<usize, ServiceError> {
    let now = chrono::Utc::now().to_rfc3339();
    let entries = catalog::adjusted_for_state(state);
    let count = entries.len();

    let models: Vec<material::ActiveModel> = entries
        .into_iter()
        .map(|entry| material::ActiveModel {
            profile_id: Set(profile_id),
            name: Set(entry.name.to_owned()),
            unit: Set(entry.unit.to_owned()),
            price: Set(entry.price),
            stock: Set(None),
            min_stock: Set(None),
            category: Set(Some(entry.category.to_owned())),
            description: Set(Some(entry.description.to_owned())),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        })
        .collect();

    Material::insert_many(models).exec(db).await?;
    Ok(count)
}
