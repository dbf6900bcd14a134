//! Quote service - building, listing and transitioning quotes.
//!
//! A quote's monetary fields are computed once, at creation, by
//! `pricing::engine` and persisted as a snapshot. Nothing here ever
//! recomputes them afterwards: a sent quote is a fixed commercial
//! document even if material prices or the client change later.

use chrono::{Local, NaiveDate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::ServiceError;
use crate::models::client::{self, ClientDto, Entity as Client};
use crate::models::job::{self, Entity as Job};
use crate::models::job_material::{self, Entity as JobMaterial};
use crate::models::material::{self, Entity as Material};
use crate::models::quote::{self, Entity as Quote, QUOTE_STATUSES};
use crate::pricing::{self, engine};
use crate::utils::quote_number::generate_quote_number;
use crate::utils::validation;

/// One material line in a quote creation payload. `unit_price` may be
/// sent explicitly (the price shown when the material was selected);
/// when absent, the material's current catalog price is snapshotted.
#[derive(Debug, Clone, Deserialize)]
pub struct JobMaterialInput {
    pub material_id: i32,
    pub quantity: f64,
    pub unit_price: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobPayload {
    pub r#type: String,
    pub description: String,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default)]
    pub labor_cost: f64,
    #[serde(default)]
    pub additional_costs: f64,
    pub notes: Option<String>,
    #[serde(default)]
    pub materials: Vec<JobMaterialInput>,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct CreateQuoteInput {
    pub client_id: i32,
    pub valid_until: String, // YYYY-MM-DD
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub profit_percentage: f64,
    #[serde(default)]
    pub advance_payment: f64,
    #[serde(default)]
    pub requires_invoice: bool,
    pub notes: Option<String>,
    pub jobs: Vec<JobPayload>,
}

/// Filter parameters for listing quotes
#[derive(Debug, Default, Clone)]
pub struct QuoteFilter {
    pub status: Option<String>,
    pub client_id: Option<i32>,
}

/// Listing row with the client name joined in.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteSummary {
    pub id: i32,
    pub quote_number: String,
    pub client_id: i32,
    pub client_name: Option<String>,
    pub status: String,
    pub requires_invoice: bool,
    pub total: f64,
    pub advance_payment: f64,
    pub remaining_payment: f64,
    pub valid_until: String,
    pub created_at: String,
    /// Display flag: a sent quote past its validity date. The stored
    /// status only changes through an explicit transition.
    pub is_expired: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobWithMaterials {
    #[serde(flatten)]
    pub job: job::Model,
    pub materials: Vec<job_material::Model>,
    pub job_total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteWithDetails {
    #[serde(flatten)]
    pub quote: quote::Model,
    pub client: Option<ClientDto>,
    pub jobs: Vec<JobWithMaterials>,
}

fn validate_input(input: &CreateQuoteInput) -> Result<NaiveDate, ServiceError> {
    if input.jobs.is_empty() {
        return Err(ServiceError::Validation(
            "Agrega al menos un trabajo".into(),
        ));
    }
    for (index, job) in input.jobs.iter().enumerate() {
        if !validation::is_required(&job.description) {
            return Err(ServiceError::Validation(format!(
                "La descripción del trabajo {} es requerida",
                index + 1
            )));
        }
        if job.quantity < 1 {
            return Err(ServiceError::Validation(format!(
                "La cantidad del trabajo {} debe ser positiva",
                index + 1
            )));
        }
        if !validation::is_non_negative(job.labor_cost)
            || !validation::is_non_negative(job.additional_costs)
        {
            return Err(ServiceError::Validation(format!(
                "Los costos del trabajo {} no pueden ser negativos",
                index + 1
            )));
        }
        for line in &job.materials {
            if !validation::is_positive(line.quantity) {
                return Err(ServiceError::Validation(
                    "La cantidad de material debe ser positiva".into(),
                ));
            }
            if let Some(price) = line.unit_price {
                if !validation::is_non_negative(price) {
                    return Err(ServiceError::Validation(
                        "El precio unitario no puede ser negativo".into(),
                    ));
                }
            }
        }
    }
    if !validation::is_valid_discount(input.discount_percentage) {
        return Err(ServiceError::Validation(
            "El descuento debe estar entre 0 y 100".into(),
        ));
    }
    if !validation::is_valid_profit(input.profit_percentage) {
        return Err(ServiceError::Validation(
            "El margen de ganancia debe estar entre 0 y 200".into(),
        ));
    }
    if !validation::is_non_negative(input.advance_payment) {
        return Err(ServiceError::Validation(
            "El anticipo no puede ser negativo".into(),
        ));
    }

    let valid_until = NaiveDate::parse_from_str(&input.valid_until, "%Y-%m-%d")
        .map_err(|_| ServiceError::Validation("Fecha de validez inválida".into()))?;
    if valid_until <= Local::now().date_naive() {
        return Err(ServiceError::Validation(
            "La fecha debe ser posterior a hoy".into(),
        ));
    }

    Ok(valid_until)
}

/// Create a quote with its jobs and material lines, computing and
/// persisting the monetary snapshot in one transaction.
pub async fn create_quote(
    db: &DatabaseConnection,
    profile_id: i32,
    input: CreateQuoteInput,
) -> Result<QuoteWithDetails, ServiceError> {
    validate_input(&input)?;

    // Client must exist and belong to this profile.
    Client::find_by_id(input.client_id)
        .filter(client::Column::ProfileId.eq(profile_id))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::Validation("Selecciona un cliente".into()))?;

    // Resolve every referenced material up front, profile-scoped.
    let material_ids: Vec<i32> = input
        .jobs
        .iter()
        .flat_map(|j| j.materials.iter().map(|m| m.material_id))
        .collect();

    let mut materials_by_id: HashMap<i32, material::Model> = HashMap::new();
    if !material_ids.is_empty() {
        let found = Material::find()
            .filter(material::Column::ProfileId.eq(profile_id))
            .filter(material::Column::Id.is_in(material_ids.clone()))
            .all(db)
            .await?;
        for m in found {
            materials_by_id.insert(m.id, m);
        }
        for id in &material_ids {
            if !materials_by_id.contains_key(id) {
                return Err(ServiceError::Validation(format!(
                    "Material desconocido: {}",
                    id
                )));
            }
        }
    }

    // Snapshot every line's unit price, then run the pricing pipeline.
    let engine_input = engine::QuoteInput {
        jobs: input
            .jobs
            .iter()
            .map(|job| engine::JobInput {
                materials: job
                    .materials
                    .iter()
                    .map(|line| engine::LineItem {
                        quantity: line.quantity,
                        unit_price: line
                            .unit_price
                            .unwrap_or_else(|| materials_by_id[&line.material_id].price),
                    })
                    .collect(),
                labor_cost: job.labor_cost,
                additional_costs: job.additional_costs,
            })
            .collect(),
        discount_percentage: input.discount_percentage,
        profit_percentage: input.profit_percentage,
        advance_payment: input.advance_payment,
    };
    let totals = pricing::compute(&engine_input);

    let now = chrono::Utc::now().to_rfc3339();
    let quote_number = generate_quote_number(Local::now().date_naive());

    let txn = db.begin().await?;

    let saved_quote = quote::ActiveModel {
        profile_id: Set(profile_id),
        client_id: Set(input.client_id),
        quote_number: Set(quote_number),
        status: Set("draft".to_owned()),
        requires_invoice: Set(input.requires_invoice),
        subtotal: Set(totals.subtotal),
        discount_percentage: Set(input.discount_percentage),
        discount_amount: Set(totals.discount_amount),
        profit_percentage: Set(input.profit_percentage),
        tax_amount: Set(totals.tax_amount),
        total: Set(totals.total),
        advance_payment: Set(input.advance_payment),
        remaining_payment: Set(totals.remaining_payment),
        notes: Set(input.notes.clone()),
        valid_until: Set(input.valid_until.clone()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for (job_payload, engine_job) in input.jobs.iter().zip(&engine_input.jobs) {
        let saved_job = job::ActiveModel {
            quote_id: Set(saved_quote.id),
            r#type: Set(job_payload.r#type.clone()),
            description: Set(job_payload.description.trim().to_owned()),
            width: Set(job_payload.width),
            height: Set(job_payload.height),
            depth: Set(job_payload.depth),
            quantity: Set(job_payload.quantity),
            labor_cost: Set(job_payload.labor_cost),
            additional_costs: Set(job_payload.additional_costs),
            notes: Set(job_payload.notes.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for (line, engine_line) in job_payload.materials.iter().zip(&engine_job.materials) {
            job_material::ActiveModel {
                job_id: Set(saved_job.id),
                material_id: Set(line.material_id),
                material_name: Set(materials_by_id[&line.material_id].name.clone()),
                quantity: Set(engine_line.quantity),
                unit_price: Set(engine_line.unit_price),
                total_price: Set(engine_line.total()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
    }

    txn.commit().await?;

    get_quote(db, profile_id, saved_quote.id).await
}

/// List quotes with client names, newest first.
pub async fn list_quotes(
    db: &DatabaseConnection,
    profile_id: i32,
    filter: QuoteFilter,
) -> Result<Vec<QuoteSummary>, ServiceError> {
    let mut query = Quote::find().filter(quote::Column::ProfileId.eq(profile_id));

    if let Some(status) = filter.status {
        query = query.filter(quote::Column::Status.eq(status));
    }
    if let Some(client_id) = filter.client_id {
        query = query.filter(quote::Column::ClientId.eq(client_id));
    }

    let quotes_with_clients = query
        .order_by_desc(quote::Column::CreatedAt)
        .find_also_related(Client)
        .all(db)
        .await?;

    let today = Local::now().date_naive();

    let result = quotes_with_clients
        .into_iter()
        .map(|(q, c)| {
            let is_expired = q.status == "sent"
                && NaiveDate::parse_from_str(&q.valid_until, "%Y-%m-%d")
                    .map(|d| d < today)
                    .unwrap_or(false);

            QuoteSummary {
                id: q.id,
                quote_number: q.quote_number,
                client_id: q.client_id,
                client_name: c.map(|c| c.name),
                status: q.status,
                requires_invoice: q.requires_invoice,
                total: q.total,
                advance_payment: q.advance_payment,
                remaining_payment: q.remaining_payment,
                valid_until: q.valid_until,
                created_at: q.created_at,
                is_expired,
            }
        })
        .collect();

    Ok(result)
}

/// Per-status counts for the listing header.
pub async fn status_counts(
    db: &DatabaseConnection,
    profile_id: i32,
) -> Result<BTreeMap<String, i64>, ServiceError> {
    let quotes = Quote::find()
        .filter(quote::Column::ProfileId.eq(profile_id))
        .all(db)
        .await?;

    let mut counts: BTreeMap<String, i64> = QUOTE_STATUSES
        .iter()
        .map(|s| (s.to_string(), 0))
        .collect();
    for q in quotes {
        *counts.entry(q.status).or_insert(0) += 1;
    }

    Ok(counts)
}

/// A quote with its client, jobs and material lines.
pub async fn get_quote(
    db: &DatabaseConnection,
    profile_id: i32,
    id: i32,
) -> Result<QuoteWithDetails, ServiceError> {
    let quote = Quote::find_by_id(id)
        .filter(quote::Column::ProfileId.eq(profile_id))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let client = Client::find_by_id(quote.client_id)
        .one(db)
        .await?
        .map(ClientDto::from);

    let jobs = Job::find()
        .filter(job::Column::QuoteId.eq(quote.id))
        .order_by_asc(job::Column::Id)
        .all(db)
        .await?;

    let job_ids: Vec<i32> = jobs.iter().map(|j| j.id).collect();
    let mut lines_by_job: HashMap<i32, Vec<job_material::Model>> = HashMap::new();
    if !job_ids.is_empty() {
        let lines = JobMaterial::find()
            .filter(job_material::Column::JobId.is_in(job_ids))
            .order_by_asc(job_material::Column::Id)
            .all(db)
            .await?;
        for line in lines {
            lines_by_job.entry(line.job_id).or_default().push(line);
        }
    }

    let jobs = jobs
        .into_iter()
        .map(|j| {
            let materials = lines_by_job.remove(&j.id).unwrap_or_default();
            let materials_total: f64 = materials.iter().map(|m| m.total_price).sum();
            let job_total = materials_total + j.labor_cost + j.additional_costs;
            JobWithMaterials {
                job: j,
                materials,
                job_total,
            }
        })
        .collect();

    Ok(QuoteWithDetails {
        quote,
        client,
        jobs,
    })
}

fn transition_allowed(from: &str, to: &str) -> bool {
    matches!(
        (from, to),
        ("draft", "sent") | ("sent", "approved") | ("sent", "rejected") | ("sent", "expired")
    )
}

/// Move a quote through its lifecycle. Only `status` and `updated_at`
/// change; the monetary snapshot stays as created.
pub async fn update_status(
    db: &DatabaseConnection,
    profile_id: i32,
    id: i32,
    new_status: &str,
) -> Result<quote::Model, ServiceError> {
    if !QUOTE_STATUSES.contains(&new_status) {
        return Err(ServiceError::Validation(format!(
            "Estado desconocido: {}",
            new_status
        )));
    }

    let quote = Quote::find_by_id(id)
        .filter(quote::Column::ProfileId.eq(profile_id))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    if !transition_allowed(&quote.status, new_status) {
        return Err(ServiceError::InvalidState(format!(
            "No se puede pasar de '{}' a '{}'",
            quote.status, new_status
        )));
    }

    let mut active: quote::ActiveModel = quote.into();
    active.status = Set(new_status.to_owned());
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    let updated = active.update(db).await?;
    Ok(updated)
}

pub async fn delete_quote(
    db: &DatabaseConnection,
    profile_id: i32,
    id: i32,
) -> Result<(), ServiceError> {
    let quote = Quote::find_by_id(id)
        .filter(quote::Column::ProfileId.eq(profile_id))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    // Jobs and their lines go with it (ON DELETE CASCADE).
    Quote::delete_by_id(quote.id).exec(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input() -> CreateQuoteInput {
        CreateQuoteInput {
            client_id: 1,
            valid_until: "2099-12-31".to_string(),
            discount_percentage: 0.0,
            profit_percentage: 30.0,
            advance_payment: 0.0,
            requires_invoice: false,
            notes: None,
            jobs: vec![JobPayload {
                r#type: "Portón".to_string(),
                description: "Portón principal".to_string(),
                width: Some(3.0),
                height: Some(2.0),
                depth: None,
                quantity: 1,
                labor_cost: 500.0,
                additional_costs: 0.0,
                notes: None,
                materials: vec![],
            }],
        }
    }

    #[test]
    fn rejects_empty_job_list() {
        let mut input = base_input();
        input.jobs.clear();
        assert!(matches!(
            validate_input(&input),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn rejects_blank_job_description() {
        let mut input = base_input();
        input.jobs[0].description = "   ".to_string();
        assert!(matches!(
            validate_input(&input),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_percentages() {
        let mut input = base_input();
        input.discount_percentage = 101.0;
        assert!(validate_input(&input).is_err());

        let mut input = base_input();
        input.profit_percentage = 250.0;
        assert!(validate_input(&input).is_err());
    }

    #[test]
    fn rejects_past_validity_date() {
        let mut input = base_input();
        input.valid_until = "2001-01-01".to_string();
        assert!(matches!(
            validate_input(&input),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn accepts_well_formed_input() {
        assert!(validate_input(&base_input()).is_ok());
    }

    #[test]
    fn status_transitions() {
        assert!(transition_allowed("draft", "sent"));
        assert!(transition_allowed("sent", "approved"));
        assert!(transition_allowed("sent", "rejected"));
        assert!(transition_allowed("sent", "expired"));
        assert!(!transition_allowed("draft", "approved"));
        assert!(!transition_allowed("approved", "draft"));
        assert!(!transition_allowed("rejected", "sent"));
        assert!(!transition_allowed("expired", "approved"));
    }
}
