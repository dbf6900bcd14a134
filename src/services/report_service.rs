//! Report service - dashboard aggregates over a profile's quotes.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::ServiceError;
use crate::models::client::{self, Entity as Client};
use crate::models::job::{self, Entity as Job};
use crate::models::job_material::{self, Entity as JobMaterial};
use crate::models::quote::{self, Entity as Quote, QUOTE_STATUSES};

const TOP_N: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct MaterialUsage {
    pub material_name: String,
    pub quantity_used: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientSpending {
    pub client_name: String,
    pub total_spent: f64,
}

#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub total_quotes: i64,
    pub by_status: BTreeMap<String, i64>,
    /// Sum of totals over every quote, regardless of status.
    pub total_quoted: f64,
    /// Sum of totals over approved quotes only.
    pub total_approved: f64,
    pub most_used_materials: Vec<MaterialUsage>,
    pub top_clients: Vec<ClientSpending>,
}

/// Aggregate a profile's quotes into the dashboard summary.
pub async fn summary(
    db: &DatabaseConnection,
    profile_id: i32,
) -> Result<ReportSummary, ServiceError> {
    let quotes = Quote::find()
        .filter(quote::Column::ProfileId.eq(profile_id))
        .all(db)
        .await?;

    let mut by_status: BTreeMap<String, i64> = QUOTE_STATUSES
        .iter()
        .map(|s| (s.to_string(), 0))
        .collect();
    let mut total_quoted = 0.0;
    let mut total_approved = 0.0;
    let mut approved_by_client: HashMap<i32, f64> = HashMap::new();

    for q in &quotes {
        *by_status.entry(q.status.clone()).or_insert(0) += 1;
        total_quoted += q.total;
        if q.status == "approved" {
            total_approved += q.total;
            *approved_by_client.entry(q.client_id).or_insert(0.0) += q.total;
        }
    }

    // Material usage across every job of every quote.
    let quote_ids: Vec<i32> = quotes.iter().map(|q| q.id).collect();
    let mut usage_by_material: HashMap<String, f64> = HashMap::new();
    if !quote_ids.is_empty() {
        let jobs = Job::find()
            .filter(job::Column::QuoteId.is_in(quote_ids))
            .all(db)
            .await?;
        let job_ids: Vec<i32> = jobs.iter().map(|j| j.id).collect();

        if !job_ids.is_empty() {
            let lines = JobMaterial::find()
                .filter(job_material::Column::JobId.is_in(job_ids))
                .all(db)
                .await?;
            for line in lines {
                *usage_by_material.entry(line.material_name).or_insert(0.0) += line.quantity;
            }
        }
    }

    let mut most_used_materials: Vec<MaterialUsage> = usage_by_material
        .into_iter()
        .map(|(material_name, quantity_used)| MaterialUsage {
            material_name,
            quantity_used,
        })
        .collect();
    most_used_materials.sort_by(|a, b| {
        b.quantity_used
            .partial_cmp(&a.quantity_used)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    most_used_materials.truncate(TOP_N);

    // Resolve client names for the top spenders.
    let client_ids: Vec<i32> = approved_by_client.keys().copied().collect();
    let mut names_by_id: HashMap<i32, String> = HashMap::new();
    if !client_ids.is_empty() {
        let clients = Client::find()
            .filter(client::Column::Id.is_in(client_ids))
            .all(db)
            .await?;
        for c in clients {
            names_by_id.insert(c.id, c.name);
        }
    }

    let mut top_clients: Vec<ClientSpending> = approved_by_client
        .into_iter()
        .map(|(client_id, total_spent)| ClientSpending {
            client_name: names_by_id
                .get(&client_id)
                .cloned()
                .unwrap_or_else(|| "Desconocido".to_string()),
            total_spent,
        })
        .collect();
    top_clients.sort_by(|a, b| {
        b.total_spent
            .partial_cmp(&a.total_spent)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    top_clients.truncate(TOP_N);

    Ok(ReportSummary {
        total_quotes: quotes.len() as i64,
        by_status,
        total_quoted,
        total_approved,
        most_used_materials,
        top_clients,
    })
}
