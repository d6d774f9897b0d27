use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A community's tracked production and emissions counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CommunityMetric {
    pub id: Uuid,
    pub organization_id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub kwh_production: f64,
    pub co2_avoided_kg: f64,
    /// Sorted, without duplicates
    pub user_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a metric
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NewMetric {
    pub organization_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub kwh_production: f64,
    #[serde(default)]
    pub co2_avoided_kg: f64,
    #[serde(default)]
    pub user_ids: Vec<String>,
}

fn default_active() -> bool {
    true
}

/// Request body for updating a metric; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MetricUpdate {
    pub organization_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub kwh_production: Option<f64>,
    pub co2_avoided_kg: Option<f64>,
}

/// Editable fields of a metric, served by the create and edit routes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MetricForm {
    pub organization_id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub kwh_production: f64,
    pub co2_avoided_kg: f64,
}

impl Default for MetricForm {
    fn default() -> Self {
        MetricForm {
            organization_id: String::new(),
            name: String::new(),
            description: None,
            is_active: true,
            kwh_production: 0.0,
            co2_avoided_kg: 0.0,
        }
    }
}

impl From<&CommunityMetric> for MetricForm {
    fn from(metric: &CommunityMetric) -> Self {
        MetricForm {
            organization_id: metric.organization_id.clone(),
            name: metric.name.clone(),
            description: metric.description.clone(),
            is_active: metric.is_active,
            kwh_production: metric.kwh_production,
            co2_avoided_kg: metric.co2_avoided_kg,
        }
    }
}

/// Request body for the add-user and remove-user routes
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserRequest {
    pub user_id: String,
}

/// Request body for the counter increment routes
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AmountRequest {
    pub amount: f64,
}

/// Query parameters for the index route
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Response type for list routes
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ListResponse {
    pub data: Vec<CommunityMetric>,
    pub total_count: usize,
}

/// Aggregate figures across all metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatisticsResponse {
    pub total_count: usize,
    pub active_count: usize,
    pub inactive_count: usize,
    pub total_kwh_production: f64,
    pub total_co2_avoided_kg: f64,
    pub distinct_users: usize,
    pub organization_count: usize,
}
