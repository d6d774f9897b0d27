use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{CommunityMetric, MetricUpdate, NewMetric, StatisticsResponse};

/// Failures raised by store operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Metric not found: {0}")]
    MetricNotFound(Uuid),

    #[error("User '{user_id}' is not attached to metric {metric_id}")]
    UserNotFound { metric_id: Uuid, user_id: String },

    #[error("{0}")]
    InvalidInput(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Shareable in-memory metric store for use across async handlers
#[derive(Clone, Default)]
pub struct MetricStore {
    inner: Arc<RwLock<HashMap<Uuid, CommunityMetric>>>,
}

impl MetricStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Insert a new metric stamped with `now`
    pub async fn create(&self, new: NewMetric, now: DateTime<Utc>) -> StoreResult<CommunityMetric> {
        require_text("organization_id", &new.organization_id)?;
        require_text("name", &new.name)?;
        require_counter("kwh_production", new.kwh_production)?;
        require_counter("co2_avoided_kg", new.co2_avoided_kg)?;

        let mut user_ids = Vec::with_capacity(new.user_ids.len());
        for user_id in new.user_ids {
            require_text("user_id", &user_id)?;
            user_ids.push(user_id);
        }
        user_ids.sort();
        user_ids.dedup();

        let metric = CommunityMetric {
            id: Uuid::new_v4(),
            organization_id: new.organization_id,
            name: new.name,
            description: new.description,
            is_active: new.is_active,
            kwh_production: new.kwh_production,
            co2_avoided_kg: new.co2_avoided_kg,
            user_ids,
            created_at: now,
            updated_at: now,
        };

        self.inner.write().await.insert(metric.id, metric.clone());
        Ok(metric)
    }

    pub async fn get(&self, id: Uuid) -> Option<CommunityMetric> {
        self.inner.read().await.get(&id).cloned()
    }

    /// All metrics matching `predicate`, ordered by creation time then id
    pub async fn list_where<F>(&self, predicate: F) -> Vec<CommunityMetric>
    where
        F: Fn(&CommunityMetric) -> bool,
    {
        let guard = self.inner.read().await;
        let mut metrics: Vec<CommunityMetric> =
            guard.values().filter(|m| predicate(*m)).cloned().collect();
        metrics.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        metrics
    }

    pub async fn list_all(&self) -> Vec<CommunityMetric> {
        self.list_where(|_| true).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        update: MetricUpdate,
        now: DateTime<Utc>,
    ) -> StoreResult<CommunityMetric> {
        if let Some(organization_id) = &update.organization_id {
            require_text("organization_id", organization_id)?;
        }
        if let Some(name) = &update.name {
            require_text("name", name)?;
        }
        if let Some(kwh) = update.kwh_production {
            require_counter("kwh_production", kwh)?;
        }
        if let Some(co2) = update.co2_avoided_kg {
            require_counter("co2_avoided_kg", co2)?;
        }

        self.mutate(id, now, |metric| {
            if let Some(organization_id) = update.organization_id {
                metric.organization_id = organization_id;
            }
            if let Some(name) = update.name {
                metric.name = name;
            }
            if update.description.is_some() {
                metric.description = update.description;
            }
            if let Some(is_active) = update.is_active {
                metric.is_active = is_active;
            }
            if let Some(kwh) = update.kwh_production {
                metric.kwh_production = kwh;
            }
            if let Some(co2) = update.co2_avoided_kg {
                metric.co2_avoided_kg = co2;
            }
            Ok(())
        })
        .await
    }

    pub async fn delete(&self, id: Uuid) -> StoreResult<CommunityMetric> {
        self.inner
            .write()
            .await
            .remove(&id)
            .ok_or(StoreError::MetricNotFound(id))
    }

    /// Attach a user; attaching an existing user is a no-op apart from the timestamp
    pub async fn add_user(&self, id: Uuid, user_id: String, now: DateTime<Utc>) -> StoreResult<CommunityMetric> {
        require_text("user_id", &user_id)?;
        self.mutate(id, now, |metric| {
            if let Err(pos) = metric.user_ids.binary_search(&user_id) {
                metric.user_ids.insert(pos, user_id);
            }
            Ok(())
        })
        .await
    }

    pub async fn remove_user(&self, id: Uuid, user_id: String, now: DateTime<Utc>) -> StoreResult<CommunityMetric> {
        self.mutate(id, now, |metric| match metric.user_ids.binary_search(&user_id) {
            Ok(pos) => {
                metric.user_ids.remove(pos);
                Ok(())
            }
            Err(_) => Err(StoreError::UserNotFound {
                metric_id: metric.id,
                user_id,
            }),
        })
        .await
    }

    pub async fn add_kwh_production(&self, id: Uuid, amount: f64, now: DateTime<Utc>) -> StoreResult<CommunityMetric> {
        require_increment(amount)?;
        self.mutate(id, now, |metric| {
            metric.kwh_production = increased("kwh_production", metric.kwh_production, amount)?;
            Ok(())
        })
        .await
    }

    pub async fn add_co2_avoided(&self, id: Uuid, amount: f64, now: DateTime<Utc>) -> StoreResult<CommunityMetric> {
        require_increment(amount)?;
        self.mutate(id, now, |metric| {
            metric.co2_avoided_kg = increased("co2_avoided_kg", metric.co2_avoided_kg, amount)?;
            Ok(())
        })
        .await
    }

    /// Zero both counters; users and flags are kept
    pub async fn reset_counters(&self, id: Uuid, now: DateTime<Utc>) -> StoreResult<CommunityMetric> {
        self.mutate(id, now, |metric| {
            metric.kwh_production = 0.0;
            metric.co2_avoided_kg = 0.0;
            Ok(())
        })
        .await
    }

    pub async fn statistics(&self) -> StatisticsResponse {
        let guard = self.inner.read().await;

        let mut users: HashSet<&str> = HashSet::new();
        let mut organizations: HashSet<&str> = HashSet::new();
        let mut stats = StatisticsResponse {
            total_count: guard.len(),
            active_count: 0,
            inactive_count: 0,
            total_kwh_production: 0.0,
            total_co2_avoided_kg: 0.0,
            distinct_users: 0,
            organization_count: 0,
        };

        for metric in guard.values() {
            if metric.is_active {
                stats.active_count += 1;
            } else {
                stats.inactive_count += 1;
            }
            stats.total_kwh_production = saturating_sum(stats.total_kwh_production, metric.kwh_production);
            stats.total_co2_avoided_kg = saturating_sum(stats.total_co2_avoided_kg, metric.co2_avoided_kg);
            users.extend(metric.user_ids.iter().map(String::as_str));
            organizations.insert(metric.organization_id.as_str());
        }

        stats.distinct_users = users.len();
        stats.organization_count = organizations.len();
        stats
    }

    /// Apply `change` under a single write lock, bumping `updated_at` on success
    async fn mutate<F>(&self, id: Uuid, now: DateTime<Utc>, change: F) -> StoreResult<CommunityMetric>
    where
        F: FnOnce(&mut CommunityMetric) -> StoreResult<()>,
    {
        let mut guard = self.inner.write().await;
        let metric = guard.get_mut(&id).ok_or(StoreError::MetricNotFound(id))?;
        change(metric)?;
        metric.updated_at = now;
        Ok(metric.clone())
    }
}

fn require_text(field: &str, value: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn require_counter(field: &str, value: f64) -> StoreResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(StoreError::InvalidInput(format!(
            "{} must be a finite, non-negative number, got {}",
            field, value
        )));
    }
    Ok(())
}

fn require_increment(amount: f64) -> StoreResult<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(StoreError::InvalidInput(format!(
            "amount must be a finite number greater than zero, got {}",
            amount
        )));
    }
    Ok(())
}

/// New counter value, rejected when the sum leaves the finite range
fn increased(field: &str, current: f64, amount: f64) -> StoreResult<f64> {
    let next = current + amount;
    if !next.is_finite() {
        return Err(StoreError::InvalidInput(format!(
            "{} would overflow: {} + {} is not a finite number",
            field, current, amount
        )));
    }
    Ok(next)
}

// Counters are finite and non-negative, so only the upper bound can be crossed
fn saturating_sum(total: f64, value: f64) -> f64 {
    (total + value).min(f64::MAX)
}
