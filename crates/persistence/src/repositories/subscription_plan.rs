//! Subscription plan repository.

use chrono::Utc;
use domain::models::{PlanDraft, PlanUpdate, SubscriptionPlan};
use domain::services::{PersistenceError, PlanStore};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::SubscriptionPlanEntity;
use crate::metrics::QueryTimer;

const PLAN_COLUMNS: &str = "id, name, display_name, description, pricing, features, limits, \
                            active, created_at, updated_at, updated_by";

/// Maps a database error onto the gateway's error type.
pub fn store_error(err: sqlx::Error) -> PersistenceError {
    if let sqlx::Error::Database(db_err) = &err {
        // PostgreSQL error code 23505 = unique_violation
        if db_err.code().as_deref() == Some("23505") {
            return PersistenceError::Conflict("Plan name already exists".to_string());
        }
    }
    tracing::error!(error = %err, "Subscription plan query failed");
    PersistenceError::Store(err.to_string())
}

fn to_document<T: Serialize>(value: &T) -> Result<serde_json::Value, PersistenceError> {
    serde_json::to_value(value).map_err(|e| PersistenceError::Store(e.to_string()))
}

fn to_plan(entity: SubscriptionPlanEntity) -> Result<SubscriptionPlan, PersistenceError> {
    SubscriptionPlan::try_from(entity).map_err(|e| PersistenceError::Store(e.to_string()))
}

/// Postgres store for subscription plan documents.
#[derive(Clone)]
pub struct SubscriptionPlanRepository {
    pool: PgPool,
}

impl SubscriptionPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl PlanStore for SubscriptionPlanRepository {
    async fn create(
        &self,
        draft: &PlanDraft,
        save_as_draft: bool,
        actor_id: Uuid,
    ) -> Result<Uuid, PersistenceError> {
        let now = Utc::now();
        let pricing = to_document(&draft.pricing)?;
        let features = to_document(&draft.features)?;
        let limits = to_document(&draft.limits)?;

        let timer = QueryTimer::new("create_subscription_plan");
        let result = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO subscription_plans
                (id, name, display_name, description, pricing, features, limits,
                 active, created_at, updated_at, updated_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9, $10)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&draft.name)
        .bind(&draft.display_name)
        .bind(&draft.description)
        .bind(pricing)
        .bind(features)
        .bind(limits)
        .bind(!save_as_draft)
        .bind(now)
        .bind(actor_id)
        .fetch_one(&self.pool)
        .await;
        timer.record(&result);

        result.map_err(store_error)
    }

    async fn update(
        &self,
        id: Uuid,
        update: &PlanUpdate,
        actor_id: Uuid,
    ) -> Result<(), PersistenceError> {
        let pricing = update.pricing.as_ref().map(to_document).transpose()?;
        let features = update.features.as_ref().map(to_document).transpose()?;
        let limits = update.limits.as_ref().map(to_document).transpose()?;

        let timer = QueryTimer::new("update_subscription_plan");
        let result = sqlx::query(
            r#"
            UPDATE subscription_plans
            SET display_name = COALESCE($2, display_name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                pricing = COALESCE($5, pricing),
                features = COALESCE($6, features),
                limits = COALESCE($7, limits),
                active = COALESCE($8, active),
                updated_at = $9,
                updated_by = $10
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&update.display_name)
        .bind(update.description.is_some())
        .bind(update.description.clone().flatten())
        .bind(pricing)
        .bind(features)
        .bind(limits)
        .bind(update.active)
        .bind(Utc::now())
        .bind(actor_id)
        .execute(&self.pool)
        .await;
        timer.record(&result);

        if result.map_err(store_error)?.rows_affected() == 0 {
            return Err(PersistenceError::NotFound(id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubscriptionPlan>, PersistenceError> {
        let timer = QueryTimer::new("find_subscription_plan");
        let result = sqlx::query_as::<_, SubscriptionPlanEntity>(&format!(
            "SELECT {} FROM subscription_plans WHERE id = $1",
            PLAN_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record(&result);

        result.map_err(store_error)?.map(to_plan).transpose()
    }

    async fn list(&self) -> Result<Vec<SubscriptionPlan>, PersistenceError> {
        let timer = QueryTimer::new("list_subscription_plans");
        let result = sqlx::query_as::<_, SubscriptionPlanEntity>(&format!(
            "SELECT {} FROM subscription_plans ORDER BY created_at, name",
            PLAN_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record(&result);

        result.map_err(store_error)?.into_iter().map(to_plan).collect()
    }
}
