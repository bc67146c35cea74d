//! Subscription plan persistence gateway.

use chrono::Utc;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{PlanDraft, PlanUpdate, SubscriptionPlan};

/// Error raised by a plan store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("Subscription plan {0} not found")]
    NotFound(Uuid),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(String),
}

/// Document store for subscription plans.
///
/// Every write stamps `updated_at` with the server clock and `updated_by`
/// with the acting admin. Nothing is retried.
#[async_trait::async_trait]
pub trait PlanStore: Send + Sync {
    /// Persists `draft` as a new plan with `active = !save_as_draft`.
    async fn create(
        &self,
        draft: &PlanDraft,
        save_as_draft: bool,
        actor_id: Uuid,
    ) -> Result<Uuid, PersistenceError>;

    /// Merges the present fields of `update` into plan `id`.
    async fn update(
        &self,
        id: Uuid,
        update: &PlanUpdate,
        actor_id: Uuid,
    ) -> Result<(), PersistenceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubscriptionPlan>, PersistenceError>;

    /// All plans, oldest first.
    async fn list(&self) -> Result<Vec<SubscriptionPlan>, PersistenceError>;
}

/// In-memory plan store for development and testing.
#[derive(Debug, Default)]
pub struct InMemoryPlanStore {
    plans: RwLock<HashMap<Uuid, SubscriptionPlan>>,
    /// Whether to simulate an unreachable store.
    pub simulate_failure: bool,
}

impl InMemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose operations always fail.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Default::default()
        }
    }

    fn check_available(&self) -> Result<(), PersistenceError> {
        if self.simulate_failure {
            tracing::warn!("In-memory plan store simulating failure");
            return Err(PersistenceError::Store("Simulated failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl PlanStore for InMemoryPlanStore {
    async fn create(
        &self,
        draft: &PlanDraft,
        save_as_draft: bool,
        actor_id: Uuid,
    ) -> Result<Uuid, PersistenceError> {
        self.check_available()?;

        let mut plans = self.plans.write().await;
        if plans.values().any(|p| p.name == draft.name) {
            return Err(PersistenceError::Conflict(format!(
                "Plan name '{}' already exists",
                draft.name
            )));
        }

        let now = Utc::now();
        let plan = SubscriptionPlan {
            id: Uuid::new_v4(),
            name: draft.name.clone(),
            display_name: draft.display_name.clone(),
            description: draft.description.clone(),
            pricing: draft.pricing.clone(),
            features: draft.features.clone(),
            limits: draft.limits.clone(),
            active: !save_as_draft,
            created_at: now,
            updated_at: now,
            updated_by: Some(actor_id),
        };
        let id = plan.id;
        plans.insert(id, plan);

        Ok(id)
    }

    async fn update(
        &self,
        id: Uuid,
        update: &PlanUpdate,
        actor_id: Uuid,
    ) -> Result<(), PersistenceError> {
        self.check_available()?;

        let mut plans = self.plans.write().await;
        let plan = plans.get_mut(&id).ok_or(PersistenceError::NotFound(id))?;

        let mut draft = plan.to_draft();
        update.apply_to(&mut draft);

        plan.display_name = draft.display_name;
        plan.description = draft.description;
        plan.pricing = draft.pricing;
        plan.features = draft.features;
        plan.limits = draft.limits;
        plan.active = draft.active;
        plan.updated_at = Utc::now();
        plan.updated_by = Some(actor_id);

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubscriptionPlan>, PersistenceError> {
        self.check_available()?;
        Ok(self.plans.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<SubscriptionPlan>, PersistenceError> {
        self.check_available()?;
        let mut plans: Vec<SubscriptionPlan> = self.plans.read().await.values().cloned().collect();
        plans.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));
        Ok(plans)
    }
}
