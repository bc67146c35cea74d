//! Plan editing session.
//!
//! A [`PlanEditorSession`] owns one draft and the catalog snapshot it was
//! opened with. All reads and writes of feature values go through the
//! snapshot, so only assignable features can be set. Nothing is persisted
//! until [`PlanEditorSession::submit`].

use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    CatalogSnapshot, FeatureValue, PlanDraft, PlanUpdate, PlatformFeature, SubscriptionPlan,
    BASE_CURRENCY,
};

use super::category_grouping::group_by_category;
use super::feature_resolution::{is_assignable, resolve, resolve_assignable, BlockedFeature};
use super::feature_value::{get_feature_value, set_feature_value, FeatureValueError};
use super::plan_store::{PersistenceError, PlanStore};
use super::plan_validation::{validate_plan_draft, PlanValidationErrors};

/// Error raised when editing a draft field directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftEditError {
    #[error("Plan name cannot be changed once the plan exists")]
    NameImmutable,
}

/// Error raised by [`PlanEditorSession::submit`]. The draft is kept in both cases.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("Plan draft is invalid ({} field(s))", .0.len())]
    Invalid(PlanValidationErrors),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Uuid),
    Updated(Uuid),
}

impl SubmitOutcome {
    pub fn plan_id(&self) -> Uuid {
        match self {
            SubmitOutcome::Created(id) | SubmitOutcome::Updated(id) => *id,
        }
    }
}

/// One admin's in-progress edit of a subscription plan.
#[derive(Debug, Clone)]
pub struct PlanEditorSession {
    catalog: Arc<CatalogSnapshot>,
    draft: PlanDraft,
    plan_id: Option<Uuid>,
    original: Option<PlanDraft>,
}

fn find_assignable<'a>(
    catalog: &'a CatalogSnapshot,
    feature_id: &str,
) -> Result<&'a PlatformFeature, FeatureValueError> {
    catalog
        .find(feature_id)
        .filter(|feature| is_assignable(catalog, feature))
        .ok_or_else(|| FeatureValueError::NotAssignable(feature_id.to_string()))
}

fn empty_draft() -> PlanDraft {
    let mut draft = PlanDraft::default();
    draft.set_price(BASE_CURRENCY, 0.0);
    draft
}

impl PlanEditorSession {
    /// Session for a new plan, starting from an empty draft.
    pub fn new(catalog: Arc<CatalogSnapshot>) -> Self {
        Self {
            catalog,
            draft: empty_draft(),
            plan_id: None,
            original: None,
        }
    }

    /// Session editing an existing plan.
    pub fn edit(catalog: Arc<CatalogSnapshot>, plan: &SubscriptionPlan) -> Self {
        let draft = plan.to_draft();
        Self {
            catalog,
            original: Some(draft.clone()),
            draft,
            plan_id: Some(plan.id),
        }
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn draft(&self) -> &PlanDraft {
        &self.draft
    }

    /// Id of the plan being edited, or of the plan created by this session.
    pub fn plan_id(&self) -> Option<Uuid> {
        self.plan_id
    }

    pub fn assignable(&self) -> Vec<&PlatformFeature> {
        resolve_assignable(&self.catalog)
    }

    pub fn grouped(&self) -> BTreeMap<String, Vec<&PlatformFeature>> {
        group_by_category(self.assignable())
    }

    pub fn blocked(&self) -> Vec<BlockedFeature> {
        resolve(&self.catalog).blocked
    }

    /// Current value of an assignable feature.
    pub fn value(&self, feature_id: &str) -> Result<Option<FeatureValue>, FeatureValueError> {
        let feature = find_assignable(&self.catalog, feature_id)?;
        Ok(get_feature_value(&self.draft, feature))
    }

    pub fn set_value(
        &mut self,
        feature_id: &str,
        value: FeatureValue,
    ) -> Result<(), FeatureValueError> {
        let feature = find_assignable(&self.catalog, feature_id)?;
        set_feature_value(&mut self.draft, feature, value)
    }

    /// Sets the plan name. Only new plans may change it.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DraftEditError> {
        let name = name.into();
        if self.plan_id.is_some() && name != self.draft.name {
            return Err(DraftEditError::NameImmutable);
        }
        self.draft.name = name;
        Ok(())
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.draft.display_name = display_name.into();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.draft.description = description;
    }

    pub fn set_price(&mut self, currency: impl Into<String>, amount: f64) {
        self.draft.set_price(currency, amount);
    }

    pub fn validate(&self) -> PlanValidationErrors {
        validate_plan_draft(&self.draft)
    }

    /// Fields of the draft that differ from the persisted plan.
    fn pending_update(&self, original: &PlanDraft, active: bool) -> PlanUpdate {
        let draft = &self.draft;
        PlanUpdate {
            display_name: (draft.display_name != original.display_name)
                .then(|| draft.display_name.clone()),
            description: (draft.description != original.description)
                .then(|| draft.description.clone()),
            pricing: (draft.pricing != original.pricing).then(|| draft.pricing.clone()),
            features: (draft.features != original.features).then(|| draft.features.clone()),
            limits: (draft.limits != original.limits).then(|| draft.limits.clone()),
            active: (active != original.active).then_some(active),
        }
    }

    /// Validates the draft, then creates the plan or merge-updates it.
    ///
    /// `save_as_draft` keeps the plan unpublished (`active = false`).
    pub async fn submit(
        &mut self,
        store: &dyn PlanStore,
        actor_id: Uuid,
        save_as_draft: bool,
    ) -> Result<SubmitOutcome, SubmitError> {
        let errors = self.validate();
        if !errors.is_empty() {
            tracing::debug!(fields = errors.len(), "Plan draft rejected by validation");
            return Err(SubmitError::Invalid(errors));
        }

        let active = !save_as_draft;

        let outcome = match (self.plan_id, &self.original) {
            (Some(id), Some(original)) => {
                let update = self.pending_update(original, active);
                store.update(id, &update, actor_id).await?;
                tracing::info!(plan_id = %id, actor_id = %actor_id, active, "Subscription plan updated");
                SubmitOutcome::Updated(id)
            }
            _ => {
                let id = store.create(&self.draft, save_as_draft, actor_id).await?;
                tracing::info!(
                    plan_id = %id,
                    plan_name = %self.draft.name,
                    actor_id = %actor_id,
                    active,
                    "Subscription plan created"
                );
                self.plan_id = Some(id);
                SubmitOutcome::Created(id)
            }
        };

        self.draft.active = active;
        self.original = Some(self.draft.clone());

        Ok(outcome)
    }

    /// Discards unsaved changes.
    pub fn cancel(&mut self) {
        self.draft = self.original.clone().unwrap_or_else(empty_draft);
    }
}
