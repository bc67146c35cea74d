//! Subscription plan domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

use super::limit::Limit;

/// Currency whose price record every plan must carry.
pub const BASE_CURRENCY: &str = "INR";

/// Price of a plan in one currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub amount: f64,
}

/// A single feature's value inside a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Value of a boolean feature (`features` map).
    Enabled(bool),
    /// Value of a numeric or usage-limited feature (`limits` map).
    Limit(Limit),
}

/// In-memory state of a plan being created or edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pricing: BTreeMap<String, PriceRecord>,
    #[serde(default)]
    pub features: BTreeMap<String, bool>,
    #[serde(default)]
    pub limits: BTreeMap<String, Limit>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Default for PlanDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            display_name: String::new(),
            description: None,
            pricing: BTreeMap::new(),
            features: BTreeMap::new(),
            limits: BTreeMap::new(),
            active: default_active(),
        }
    }
}

impl PlanDraft {
    /// Base-currency amount, if a price record exists for it.
    pub fn base_price(&self) -> Option<f64> {
        self.pricing.get(BASE_CURRENCY).map(|p| p.amount)
    }

    pub fn set_price(&mut self, currency: impl Into<String>, amount: f64) {
        self.pricing.insert(currency.into(), PriceRecord { amount });
    }
}

/// Persisted subscription plan document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub pricing: BTreeMap<String, PriceRecord>,
    pub features: BTreeMap<String, bool>,
    pub limits: BTreeMap<String, Limit>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

impl SubscriptionPlan {
    /// Editable draft seeded from this plan.
    pub fn to_draft(&self) -> PlanDraft {
        PlanDraft {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            pricing: self.pricing.clone(),
            features: self.features.clone(),
            limits: self.limits.clone(),
            active: self.active,
        }
    }
}

/// Partial update merged into an existing plan.
///
/// `None` fields are left untouched. Present maps replace the stored map as a
/// whole. `name` is immutable and therefore absent. `description` is
/// three-state: `Some(None)` clears the stored text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<BTreeMap<String, PriceRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<BTreeMap<String, bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<BTreeMap<String, Limit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl PlanUpdate {
    /// Update carrying every editable field of `draft`.
    pub fn from_draft(draft: &PlanDraft) -> Self {
        Self {
            display_name: Some(draft.display_name.clone()),
            description: Some(draft.description.clone()),
            pricing: Some(draft.pricing.clone()),
            features: Some(draft.features.clone()),
            limits: Some(draft.limits.clone()),
            active: Some(draft.active),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the present fields into `draft`.
    pub fn apply_to(&self, draft: &mut PlanDraft) {
        if let Some(display_name) = &self.display_name {
            draft.display_name = display_name.clone();
        }
        if let Some(description) = &self.description {
            draft.description = description.clone();
        }
        if let Some(pricing) = &self.pricing {
            draft.pricing = pricing.clone();
        }
        if let Some(features) = &self.features {
            draft.features = features.clone();
        }
        if let Some(limits) = &self.limits {
            draft.limits = limits.clone();
        }
        if let Some(active) = self.active {
            draft.active = active;
        }
    }
}

/// Maps an explicit `null` to `Some(None)`; a missing field stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Value assignment for one catalog feature, keyed by feature id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureValueInput {
    pub feature_id: String,
    pub value: FeatureValue,
}

/// Request to create a plan.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub pricing: BTreeMap<String, PriceRecord>,
    #[serde(default)]
    pub feature_values: Vec<FeatureValueInput>,
    /// Keep the plan unpublished (`active = false`).
    #[serde(default)]
    pub save_as_draft: bool,
}

/// Request to partially update a plan.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanRequest {
    pub display_name: Option<String>,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    pub pricing: Option<BTreeMap<String, PriceRecord>>,
    pub feature_values: Option<Vec<FeatureValueInput>>,
    pub active: Option<bool>,
}

/// Response after creating a plan.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanResponse {
    pub id: Uuid,
    pub active: bool,
}

/// Response for listing plans.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPlansResponse {
    pub data: Vec<SubscriptionPlan>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_draft_is_empty_and_active() {
        let draft = PlanDraft::default();
        assert!(draft.name.is_empty());
        assert!(draft.pricing.is_empty());
        assert!(draft.features.is_empty());
        assert!(draft.limits.is_empty());
        assert!(draft.active);
        assert_eq!(draft.base_price(), None);
    }

    #[test]
    fn test_set_price() {
        let mut draft = PlanDraft::default();
        draft.set_price(BASE_CURRENCY, 499.0);
        draft.set_price("USD", 9.0);
        assert_eq!(draft.base_price(), Some(499.0));
        assert_eq!(draft.pricing.len(), 2);
    }

    #[test]
    fn test_feature_value_untagged_serde() {
        let enabled: FeatureValue = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(enabled, FeatureValue::Enabled(true));

        let finite: FeatureValue = serde_json::from_value(json!(10)).unwrap();
        assert_eq!(finite, FeatureValue::Limit(Limit::Finite(10)));

        let unlimited: FeatureValue = serde_json::from_value(json!("unlimited")).unwrap();
        assert_eq!(unlimited, FeatureValue::Limit(Limit::Unlimited));

        assert!(serde_json::from_value::<FeatureValue>(json!("lots")).is_err());
        assert_eq!(
            serde_json::to_value(FeatureValue::Limit(Limit::Unlimited)).unwrap(),
            json!("unlimited")
        );
    }

    #[test]
    fn test_plan_update_apply_leaves_absent_fields() {
        let mut draft = PlanDraft {
            name: "pro".to_string(),
            display_name: "Pro".to_string(),
            description: Some("For growing stores".to_string()),
            ..Default::default()
        };
        draft.features.insert("whatsapp".to_string(), true);

        let update = PlanUpdate {
            display_name: Some("Pro Plus".to_string()),
            ..Default::default()
        };
        update.apply_to(&mut draft);

        assert_eq!(draft.display_name, "Pro Plus");
        assert_eq!(draft.name, "pro");
        assert_eq!(draft.description.as_deref(), Some("For growing stores"));
        assert_eq!(draft.features.get("whatsapp"), Some(&true));
    }

    #[test]
    fn test_plan_update_from_draft_round_trip() {
        let mut draft = PlanDraft {
            name: "basic".to_string(),
            display_name: "Basic".to_string(),
            active: false,
            ..Default::default()
        };
        draft.limits.insert("maxProducts".to_string(), Limit::Finite(50));

        let update = PlanUpdate::from_draft(&draft);
        assert!(!update.is_empty());

        let mut target = PlanDraft {
            name: "basic".to_string(),
            ..Default::default()
        };
        update.apply_to(&mut target);
        assert_eq!(target, draft);
    }

    #[test]
    fn test_empty_plan_update() {
        assert!(PlanUpdate::default().is_empty());
        let update: PlanUpdate = serde_json::from_value(json!({})).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_plan_update_clears_description() {
        let mut draft = PlanDraft {
            name: "pro".to_string(),
            description: Some("old".to_string()),
            ..Default::default()
        };

        let update: PlanUpdate = serde_json::from_value(json!({"description": null})).unwrap();
        assert_eq!(update.description, Some(None));
        assert!(!update.is_empty());

        update.apply_to(&mut draft);
        assert_eq!(draft.description, None);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"description": null})
        );
    }

    #[test]
    fn test_create_request_defaults() {
        let request: CreatePlanRequest = serde_json::from_value(json!({
            "name": "pro",
            "displayName": "Pro",
            "pricing": {"INR": {"amount": 999.0}},
            "featureValues": [
                {"featureId": "whatsapp", "value": true},
                {"featureId": "products", "value": "unlimited"}
            ]
        }))
        .unwrap();

        assert!(!request.save_as_draft);
        assert_eq!(request.feature_values.len(), 2);
        assert_eq!(
            request.feature_values[1].value,
            FeatureValue::Limit(Limit::Unlimited)
        );
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_description_too_long() {
        let request = CreatePlanRequest {
            name: "pro".to_string(),
            display_name: "Pro".to_string(),
            description: Some("x".repeat(2001)),
            pricing: BTreeMap::new(),
            feature_values: Vec::new(),
            save_as_draft: false,
        };
        assert!(request.validate().is_err());
    }
}
