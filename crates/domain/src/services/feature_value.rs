//! Reads and writes of a single feature's value inside a plan draft.

use thiserror::Error;

use crate::models::{FeatureSlot, FeatureValue, Limit, PlanDraft, PlanValueType, PlatformFeature};

/// Error raised when a value cannot be written for a feature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureValueError {
    #[error("Feature '{feature_id}' expects a {expected} value")]
    KindMismatch {
        feature_id: String,
        expected: &'static str,
    },

    #[error("Feature '{0}' is not assignable")]
    NotAssignable(String),
}

/// Current value of `feature` in `draft`.
///
/// The `features` map takes precedence over `limits` when a key is present in
/// both. Features without a plan key have no value.
pub fn get_feature_value(draft: &PlanDraft, feature: &PlatformFeature) -> Option<FeatureValue> {
    let plan_key = feature.plan_key()?;

    draft
        .features
        .get(plan_key)
        .copied()
        .map(FeatureValue::Enabled)
        .or_else(|| draft.limits.get(plan_key).copied().map(FeatureValue::Limit))
}

/// Writes `value` into the map selected by the feature's slot, keeping other keys.
///
/// A feature without a plan key leaves the draft untouched and succeeds. A
/// value of the wrong kind for the slot is rejected and nothing is written.
///
/// Boolean features with a usage limit are switched through their limit:
/// enabling keeps an existing limit or seeds the default (unlimited when the
/// catalog has none), disabling removes the limit key.
pub fn set_feature_value(
    draft: &mut PlanDraft,
    feature: &PlatformFeature,
    value: FeatureValue,
) -> Result<(), FeatureValueError> {
    let Some(slot) = &feature.slot else {
        return Ok(());
    };

    match (slot, value) {
        (FeatureSlot::Toggle { plan_key }, FeatureValue::Enabled(enabled)) => {
            draft.features.insert(plan_key.clone(), enabled);
            Ok(())
        }
        (FeatureSlot::Limit { plan_key, .. }, FeatureValue::Limit(limit)) => {
            draft.limits.insert(plan_key.clone(), limit);
            Ok(())
        }
        (FeatureSlot::Toggle { .. }, FeatureValue::Limit(_)) => {
            Err(FeatureValueError::KindMismatch {
                feature_id: feature.feature_id.clone(),
                expected: "boolean",
            })
        }
        (
            FeatureSlot::Limit {
                plan_key,
                default_limit,
                ..
            },
            FeatureValue::Enabled(enabled),
        ) if feature.plan_type == PlanValueType::Boolean => {
            if enabled {
                draft
                    .limits
                    .entry(plan_key.clone())
                    .or_insert(default_limit.unwrap_or(Limit::Unlimited));
            } else {
                draft.limits.remove(plan_key);
            }
            Ok(())
        }
        (FeatureSlot::Limit { .. }, FeatureValue::Enabled(_)) => {
            Err(FeatureValueError::KindMismatch {
                feature_id: feature.feature_id.clone(),
                expected: "limit",
            })
        }
    }
}
