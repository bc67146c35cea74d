//! Pre-submit validation of plan drafts.

use serde::Serialize;
use shared::validation::{validate_not_blank, validate_positive_amount};
use std::collections::BTreeMap;

use crate::models::{PlanDraft, BASE_CURRENCY};

pub const NAME_FIELD: &str = "name";
pub const DISPLAY_NAME_FIELD: &str = "displayName";

const NAME_REQUIRED: &str = "Plan name is required";
const DISPLAY_NAME_REQUIRED: &str = "Display name is required";

/// Field path of the base-currency price, e.g. `pricing.INR`.
pub fn base_pricing_field() -> String {
    format!("pricing.{}", BASE_CURRENCY)
}

/// Field → message map of failed rules. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlanValidationErrors(BTreeMap<String, String>);

impl PlanValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }
}

/// Runs every rule independently against `draft`.
///
/// Features and limits are never inspected; an empty feature set is valid.
pub fn validate_plan_draft(draft: &PlanDraft) -> PlanValidationErrors {
    let mut errors = PlanValidationErrors::default();

    if validate_not_blank(&draft.name).is_err() {
        errors.insert(NAME_FIELD, NAME_REQUIRED);
    }

    if validate_not_blank(&draft.display_name).is_err() {
        errors.insert(DISPLAY_NAME_FIELD, DISPLAY_NAME_REQUIRED);
    }

    let price_error = match draft.base_price() {
        None => Some(format!("{} price is required", BASE_CURRENCY)),
        Some(amount) => validate_positive_amount(amount).err().map(|err| {
            let message = err
                .message
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Invalid amount".to_string());
            format!("{} price: {}", BASE_CURRENCY, message)
        }),
    };
    if let Some(message) = price_error {
        errors.insert(base_pricing_field(), message);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Limit;

    fn draft(name: &str, display_name: &str, amount: Option<f64>) -> PlanDraft {
        let mut draft = PlanDraft {
            name: name.to_string(),
            display_name: display_name.to_string(),
            ..Default::default()
        };
        if let Some(amount) = amount {
            draft.set_price(BASE_CURRENCY, amount);
        }
        draft
    }

    #[test]
    fn test_valid_draft() {
        assert!(validate_plan_draft(&draft("pro", "Pro", Some(10.0))).is_empty());
    }

    #[test]
    fn test_blank_name_only() {
        let errors = validate_plan_draft(&draft("", "Pro", Some(10.0)));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(NAME_FIELD), Some(NAME_REQUIRED));
    }

    #[test]
    fn test_zero_base_price_only() {
        let errors = validate_plan_draft(&draft("pro", "Pro", Some(0.0)));
        assert_eq!(errors.len(), 1);
        assert!(errors.get("pricing.INR").is_some());
    }

    #[test]
    fn test_whitespace_is_blank() {
        let errors = validate_plan_draft(&draft("   ", "\t", Some(10.0)));
        assert_eq!(errors.len(), 2);
        assert!(errors.get(DISPLAY_NAME_FIELD).is_some());
    }

    #[test]
    fn test_missing_negative_and_nan_prices() {
        for amount in [None, Some(-1.0), Some(f64::NAN)] {
            let errors = validate_plan_draft(&draft("pro", "Pro", amount));
            assert_eq!(errors.len(), 1, "amount {:?}", amount);
            assert!(errors.get(&base_pricing_field()).is_some());
        }
    }

    #[test]
    fn test_other_currency_does_not_satisfy_base() {
        let mut plan = draft("pro", "Pro", None);
        plan.set_price("USD", 12.0);
        assert!(validate_plan_draft(&plan).get("pricing.INR").is_some());
    }

    #[test]
    fn test_all_rules_fire_independently() {
        let errors = validate_plan_draft(&PlanDraft::default());
        let fields: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["displayName", "name", "pricing.INR"]);
    }

    #[test]
    fn test_features_and_limits_are_ignored() {
        let mut plan = draft("pro", "Pro", Some(99.0));
        plan.features.insert("anything".to_string(), false);
        plan.limits.insert("maxProducts".to_string(), Limit::Finite(0));
        let before = plan.clone();

        assert!(validate_plan_draft(&plan).is_empty());
        assert_eq!(plan, before);
    }

    #[test]
    fn test_errors_serialize_as_flat_map() {
        let errors = validate_plan_draft(&draft("", "Pro", Some(1.0)));
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Plan name is required"}));
    }
}
