//! Grouping of assignable features into editor categories.

use std::collections::BTreeMap;

use crate::models::{FeatureCategoryResponse, PlatformFeature};

/// Display label for a category tag. Unknown tags pass through unchanged.
pub fn category_label(category: &str) -> &str {
    match category {
        "payments" => "Payments & Payouts",
        "storefront" => "Storefront",
        "catalog" => "Products & Catalog",
        "orders" => "Orders",
        "messaging" => "Messaging & Notifications",
        "marketing" => "Marketing",
        "ai" => "AI Features",
        "analytics" => "Analytics & Reports",
        "integrations" => "Integrations",
        "support" => "Support",
        "limits" => "Usage Limits",
        other => other,
    }
}

/// Partitions features by category, each sorted by `(display_order, feature_id)`.
///
/// Categories without members never appear in the result.
pub fn group_by_category<'a, I>(features: I) -> BTreeMap<String, Vec<&'a PlatformFeature>>
where
    I: IntoIterator<Item = &'a PlatformFeature>,
{
    let mut groups: BTreeMap<String, Vec<&'a PlatformFeature>> = BTreeMap::new();

    for feature in features {
        groups
            .entry(feature.category.clone())
            .or_default()
            .push(feature);
    }

    for members in groups.values_mut() {
        members.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.feature_id.cmp(&b.feature_id))
        });
    }

    groups
}

/// Owned, labelled view of grouped features for the editor.
pub fn to_category_responses(
    groups: BTreeMap<String, Vec<&PlatformFeature>>,
) -> Vec<FeatureCategoryResponse> {
    groups
        .into_iter()
        .map(|(category, members)| FeatureCategoryResponse {
            label: category_label(&category).to_string(),
            features: members.into_iter().cloned().collect(),
            category,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlanValueType, PlatformFeatureRecord};

    fn feature(id: &str, category: &str, order: i32) -> PlatformFeature {
        PlatformFeatureRecord::new(id, format!("c_{}", id), PlanValueType::Boolean)
            .with_plan_key(id)
            .in_category(category)
            .with_display_order(order)
            .into()
    }

    #[test]
    fn test_groups_and_sorts_by_display_order_then_id() {
        let features = vec![
            feature("zeta", "payments", 1),
            feature("alpha", "payments", 1),
            feature("first", "payments", 0),
            feature("bot", "ai", 5),
        ];

        let groups = group_by_category(&features);

        let payments: Vec<&str> = groups["payments"]
            .iter()
            .map(|f| f.feature_id.as_str())
            .collect();
        assert_eq!(payments, vec!["first", "alpha", "zeta"]);
        assert_eq!(groups["ai"].len(), 1);
    }

    #[test]
    fn test_empty_categories_are_omitted() {
        let features = vec![feature("payouts", "payments", 0)];
        let groups = group_by_category(&features);

        assert!(!groups.contains_key("support"));
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["payments"]);
    }

    #[test]
    fn test_no_features_yields_no_groups() {
        let groups = group_by_category(std::iter::empty());
        assert!(groups.is_empty());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(category_label("ai"), "AI Features");
        assert_eq!(category_label("support"), "Support");
        assert_eq!(category_label("loyalty_beta"), "loyalty_beta");
    }

    #[test]
    fn test_to_category_responses_carries_labels() {
        let features = vec![feature("chatbot", "ai", 0), feature("custom", "custom_tag", 0)];
        let responses = to_category_responses(group_by_category(&features));

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].category, "ai");
        assert_eq!(responses[0].label, "AI Features");
        assert_eq!(responses[1].label, "custom_tag");
        assert_eq!(responses[1].features[0].feature_id, "custom");
    }
}
