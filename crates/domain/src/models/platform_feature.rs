//! Platform feature catalog models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::limit::Limit;

/// Declared value kind of a catalog feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanValueType {
    Boolean,
    Number,
}

impl fmt::Display for PlanValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanValueType::Boolean => write!(f, "boolean"),
            PlanValueType::Number => write!(f, "number"),
        }
    }
}

impl FromStr for PlanValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boolean" => Ok(PlanValueType::Boolean),
            "number" => Ok(PlanValueType::Number),
            other => Err(format!("unknown plan type: {}", other)),
        }
    }
}

/// Catalog entry as stored in the `platform_features` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformFeatureRecord {
    pub feature_id: String,
    pub name: String,
    pub description: Option<String>,
    pub config_key: String,
    pub plan_key: Option<String>,
    pub category: String,
    pub plan_type: PlanValueType,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub has_usage_limit: bool,
    pub default_limit: Option<Limit>,
    pub usage_limit_unit: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    pub active: bool,
}

impl PlatformFeatureRecord {
    /// Creates an active, dependency-free record with no plan key.
    pub fn new(
        feature_id: impl Into<String>,
        config_key: impl Into<String>,
        plan_type: PlanValueType,
    ) -> Self {
        let feature_id = feature_id.into();
        Self {
            name: feature_id.clone(),
            feature_id,
            description: None,
            config_key: config_key.into(),
            plan_key: None,
            category: "general".to_string(),
            plan_type,
            depends_on: Vec::new(),
            has_usage_limit: false,
            default_limit: None,
            usage_limit_unit: None,
            display_order: 0,
            active: true,
        }
    }

    pub fn with_plan_key(mut self, plan_key: impl Into<String>) -> Self {
        self.plan_key = Some(plan_key.into());
        self
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn depends_on<I, S>(mut self, feature_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = feature_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_usage_limit(mut self, default_limit: Option<Limit>, unit: Option<&str>) -> Self {
        self.has_usage_limit = true;
        self.default_limit = default_limit;
        self.usage_limit_unit = unit.map(str::to_string);
        self
    }

    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Where a feature's value is stored inside a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FeatureSlot {
    /// Boolean switch kept in the plan's `features` map.
    #[serde(rename_all = "camelCase")]
    Toggle { plan_key: String },
    /// Numeric cap kept in the plan's `limits` map.
    #[serde(rename_all = "camelCase")]
    Limit {
        plan_key: String,
        default_limit: Option<Limit>,
        unit: Option<String>,
    },
}

impl FeatureSlot {
    pub fn plan_key(&self) -> &str {
        match self {
            FeatureSlot::Toggle { plan_key } | FeatureSlot::Limit { plan_key, .. } => plan_key,
        }
    }
}

/// Catalog feature with its storage slot resolved.
///
/// Built from a [`PlatformFeatureRecord`] when the catalog is loaded, so the
/// features/limits decision is made exactly once.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformFeature {
    pub feature_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub config_key: String,
    pub category: String,
    pub plan_type: PlanValueType,
    pub depends_on: Vec<String>,
    pub has_usage_limit: bool,
    pub display_order: i32,
    /// `None` for informational features without a plan key.
    pub slot: Option<FeatureSlot>,
}

impl PlatformFeature {
    pub fn plan_key(&self) -> Option<&str> {
        self.slot.as_ref().map(FeatureSlot::plan_key)
    }
}

impl From<PlatformFeatureRecord> for PlatformFeature {
    fn from(record: PlatformFeatureRecord) -> Self {
        let is_limit = record.plan_type == PlanValueType::Number || record.has_usage_limit;
        let slot = record.plan_key.map(|plan_key| {
            if is_limit {
                FeatureSlot::Limit {
                    plan_key,
                    default_limit: record.default_limit,
                    unit: record.usage_limit_unit,
                }
            } else {
                FeatureSlot::Toggle { plan_key }
            }
        });

        PlatformFeature {
            feature_id: record.feature_id,
            name: record.name,
            description: record.description,
            config_key: record.config_key,
            category: record.category,
            plan_type: record.plan_type,
            depends_on: record.depends_on,
            has_usage_limit: record.has_usage_limit,
            display_order: record.display_order,
            slot,
        }
    }
}
