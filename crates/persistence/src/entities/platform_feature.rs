//! Platform feature entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Limit, PlanValueType, PlatformFeatureRecord};
use sqlx::FromRow;

use super::EntityConversionError;

/// Database row mapping for the platform_features table.
#[derive(Debug, Clone, FromRow)]
pub struct PlatformFeatureEntity {
    pub feature_id: String,
    pub name: String,
    pub description: Option<String>,
    pub config_key: String,
    pub plan_key: Option<String>,
    pub category: String,
    pub plan_type: String,
    pub depends_on: Vec<String>,
    pub has_usage_limit: bool,
    /// JSONB: a non-negative integer or `"unlimited"`.
    pub default_limit: Option<serde_json::Value>,
    pub usage_limit_unit: Option<String>,
    pub display_order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PlatformFeatureEntity> for PlatformFeatureRecord {
    type Error = EntityConversionError;

    fn try_from(entity: PlatformFeatureEntity) -> Result<Self, Self::Error> {
        let plan_type: PlanValueType = entity
            .plan_type
            .parse()
            .map_err(|e| EntityConversionError::new(&entity.feature_id, "plan_type", e))?;

        let default_limit = entity
            .default_limit
            .map(serde_json::from_value::<Limit>)
            .transpose()
            .map_err(|e| EntityConversionError::new(&entity.feature_id, "default_limit", e))?;

        Ok(Self {
            feature_id: entity.feature_id,
            name: entity.name,
            description: entity.description,
            config_key: entity.config_key,
            plan_key: entity.plan_key.filter(|key| !key.is_empty()),
            category: entity.category,
            plan_type,
            depends_on: entity.depends_on,
            has_usage_limit: entity.has_usage_limit,
            default_limit,
            usage_limit_unit: entity.usage_limit_unit,
            display_order: entity.display_order,
            active: entity.active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entity() -> PlatformFeatureEntity {
        PlatformFeatureEntity {
            feature_id: "whatsapp".to_string(),
            name: "WhatsApp notifications".to_string(),
            description: None,
            config_key: "whatsappEnabled".to_string(),
            plan_key: Some("whatsappMessages".to_string()),
            category: "messaging".to_string(),
            plan_type: "boolean".to_string(),
            depends_on: vec!["messaging".to_string()],
            has_usage_limit: true,
            default_limit: Some(json!(500)),
            usage_limit_unit: Some("messages/month".to_string()),
            display_order: 3,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_entity_to_record() {
        let record = PlatformFeatureRecord::try_from(entity()).unwrap();

        assert_eq!(record.feature_id, "whatsapp");
        assert_eq!(record.plan_type, PlanValueType::Boolean);
        assert_eq!(record.default_limit, Some(Limit::Finite(500)));
        assert_eq!(record.depends_on, vec!["messaging"]);
        assert!(record.has_usage_limit);
    }

    #[test]
    fn test_unlimited_default_limit() {
        let mut row = entity();
        row.default_limit = Some(json!("unlimited"));

        let record = PlatformFeatureRecord::try_from(row).unwrap();
        assert_eq!(record.default_limit, Some(Limit::Unlimited));
    }

    #[test]
    fn test_empty_plan_key_means_none() {
        let mut row = entity();
        row.plan_key = Some(String::new());

        assert_eq!(PlatformFeatureRecord::try_from(row).unwrap().plan_key, None);
    }

    #[test]
    fn test_unknown_plan_type_rejected() {
        let mut row = entity();
        row.plan_type = "percentage".to_string();

        let err = PlatformFeatureRecord::try_from(row).unwrap_err();
        assert_eq!(err.field, "plan_type");
        assert_eq!(err.row, "whatsapp");
    }

    #[test]
    fn test_malformed_default_limit_rejected() {
        let mut row = entity();
        row.default_limit = Some(json!(-3));

        let err = PlatformFeatureRecord::try_from(row).unwrap_err();
        assert_eq!(err.field, "default_limit");
    }
}
