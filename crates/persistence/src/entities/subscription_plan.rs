//! Subscription plan entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::SubscriptionPlan;
use sqlx::FromRow;
use uuid::Uuid;

use super::EntityConversionError;

/// Database row mapping for the subscription_plans table.
///
/// `pricing`, `features` and `limits` are JSONB documents.
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionPlanEntity {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub pricing: serde_json::Value,
    pub features: serde_json::Value,
    pub limits: serde_json::Value,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

fn decode<T: serde::de::DeserializeOwned>(
    id: Uuid,
    field: &'static str,
    value: serde_json::Value,
) -> Result<T, EntityConversionError> {
    serde_json::from_value(value).map_err(|e| EntityConversionError::new(id, field, e))
}

impl TryFrom<SubscriptionPlanEntity> for SubscriptionPlan {
    type Error = EntityConversionError;

    fn try_from(entity: SubscriptionPlanEntity) -> Result<Self, Self::Error> {
        Ok(Self {
            pricing: decode(entity.id, "pricing", entity.pricing)?,
            features: decode(entity.id, "features", entity.features)?,
            limits: decode(entity.id, "limits", entity.limits)?,
            id: entity.id,
            name: entity.name,
            display_name: entity.display_name,
            description: entity.description,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            updated_by: entity.updated_by,
        })
    }
}
