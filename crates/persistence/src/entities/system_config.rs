//! System configuration entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::SystemConfig;
use sqlx::FromRow;

/// Database row mapping for the system_config table.
#[derive(Debug, Clone, FromRow)]
pub struct SystemConfigEntity {
    pub id: String,
    /// JSONB object of `configKey -> bool` flags.
    pub features: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl From<SystemConfigEntity> for SystemConfig {
    fn from(entity: SystemConfigEntity) -> Self {
        SystemConfig::from_json_flags(&entity.features)
    }
}
