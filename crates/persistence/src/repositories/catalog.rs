//! Postgres-backed feature catalog source.

use domain::models::{PlatformFeatureRecord, SystemConfig};
use domain::services::{FeatureCatalogSource, LoadError};
use sqlx::PgPool;

use super::{PlatformFeatureRepository, SystemConfigRepository};

/// Loads the catalog from platform_features and one system_config row.
#[derive(Clone)]
pub struct PgCatalogSource {
    features: PlatformFeatureRepository,
    system_config: SystemConfigRepository,
    system_config_id: String,
}

impl PgCatalogSource {
    pub fn new(pool: PgPool, system_config_id: impl Into<String>) -> Self {
        Self {
            features: PlatformFeatureRepository::new(pool.clone()),
            system_config: SystemConfigRepository::new(pool),
            system_config_id: system_config_id.into(),
        }
    }
}

#[async_trait::async_trait]
impl FeatureCatalogSource for PgCatalogSource {
    async fn active_features(&self) -> Result<Vec<PlatformFeatureRecord>, LoadError> {
        let rows = self
            .features
            .list_active()
            .await
            .map_err(|e| LoadError::Features(e.to_string()))?;

        // A malformed row hides that one feature instead of the whole catalog.
        let records = rows
            .into_iter()
            .filter_map(|row| match PlatformFeatureRecord::try_from(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed platform feature row");
                    None
                }
            })
            .collect();

        Ok(records)
    }

    async fn system_config(&self) -> Result<SystemConfig, LoadError> {
        let row = self
            .system_config
            .find_by_id(&self.system_config_id)
            .await
            .map_err(|e| LoadError::SystemConfig(e.to_string()))?;

        match row {
            Some(entity) => Ok(entity.into()),
            None => {
                tracing::warn!(
                    system_config_id = %self.system_config_id,
                    "System config document missing, treating every flag as enabled"
                );
                Ok(SystemConfig::default())
            }
        }
    }
}
