//! Feature catalog loading.
//!
//! Fetches the active feature definitions and the global flag map from a
//! [`FeatureCatalogSource`] and builds an immutable [`CatalogSnapshot`].

use thiserror::Error;

use crate::models::{CatalogSnapshot, PlatformFeature, PlatformFeatureRecord, SystemConfig};

/// Error raised when the catalog or flag map cannot be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Failed to load platform features: {0}")]
    Features(String),

    #[error("Failed to load system config: {0}")]
    SystemConfig(String),
}

/// Backing store for feature definitions and global flags.
#[async_trait::async_trait]
pub trait FeatureCatalogSource: Send + Sync {
    /// All feature definitions with `active = true`, in any order.
    async fn active_features(&self) -> Result<Vec<PlatformFeatureRecord>, LoadError>;

    /// Current global flag map. A missing document yields the default (empty) map.
    async fn system_config(&self) -> Result<SystemConfig, LoadError>;
}

/// Fetches features and flags concurrently and waits for both.
pub async fn load_catalog(source: &dyn FeatureCatalogSource) -> Result<CatalogSnapshot, LoadError> {
    let (features, flags) = tokio::join!(source.active_features(), source.system_config());
    let (features, flags) = (features?, flags?);

    let features: Vec<PlatformFeature> = features
        .into_iter()
        .filter(|record| record.active)
        .map(PlatformFeature::from)
        .collect();

    tracing::debug!(
        features = features.len(),
        flags = flags.features.len(),
        "Feature catalog loaded"
    );

    Ok(CatalogSnapshot::new(features, flags))
}

/// Like [`load_catalog`], but degrades to an unavailable (empty) snapshot.
pub async fn load_catalog_or_empty(source: &dyn FeatureCatalogSource) -> CatalogSnapshot {
    match load_catalog(source).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(error = %e, "Feature catalog unavailable, no features assignable");
            CatalogSnapshot::unavailable()
        }
    }
}

/// In-memory catalog source for development and testing.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    pub features: Vec<PlatformFeatureRecord>,
    pub flags: SystemConfig,
    /// Whether to simulate an unreachable store.
    pub simulate_failure: bool,
}

impl StaticCatalogSource {
    pub fn new(features: Vec<PlatformFeatureRecord>, flags: SystemConfig) -> Self {
        Self {
            features,
            flags,
            simulate_failure: false,
        }
    }

    /// Create a source whose fetches always fail.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl FeatureCatalogSource for StaticCatalogSource {
    async fn active_features(&self) -> Result<Vec<PlatformFeatureRecord>, LoadError> {
        if self.simulate_failure {
            return Err(LoadError::Features("Simulated failure".to_string()));
        }
        Ok(self.features.iter().filter(|f| f.active).cloned().collect())
    }

    async fn system_config(&self) -> Result<SystemConfig, LoadError> {
        if self.simulate_failure {
            return Err(LoadError::SystemConfig("Simulated failure".to_string()));
        }
        Ok(self.flags.clone())
    }
}
