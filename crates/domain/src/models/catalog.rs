//! Loaded feature catalog snapshot and its editor-facing response shapes.

use serde::Serialize;

use super::platform_feature::PlatformFeature;
use super::system_config::SystemConfig;
use crate::services::feature_resolution::BlockedFeature;

/// Immutable view of the feature catalog and global flags for one session.
///
/// Passed explicitly to the resolver, grouper and accessor; never held as
/// ambient state.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    features: Vec<PlatformFeature>,
    flags: SystemConfig,
    available: bool,
}

impl CatalogSnapshot {
    pub fn new(features: Vec<PlatformFeature>, flags: SystemConfig) -> Self {
        Self {
            features,
            flags,
            available: true,
        }
    }

    /// Snapshot used when the catalog could not be loaded: nothing is assignable.
    pub fn unavailable() -> Self {
        Self {
            features: Vec::new(),
            flags: SystemConfig::default(),
            available: false,
        }
    }

    pub fn features(&self) -> &[PlatformFeature] {
        &self.features
    }

    pub fn flags(&self) -> &SystemConfig {
        &self.flags
    }

    /// False when this snapshot stands in for a failed load.
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn find(&self, feature_id: &str) -> Option<&PlatformFeature> {
        self.features.iter().find(|f| f.feature_id == feature_id)
    }
}

/// One category of assignable features, in display order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCategoryResponse {
    pub category: String,
    pub label: String,
    pub features: Vec<PlatformFeature>,
}

/// Catalog view for the plan editor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub catalog_available: bool,
    pub categories: Vec<FeatureCategoryResponse>,
    pub blocked: Vec<BlockedFeature>,
}
