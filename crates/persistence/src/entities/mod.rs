//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod platform_feature;
pub mod subscription_plan;
pub mod system_config;

pub use platform_feature::PlatformFeatureEntity;
pub use subscription_plan::SubscriptionPlanEntity;
pub use system_config::SystemConfigEntity;

use thiserror::Error;

/// A stored row that does not map onto its domain model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field} in row {row}: {message}")]
pub struct EntityConversionError {
    pub row: String,
    pub field: &'static str,
    pub message: String,
}

impl EntityConversionError {
    pub(crate) fn new(row: impl ToString, field: &'static str, message: impl ToString) -> Self {
        Self {
            row: row.to_string(),
            field,
            message: message.to_string(),
        }
    }
}
