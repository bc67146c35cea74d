//! Repository implementations for database operations.

pub mod catalog;
pub mod platform_feature;
pub mod subscription_plan;
pub mod system_config;

pub use catalog::PgCatalogSource;
pub use platform_feature::PlatformFeatureRepository;
pub use subscription_plan::SubscriptionPlanRepository;
pub use system_config::SystemConfigRepository;
