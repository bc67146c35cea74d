//! Domain models for the plan console.

pub mod catalog;
pub mod limit;
pub mod platform_feature;
pub mod subscription_plan;
pub mod system_config;

pub use catalog::{CatalogResponse, CatalogSnapshot, FeatureCategoryResponse};
pub use limit::Limit;
pub use platform_feature::{FeatureSlot, PlanValueType, PlatformFeature, PlatformFeatureRecord};
pub use subscription_plan::{
    CreatePlanRequest, CreatePlanResponse, FeatureValue, FeatureValueInput, ListPlansResponse,
    PlanDraft, PlanUpdate, PriceRecord, SubscriptionPlan, UpdatePlanRequest, BASE_CURRENCY,
};
pub use system_config::SystemConfig;
