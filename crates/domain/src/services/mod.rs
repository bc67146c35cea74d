//! Domain services for the plan console.
//!
//! Catalog loading, feature resolution and grouping, draft editing and
//! validation, and the plan persistence gateway contract.

pub mod catalog_loader;
pub mod category_grouping;
pub mod feature_resolution;
pub mod feature_value;
pub mod plan_editor;
pub mod plan_store;
pub mod plan_validation;

pub use catalog_loader::{
    load_catalog, load_catalog_or_empty, FeatureCatalogSource, LoadError, StaticCatalogSource,
};

pub use category_grouping::{category_label, group_by_category, to_category_responses};

pub use feature_resolution::{
    block_reason, is_assignable, resolve, resolve_assignable, BlockReason, BlockedFeature,
    Resolution,
};

pub use feature_value::{get_feature_value, set_feature_value, FeatureValueError};

pub use plan_editor::{DraftEditError, PlanEditorSession, SubmitError, SubmitOutcome};

pub use plan_store::{InMemoryPlanStore, PersistenceError, PlanStore};

pub use plan_validation::{
    base_pricing_field, validate_plan_draft, PlanValidationErrors, DISPLAY_NAME_FIELD, NAME_FIELD,
};
