//! Domain layer for the plan console backend.
//!
//! This crate contains:
//! - Domain models (PlatformFeature, SystemConfig, SubscriptionPlan, Limit)
//! - The plan feature/limit configuration engine (resolution, grouping,
//!   value access, validation)
//! - Store traits for the feature catalog and subscription plans

pub mod models;
pub mod services;
