//! HTTP route handlers.

pub mod health;
pub mod plan_editor;
pub mod subscription_plans;
