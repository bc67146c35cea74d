//! Shared utilities and common types for the plan console backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Admin access token validation (JWT)
//! - Common validation logic

pub mod jwt;
pub mod validation;
