//! Plan console admin API.
//!
//! Serves the plan editor catalog and the subscription plan CRUD surface
//! used by platform administrators.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
