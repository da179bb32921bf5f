//! Cross-cutting plumbing shared by AutoPM services: env config helpers, health
//! health checks, request ids, serde helpers and tracing setup.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
