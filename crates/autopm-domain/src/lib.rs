//! Domain types shared across AutoPM services.
//!
//! This crate contains only pure types with no framework dependencies.

pub mod id;
pub mod link;
