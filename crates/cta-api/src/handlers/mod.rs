//! HTTP handlers for cta-api.

pub mod analyze;
pub mod health;
