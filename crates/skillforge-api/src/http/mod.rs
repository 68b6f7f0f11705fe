//! HTTP/REST API layer for SkillForge.
//!
//! Axum-based REST API at `/api/v1/` with a `{success, data}` envelope,
//! CORS and request tracing.

pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
