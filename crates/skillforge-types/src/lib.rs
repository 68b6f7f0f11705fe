//! Shared domain types for SkillForge.
//!
//! This crate contains the core domain types used across the SkillForge
//! service: skill trees, provider request/response shapes, configuration,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod llm;
pub mod skill;
