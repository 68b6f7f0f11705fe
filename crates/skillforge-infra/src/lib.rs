//! Infrastructure layer for SkillForge.
//!
//! Contains the concrete collaborators behind the ports defined in
//! `skillforge-core`: LLM provider adapters, the TOML configuration loader,
//! and in-memory stores for generated trees and domain popularity.

pub mod config;
pub mod llm;
pub mod store;
