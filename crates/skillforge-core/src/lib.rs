//! Skill tree generation pipeline and repository trait definitions for SkillForge.
//!
//! This crate owns the pipeline (prompt, provider call, extraction,
//! validation, fallback, id rewriting) and defines the "ports" (provider and
//! repository traits) that the infrastructure layer implements. It depends
//! on `skillforge-types` and the attribute names in `skillforge-observe`,
//! never on `skillforge-infra` or any HTTP or storage crate.

pub mod generation;
pub mod llm;
pub mod repository;
