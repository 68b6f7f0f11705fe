//! LLM provider abstractions for SkillForge.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider adapters
//! - `BoxLlmProvider`: Object-safe wrapper for dynamic dispatch

pub mod box_provider;
pub mod provider;
