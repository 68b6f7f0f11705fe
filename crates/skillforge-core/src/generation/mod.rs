//! Skill tree generation pipeline.
//!
//! - `prompt`: deterministic prompt text for a domain and level
//! - `extractor`: isolate the JSON object in raw provider text
//! - `validator`: strict schema check producing a typed tree
//! - `fallback`: always-valid two-branch tree
//! - `ids`: hierarchical, tree-unique node ids
//! - `orchestrator`: `SkillTreeGenerator`, which ties the stages together

pub mod extractor;
pub mod fallback;
pub mod ids;
pub mod orchestrator;
pub mod prompt;
pub mod validator;

pub use orchestrator::{FailureStage, GeneratedTree, SkillTreeGenerator, TreeOrigin};
