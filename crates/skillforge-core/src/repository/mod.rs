//! Repository trait definitions (ports).
//!
//! These traits define the persistence collaborators the HTTP layer hands
//! generated trees to. The infrastructure layer (skillforge-infra)
//! implements them; the generation pipeline never touches storage.

pub mod popularity;
pub mod skill_tree;
