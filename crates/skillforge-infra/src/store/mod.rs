//! In-memory persistence for generated trees and domain popularity.
//!
//! Both stores are process-local and backed by `DashMap`. Values are cloned
//! out on read so no map guard is held across an await point.

pub mod popularity;
pub mod skill_tree;

pub use popularity::InMemoryPopularityCounter;
pub use skill_tree::InMemorySkillTreeRepository;
