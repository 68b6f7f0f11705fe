//! Skill tree repository trait definition.

use uuid::Uuid;

use skillforge_types::error::RepositoryError;
use skillforge_types::skill::{SkillLevel, SkillNode, StoredSkillTree};

/// Filter criteria for listing stored trees.
#[derive(Debug, Clone, Default)]
pub struct SkillTreeFilter {
    /// Case-insensitive substring match on the domain.
    pub search: Option<String>,
    /// Maximum number of results.
    pub limit: usize,
    /// Number of results to skip (offset pagination).
    pub offset: usize,
}

/// One page of stored trees, newest first.
#[derive(Debug, Clone)]
pub struct SkillTreePage {
    pub items: Vec<StoredSkillTree>,
    /// Number of trees matching the filter across all pages.
    pub total: usize,
}

/// Repository trait for generated tree persistence.
///
/// Implementations live in skillforge-infra (e.g., `InMemorySkillTreeRepository`).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait SkillTreeRepository: Send + Sync {
    /// Store a generated tree. Returns the stored record.
    fn save(
        &self,
        domain: &str,
        level: SkillLevel,
        tree: &SkillNode,
    ) -> impl std::future::Future<Output = Result<StoredSkillTree, RepositoryError>> + Send;

    /// Get a stored tree by its record id.
    fn get(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<StoredSkillTree>, RepositoryError>> + Send;

    /// List stored trees with optional search and pagination.
    fn list(
        &self,
        filter: &SkillTreeFilter,
    ) -> impl std::future::Future<Output = Result<SkillTreePage, RepositoryError>> + Send;
}
