//! In-memory skill tree repository.

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use skillforge_core::repository::skill_tree::{SkillTreeFilter, SkillTreePage, SkillTreeRepository};
use skillforge_types::error::RepositoryError;
use skillforge_types::skill::{SkillLevel, SkillNode, StoredSkillTree};

/// Trees kept by [`InMemorySkillTreeRepository::new`].
pub const DEFAULT_CAPACITY: usize = 1000;

/// `DashMap`-backed implementation of `SkillTreeRepository`.
///
/// Process-local and lost on restart. Holds at most `capacity` trees; saving
/// past that evicts the oldest.
#[derive(Debug)]
pub struct InMemorySkillTreeRepository {
    trees: DashMap<Uuid, StoredSkillTree>,
    capacity: usize,
}

impl Default for InMemorySkillTreeRepository {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl InMemorySkillTreeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository holding at most `capacity` trees (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            trees: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    // v7 ids sort by creation time, so the smallest key is the oldest tree.
    fn evict_oldest(&self) {
        while self.trees.len() > self.capacity {
            let Some(oldest) = self.trees.iter().map(|entry| *entry.key()).min() else {
                break;
            };
            self.trees.remove(&oldest);
            tracing::debug!(id = %oldest, "evicted oldest skill tree");
        }
    }
}

impl SkillTreeRepository for InMemorySkillTreeRepository {
    async fn save(
        &self,
        domain: &str,
        level: SkillLevel,
        tree: &SkillNode,
    ) -> Result<StoredSkillTree, RepositoryError> {
        let record = StoredSkillTree {
            id: Uuid::now_v7(),
            domain: domain.to_string(),
            level,
            tree: tree.clone(),
            created_at: Utc::now(),
        };

        self.trees.insert(record.id, record.clone());
        self.evict_oldest();

        tracing::debug!(id = %record.id, domain = %record.domain, "stored skill tree");
        Ok(record)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<StoredSkillTree>, RepositoryError> {
        Ok(self.trees.get(id).map(|entry| entry.value().clone()))
    }

    async fn list(&self, filter: &SkillTreeFilter) -> Result<SkillTreePage, RepositoryError> {
        let needle = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut matching: Vec<StoredSkillTree> = self
            .trees
            .iter()
            .filter(|entry| match &needle {
                Some(needle) => entry.domain.to_lowercase().contains(needle),
                None => true,
            })
            .map(|entry| entry.value().clone())
            .collect();

        // v7 ids are time-ordered; they break ties within the same instant.
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect();

        Ok(SkillTreePage { items, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(name: &str) -> SkillNode {
        SkillNode::new(name, "d")
    }

    fn filter(search: Option<&str>, limit: usize, offset: usize) -> SkillTreeFilter {
        SkillTreeFilter {
            search: search.map(str::to_string),
            limit,
            offset,
        }
    }

    #[tokio::test]
    async fn save_and_get() {
        let repo = InMemorySkillTreeRepository::new();
        let stored = repo
            .save("前端开发", SkillLevel::Beginner, &tree("前端开发"))
            .await
            .unwrap();

        let fetched = repo.get(&stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.domain, "前端开发");
        assert_eq!(fetched.level, SkillLevel::Beginner);
        assert_eq!(fetched.tree, stored.tree);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn get_unknown_id_returns_none() {
        let repo = InMemorySkillTreeRepository::new();
        assert!(repo.get(&Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_newest_first_with_pagination() {
        let repo = InMemorySkillTreeRepository::new();
        for domain in ["a", "b", "c"] {
            repo.save(domain, SkillLevel::Beginner, &tree(domain))
                .await
                .unwrap();
        }

        let page = repo.list(&filter(None, 2, 0)).await.unwrap();
        assert_eq!(page.total, 3);
        let domains: Vec<_> = page.items.iter().map(|t| t.domain.as_str()).collect();
        assert_eq!(domains, ["c", "b"]);

        let page = repo.list(&filter(None, 2, 2)).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].domain, "a");
    }

    #[tokio::test]
    async fn list_search_is_case_insensitive() {
        let repo = InMemorySkillTreeRepository::new();
        repo.save("Rust Programming", SkillLevel::Advanced, &tree("r"))
            .await
            .unwrap();
        repo.save("Go", SkillLevel::Beginner, &tree("g"))
            .await
            .unwrap();

        let page = repo.list(&filter(Some("rust"), 10, 0)).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].domain, "Rust Programming");

        let page = repo.list(&filter(Some("   "), 10, 0)).await.unwrap();
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn save_past_capacity_evicts_oldest() {
        let repo = InMemorySkillTreeRepository::with_capacity(2);
        let first = repo
            .save("a", SkillLevel::Beginner, &tree("a"))
            .await
            .unwrap();
        for domain in ["b", "c"] {
            repo.save(domain, SkillLevel::Beginner, &tree(domain))
                .await
                .unwrap();
        }

        assert_eq!(repo.len(), 2);
        assert!(repo.get(&first.id).await.unwrap().is_none());
        let page = repo.list(&filter(None, 10, 0)).await.unwrap();
        let domains: Vec<_> = page.items.iter().map(|t| t.domain.as_str()).collect();
        assert_eq!(domains, ["c", "b"]);
    }
}
