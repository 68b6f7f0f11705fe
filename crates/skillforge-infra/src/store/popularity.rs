//! In-memory domain popularity counter.

use dashmap::DashMap;

use skillforge_core::repository::popularity::PopularityCounter;
use skillforge_types::error::RepositoryError;
use skillforge_types::skill::DomainCount;

/// `DashMap`-backed implementation of `PopularityCounter`.
///
/// Domains are counted by their trimmed spelling; case is preserved.
#[derive(Debug, Default)]
pub struct InMemoryPopularityCounter {
    counts: DashMap<String, u64>,
}

impl InMemoryPopularityCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PopularityCounter for InMemoryPopularityCounter {
    async fn increment(&self, domain: &str) -> Result<u64, RepositoryError> {
        let mut entry = self.counts.entry(domain.trim().to_string()).or_insert(0);
        *entry += 1;
        Ok(*entry)
    }

    async fn top(&self, limit: usize) -> Result<Vec<DomainCount>, RepositoryError> {
        let mut counts: Vec<DomainCount> = self
            .counts
            .iter()
            .map(|entry| DomainCount {
                domain: entry.key().clone(),
                count: *entry.value(),
            })
            .collect();

        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.domain.cmp(&b.domain)));
        counts.truncate(limit);
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn increment_returns_running_count() {
        let counter = InMemoryPopularityCounter::new();
        assert_eq!(counter.increment("Rust").await.unwrap(), 1);
        assert_eq!(counter.increment(" Rust ").await.unwrap(), 2);
        assert_eq!(counter.increment("Go").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn top_orders_by_count_then_name() {
        let counter = InMemoryPopularityCounter::new();
        for domain in ["后端开发", "前端开发", "前端开发", "AI", "Go"] {
            counter.increment(domain).await.unwrap();
        }

        let top = counter.top(3).await.unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0], DomainCount { domain: "前端开发".into(), count: 2 });
        assert_eq!(top[1].domain, "AI");
        assert_eq!(top[2].domain, "Go");
    }

    #[tokio::test]
    async fn top_on_empty_counter() {
        let counter = InMemoryPopularityCounter::new();
        assert!(counter.top(10).await.unwrap().is_empty());
    }
}
