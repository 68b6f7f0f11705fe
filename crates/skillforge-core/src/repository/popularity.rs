//! Domain popularity counter trait definition.

use skillforge_types::error::RepositoryError;
use skillforge_types::skill::DomainCount;

/// Counts how often each domain has been generated.
///
/// Implementations live in skillforge-infra (e.g., `InMemoryPopularityCounter`).
pub trait PopularityCounter: Send + Sync {
    /// Record one generation for `domain`. Returns the new count.
    fn increment(
        &self,
        domain: &str,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// The `limit` most generated domains, highest count first.
    fn top(
        &self,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<DomainCount>, RepositoryError>> + Send;
}
