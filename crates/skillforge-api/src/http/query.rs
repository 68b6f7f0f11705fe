//! Query parameter extractors for list endpoints.

use serde::Deserialize;

/// Upper bound on page size for every list endpoint.
pub const MAX_LIMIT: usize = 100;

/// Query parameters for the skill tree list endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct SkillTreeListQuery {
    /// 1-based page number.
    pub page: Option<usize>,
    /// Page size (default 10).
    pub limit: Option<usize>,
    /// Case-insensitive substring filter on the domain.
    pub search: Option<String>,
}

impl SkillTreeListQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(10).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> usize {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

/// Query parameters for the popular domains endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct PopularDomainsQuery {
    pub limit: Option<usize>,
}

impl PopularDomainsQuery {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(10).clamp(1, MAX_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query = SkillTreeListQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_list_query_offset_and_clamping() {
        let query = SkillTreeListQuery {
            page: Some(3),
            limit: Some(20),
            search: None,
        };
        assert_eq!(query.offset(), 40);

        let query = SkillTreeListQuery {
            page: Some(0),
            limit: Some(10_000),
            search: None,
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), MAX_LIMIT);
    }
}
