//! Skill tree generation and lookup handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use skillforge_core::repository::popularity::PopularityCounter;
use skillforge_core::repository::skill_tree::{SkillTreeFilter, SkillTreeRepository};
use skillforge_types::skill::{SkillLevel, SkillNode, StoredSkillTree};

use crate::http::error::AppError;
use crate::http::query::SkillTreeListQuery;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Body of `POST /api/v1/skill-trees/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// One page of stored trees.
#[derive(Debug, Serialize)]
pub struct SkillTreeList {
    pub trees: Vec<StoredSkillTree>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

/// POST /api/v1/skill-trees/generate
///
/// Always answers with a valid tree for a non-blank domain; provider
/// failures surface as the fallback tree. Storing the tree and counting the
/// domain are best effort.
pub async fn generate_skill_tree(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<ApiResponse<SkillNode>, AppError> {
    let domain = body.domain.as_deref().map(str::trim).unwrap_or_default();
    if domain.is_empty() {
        return Err(AppError::Validation("Domain is required".to_string()));
    }

    let level = match body.level.as_deref() {
        Some(raw) if !raw.trim().is_empty() => {
            raw.parse::<SkillLevel>().map_err(AppError::Validation)?
        }
        _ => SkillLevel::default(),
    };

    let generated = state
        .generator
        .generate_detailed(domain, level, body.language.as_deref())
        .await?;

    if generated.is_fallback() {
        tracing::info!(domain, origin = ?generated.origin, "Serving fallback skill tree");
    }

    if let Err(e) = state.trees.save(domain, level, &generated.tree).await {
        tracing::warn!(domain, error = %e, "Failed to store generated skill tree");
    }
    if let Err(e) = state.popularity.increment(domain).await {
        tracing::warn!(domain, error = %e, "Failed to record domain popularity");
    }

    Ok(ApiResponse::success(generated.tree))
}

/// GET /api/v1/skill-trees?page&limit&search
pub async fn list_skill_trees(
    State(state): State<AppState>,
    Query(query): Query<SkillTreeListQuery>,
) -> Result<ApiResponse<SkillTreeList>, AppError> {
    let filter = SkillTreeFilter {
        search: query.search.clone(),
        limit: query.limit(),
        offset: query.offset(),
    };

    let page = state.trees.list(&filter).await?;

    Ok(ApiResponse::success(SkillTreeList {
        trees: page.items,
        total: page.total,
        page: query.page(),
        limit: query.limit(),
    }))
}

/// GET /api/v1/skill-trees/{id}
pub async fn get_skill_tree(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<StoredSkillTree>, AppError> {
    let not_found = || AppError::NotFound("Skill tree not found".to_string());

    let id: Uuid = id.parse().map_err(|_| not_found())?;
    let tree = state.trees.get(&id).await?.ok_or_else(not_found)?;

    Ok(ApiResponse::success(tree))
}
