//! Domain popularity handler.

use axum::extract::{Query, State};

use skillforge_core::repository::popularity::PopularityCounter;
use skillforge_types::skill::DomainCount;

use crate::http::error::AppError;
use crate::http::query::PopularDomainsQuery;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/domains/popular?limit
pub async fn popular_domains(
    State(state): State<AppState>,
    Query(query): Query<PopularDomainsQuery>,
) -> Result<ApiResponse<Vec<DomainCount>>, AppError> {
    let top = state.popularity.top(query.limit()).await?;
    Ok(ApiResponse::success(top))
}
