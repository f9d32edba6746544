use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentAdmin;
use crate::api::pagination::{default_limit, PaginatedResponse};
use crate::core::state::AppState;
use crate::core::time::today_utc;
use crate::repositories;
use crate::schemas::stats::{AccessLogResponse, AccessSummaryResponse};
use crate::services::access_stats;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/accesses", get(list_accesses)).route("/summary", get(summary))
}

#[derive(Debug, Deserialize)]
struct ListAccessesQuery {
    #[serde(default)]
    skip: i64,
    #[serde(default = "default_limit")]
    limit: i64,
}

async fn list_accesses(
    CurrentAdmin(_admin): CurrentAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListAccessesQuery>,
) -> Result<Json<PaginatedResponse<AccessLogResponse>>, ApiError> {
    let total_count = repositories::access_logs::count(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to count access logs"))?;

    let entries = repositories::access_logs::list_recent(state.db(), query.skip, query.limit)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load access logs"))?;

    Ok(Json(PaginatedResponse {
        items: entries.into_iter().map(AccessLogResponse::from_db).collect(),
        total_count,
        skip: query.skip,
        limit: query.limit,
    }))
}

async fn summary(
    CurrentAdmin(_admin): CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<AccessSummaryResponse>, ApiError> {
    let entries = repositories::access_logs::list_all(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load access logs"))?;

    let summary = access_stats::summarize(&entries, today_utc());
    Ok(Json(AccessSummaryResponse::from_summary(summary)))
}
