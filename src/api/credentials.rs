use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentAdmin;
use crate::api::validation::validate_classification;
use crate::core::state::AppState;
use crate::schemas::credential::{
    CredentialCreate, CredentialKey, CredentialResponse, CredentialUpdate, ListCredentialsQuery,
    ResetResponse,
};
use crate::services::credentials::Credential;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create).get(list).put(update).delete(remove))
        .route("/reset", post(reset))
}

async fn list(
    CurrentAdmin(_admin): CurrentAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListCredentialsQuery>,
) -> Json<Vec<CredentialResponse>> {
    let credentials = match query.grade {
        Some(grade) => state.credentials().list_for_grade(grade).await,
        None => state.credentials().list().await,
    };

    Json(credentials.into_iter().map(CredentialResponse::from_store).collect())
}

async fn create(
    CurrentAdmin(_admin): CurrentAdmin,
    State(state): State<AppState>,
    Json(payload): Json<CredentialCreate>,
) -> Result<(StatusCode, Json<CredentialResponse>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;
    validate_classification(payload.grade, &payload.group, payload.section.as_deref())?;

    let credential = Credential {
        grade: payload.grade,
        group: payload.group,
        section: payload.section,
        password: payload.password,
    };
    state.credentials().add(credential.clone()).await?;

    Ok((StatusCode::CREATED, Json(CredentialResponse::from_store(credential))))
}

async fn update(
    CurrentAdmin(_admin): CurrentAdmin,
    State(state): State<AppState>,
    Json(payload): Json<CredentialUpdate>,
) -> Result<Json<CredentialResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let updated = state
        .credentials()
        .update_password(payload.grade, &payload.group, payload.section.as_deref(), &payload.password)
        .await?;

    Ok(Json(CredentialResponse::from_store(updated)))
}

async fn remove(
    CurrentAdmin(_admin): CurrentAdmin,
    State(state): State<AppState>,
    Json(payload): Json<CredentialKey>,
) -> Result<StatusCode, ApiError> {
    state
        .credentials()
        .remove(payload.grade, &payload.group, payload.section.as_deref())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn reset(
    CurrentAdmin(_admin): CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<ResetResponse>, ApiError> {
    let generated = state.credentials().reset_all().await?;
    Ok(Json(ResetResponse { generated }))
}
