use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentAdmin;
use crate::core::security;
use crate::core::state::AppState;
use crate::schemas::auth::{LoginRequest, MeResponse, PasswordChange, TokenResponse};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/password", post(change_password))
        .route("/me", get(me))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let verified = state.credentials().verify_admin(&payload.username, &payload.password).await;
    if !verified {
        return Err(ApiError::Unauthorized("Incorrect username or password"));
    }

    let token = security::create_access_token(&payload.username, state.settings(), None)
        .map_err(|e| ApiError::internal(e, "Failed to create access token"))?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        username: payload.username,
    }))
}

async fn change_password(
    CurrentAdmin(_username): CurrentAdmin,
    State(state): State<AppState>,
    Json(payload): Json<PasswordChange>,
) -> Result<Json<MeResponse>, ApiError> {
    if payload.new_password.is_empty() {
        return Err(ApiError::BadRequest("New password must not be empty".to_string()));
    }
    if payload.new_password != payload.confirm_password {
        return Err(ApiError::BadRequest("Passwords do not match".to_string()));
    }

    state
        .credentials()
        .change_admin_password(&payload.current_password, &payload.new_password)
        .await?;

    Ok(Json(MeResponse { username: state.credentials().admin_username().await }))
}

async fn me(CurrentAdmin(username): CurrentAdmin) -> Json<MeResponse> {
    Json(MeResponse { username })
}
