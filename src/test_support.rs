use std::sync::{Arc, OnceLock};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::core::{config::Settings, security, state::AppState};
use crate::services::credential_store::CredentialStore;

const TEST_SECRET_KEY: &str = "test-secret";

pub(crate) async fn env_lock() -> OwnedMutexGuard<()> {
    static LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();
    let lock = LOCK.get_or_init(|| Arc::new(Mutex::new(()))).clone();
    lock.lock_owned().await
}

pub(crate) fn set_test_env() {
    std::env::set_var("CARTABLE_ENV", "test");
    std::env::set_var("CARTABLE_STRICT_CONFIG", "0");
    std::env::set_var("SECRET_KEY", TEST_SECRET_KEY);
    std::env::remove_var("DATABASE_URL");
    std::env::remove_var("CREDENTIALS_PATH");
    std::env::remove_var("ADMIN_USERNAME");
    std::env::remove_var("ADMIN_PASSWORD");
    std::env::set_var("PROMETHEUS_ENABLED", "0");
}

/// Builds an [`AppState`] backed by a lazy pool (no live database needed
/// until a handler actually queries it) and a throwaway credential file.
pub(crate) async fn build_state(settings: Settings) -> AppState {
    let db = sqlx::PgPool::connect_lazy(&settings.database().database_url()).expect("lazy pool");
    let path = std::env::temp_dir().join(format!("cartable-test-{}.json", Uuid::new_v4()));
    let credentials = CredentialStore::load(&path, settings.admin()).await.expect("store");
    AppState::new(settings, db, credentials)
}

pub(crate) fn bearer_token(username: &str, settings: &Settings) -> String {
    security::create_access_token(username, settings, None).expect("token")
}

pub(crate) fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    if let Some(body) = body {
        let bytes = serde_json::to_vec(&body).expect("serialize body");
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .expect("request body")
    } else {
        builder.body(Body::empty()).expect("request body")
    }
}

pub(crate) async fn read_json(response: axum::response::Response<Body>) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("response body");
    serde_json::from_slice(&body).unwrap_or_else(|err| {
        let body_text = String::from_utf8_lossy(&body);
        panic!("json parse: {err}; body: {body_text}");
    })
}
