use std::sync::Arc;

use sqlx::PgPool;

use crate::core::config::Settings;
use crate::services::credential_store::CredentialStore;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    db: PgPool,
    credentials: CredentialStore,
}

impl AppState {
    pub(crate) fn new(settings: Settings, db: PgPool, credentials: CredentialStore) -> Self {
        Self { inner: Arc::new(InnerState { settings, db, credentials }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn db(&self) -> &PgPool {
        &self.inner.db
    }

    pub(crate) fn credentials(&self) -> &CredentialStore {
        &self.inner.credentials
    }
}
