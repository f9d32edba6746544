use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::core::config::AdminSettings;
use crate::core::security;
use crate::db::types::Grade;
use crate::services::credentials::{self, Credential};

const DEV_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("credential for this class already exists")]
    Duplicate,
    #[error("credential not found")]
    NotFound,
    #[error("incorrect current password")]
    WrongPassword,
    #[error("failed to persist credential store: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AdminAccount {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreFile {
    admin: AdminAccount,
    credentials: Vec<Credential>,
}

/// Owns the admin account and the per-class credential set. Loaded from a
/// JSON file on startup, rewritten on every mutation; handlers reach it
/// through AppState instead of touching the file themselves.
#[derive(Clone)]
pub(crate) struct CredentialStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    state: RwLock<StoreFile>,
}

impl CredentialStore {
    /// Reads the backing file. A missing file seeds the defaults (configured
    /// admin + full generated set) and writes them; unparseable content is
    /// logged and replaced with the same defaults.
    pub(crate) async fn load(path: &Path, admin: &AdminSettings) -> Result<Self, StoreError> {
        let state = match tokio::fs::read_to_string(path).await {
            Ok(raw) => match serde_json::from_str::<StoreFile>(&raw) {
                Ok(state) => state,
                Err(err) => {
                    tracing::warn!(error = %err, path = %path.display(), "Credential store is unreadable; regenerating defaults");
                    let state = default_state(admin);
                    persist(path, &state).await?;
                    state
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No credential store found; generating default credential set");
                let state = default_state(admin);
                persist(path, &state).await?;
                state
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self { inner: Arc::new(Inner { path: path.to_path_buf(), state: RwLock::new(state) }) })
    }

    pub(crate) async fn list(&self) -> Vec<Credential> {
        self.inner.state.read().await.credentials.clone()
    }

    pub(crate) async fn list_for_grade(&self, grade: Grade) -> Vec<Credential> {
        self.inner
            .state
            .read()
            .await
            .credentials
            .iter()
            .filter(|cred| cred.grade == grade)
            .cloned()
            .collect()
    }

    pub(crate) async fn count(&self) -> usize {
        self.inner.state.read().await.credentials.len()
    }

    pub(crate) async fn add(&self, credential: Credential) -> Result<(), StoreError> {
        let mut guard = self.inner.state.write().await;
        let exists = guard.credentials.iter().any(|cred| {
            cred.matches(credential.grade, &credential.group, credential.section.as_deref())
        });
        if exists {
            return Err(StoreError::Duplicate);
        }

        let mut next = guard.clone();
        next.credentials.push(credential);
        persist(&self.inner.path, &next).await?;
        *guard = next;
        Ok(())
    }

    pub(crate) async fn update_password(
        &self,
        grade: Grade,
        group: &str,
        section: Option<&str>,
        password: &str,
    ) -> Result<Credential, StoreError> {
        let mut guard = self.inner.state.write().await;
        let mut next = guard.clone();
        let entry = next
            .credentials
            .iter_mut()
            .find(|cred| cred.matches(grade, group, section))
            .ok_or(StoreError::NotFound)?;
        entry.password = password.to_string();
        let updated = entry.clone();

        persist(&self.inner.path, &next).await?;
        *guard = next;
        Ok(updated)
    }

    pub(crate) async fn remove(
        &self,
        grade: Grade,
        group: &str,
        section: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut guard = self.inner.state.write().await;
        let mut next = guard.clone();
        let before = next.credentials.len();
        next.credentials.retain(|cred| !cred.matches(grade, group, section));
        if next.credentials.len() == before {
            return Err(StoreError::NotFound);
        }

        persist(&self.inner.path, &next).await?;
        *guard = next;
        Ok(())
    }

    /// Bulk reset: discards every edit and restores the generated set.
    pub(crate) async fn reset_all(&self) -> Result<usize, StoreError> {
        let mut guard = self.inner.state.write().await;
        let mut next = guard.clone();
        next.credentials = credentials::generate_all();
        let count = next.credentials.len();

        persist(&self.inner.path, &next).await?;
        *guard = next;
        Ok(count)
    }

    pub(crate) async fn admin_username(&self) -> String {
        self.inner.state.read().await.admin.username.clone()
    }

    pub(crate) async fn verify_admin(&self, username: &str, password: &str) -> bool {
        let guard = self.inner.state.read().await;
        guard.admin.username == username && security::passwords_match(password, &guard.admin.password)
    }

    pub(crate) async fn change_admin_password(
        &self,
        current: &str,
        new_password: &str,
    ) -> Result<(), StoreError> {
        let mut guard = self.inner.state.write().await;
        if !security::passwords_match(current, &guard.admin.password) {
            return Err(StoreError::WrongPassword);
        }

        let mut next = guard.clone();
        next.admin.password = new_password.to_string();
        persist(&self.inner.path, &next).await?;
        *guard = next;
        Ok(())
    }
}

fn default_state(admin: &AdminSettings) -> StoreFile {
    let password = if admin.admin_password.is_empty() {
        tracing::warn!("ADMIN_PASSWORD not configured; seeding the development default");
        DEV_ADMIN_PASSWORD.to_string()
    } else {
        admin.admin_password.clone()
    };

    StoreFile {
        admin: AdminAccount { username: admin.admin_username.clone(), password },
        credentials: credentials::generate_all(),
    }
}

async fn persist(path: &Path, state: &StoreFile) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let body = serde_json::to_vec_pretty(state).map_err(std::io::Error::other)?;
    tokio::fs::write(path, body).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_admin() -> AdminSettings {
        AdminSettings { admin_username: "admin".to_string(), admin_password: "s3cret".to_string() }
    }

    fn temp_store_path() -> PathBuf {
        std::env::temp_dir().join(format!("cartable-store-{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn missing_file_seeds_defaults() {
        let path = temp_store_path();
        let store = CredentialStore::load(&path, &test_admin()).await.expect("load");

        assert_eq!(store.count().await, 270);
        assert!(store.verify_admin("admin", "s3cret").await);
        assert!(!store.verify_admin("admin", "wrong").await);
        assert!(path.exists());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn corrupt_file_is_replaced_with_defaults() {
        let path = temp_store_path();
        std::fs::write(&path, "{not json").expect("write corrupt file");

        let store = CredentialStore::load(&path, &test_admin()).await.expect("load");
        assert_eq!(store.count().await, 270);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn mutations_survive_a_reload() {
        let path = temp_store_path();
        let admin = test_admin();

        {
            let store = CredentialStore::load(&path, &admin).await.expect("load");
            store
                .update_password(Grade::PrimaryOne, "1", None, "nouveau")
                .await
                .expect("update");
            store.remove(Grade::PrimaryOne, "2", None).await.expect("remove");
        }

        let reloaded = CredentialStore::load(&path, &admin).await.expect("reload");
        assert_eq!(reloaded.count().await, 269);
        let first = reloaded
            .list_for_grade(Grade::PrimaryOne)
            .await
            .into_iter()
            .find(|cred| cred.group == "1")
            .expect("credential");
        assert_eq!(first.password, "nouveau");

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn duplicate_add_is_rejected() {
        let path = temp_store_path();
        let store = CredentialStore::load(&path, &test_admin()).await.expect("load");

        let duplicate = Credential {
            grade: Grade::PrimaryOne,
            group: "1".to_string(),
            section: None,
            password: "whatever".to_string(),
        };
        assert!(matches!(store.add(duplicate).await, Err(StoreError::Duplicate)));
        assert_eq!(store.count().await, 270);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_tuple_is_not_found() {
        let path = temp_store_path();
        let store = CredentialStore::load(&path, &test_admin()).await.expect("load");

        let result = store.update_password(Grade::PrimaryOne, "1", Some("Lettres"), "x").await;
        assert!(matches!(result, Err(StoreError::NotFound)));
        let result = store.remove(Grade::Baccalaureat, "11", None).await;
        assert!(matches!(result, Err(StoreError::NotFound)));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn reset_restores_the_generated_set() {
        let path = temp_store_path();
        let store = CredentialStore::load(&path, &test_admin()).await.expect("load");

        store.remove(Grade::PrimaryOne, "1", None).await.expect("remove");
        store.remove(Grade::PrimaryOne, "2", None).await.expect("remove");
        assert_eq!(store.count().await, 268);

        let count = store.reset_all().await.expect("reset");
        assert_eq!(count, 270);
        assert_eq!(store.list().await, credentials::generate_all());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn admin_password_change_requires_current() {
        let path = temp_store_path();
        let store = CredentialStore::load(&path, &test_admin()).await.expect("load");

        let result = store.change_admin_password("wrong", "next").await;
        assert!(matches!(result, Err(StoreError::WrongPassword)));
        assert!(store.verify_admin("admin", "s3cret").await);

        store.change_admin_password("s3cret", "next").await.expect("change");
        assert!(store.verify_admin("admin", "next").await);
        assert!(!store.verify_admin("admin", "s3cret").await);

        let _ = std::fs::remove_file(&path);
    }
}
