use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::types::Grade;
use crate::services::credentials::Credential;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CredentialCreate {
    pub(crate) grade: Grade,
    pub(crate) group: String,
    #[serde(default)]
    pub(crate) section: Option<String>,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub(crate) password: String,
}

/// Identifies a class tuple; the password is the only mutable part.
#[derive(Debug, Deserialize)]
pub(crate) struct CredentialKey {
    pub(crate) grade: Grade,
    pub(crate) group: String,
    #[serde(default)]
    pub(crate) section: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CredentialUpdate {
    pub(crate) grade: Grade,
    pub(crate) group: String,
    #[serde(default)]
    pub(crate) section: Option<String>,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub(crate) password: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CredentialResponse {
    pub(crate) grade: Grade,
    pub(crate) grade_label: String,
    pub(crate) group: String,
    pub(crate) section: Option<String>,
    pub(crate) password: String,
}

impl CredentialResponse {
    pub(crate) fn from_store(credential: Credential) -> Self {
        Self {
            grade: credential.grade,
            grade_label: credential.grade.label().to_string(),
            group: credential.group,
            section: credential.section,
            password: credential.password,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListCredentialsQuery {
    #[serde(default)]
    pub(crate) grade: Option<Grade>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResetResponse {
    pub(crate) generated: usize,
}
