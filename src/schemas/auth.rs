use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    pub(crate) token_type: String,
    pub(crate) username: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PasswordChange {
    #[serde(alias = "currentPassword")]
    pub(crate) current_password: String,
    #[serde(alias = "newPassword")]
    pub(crate) new_password: String,
    #[serde(alias = "confirmPassword")]
    pub(crate) confirm_password: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct MeResponse {
    pub(crate) username: String,
}
