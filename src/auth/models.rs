//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// JWT claims; `type` separates admin tokens from user tokens
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(rename = "type")]
    pub token_type: String,
}

/// Site user, created on first Google sign-in
#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub google_id: Option<String>,
    pub picture: Option<String>,
    pub created_at: Option<String>,
    pub last_login: Option<String>,
}

/// Admin account row; never serialized directly since it carries the hash
#[derive(FromRow, Debug, Clone)]
pub struct AdminUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub hashed_password: String,
    pub is_active: i64,
    pub is_superuser: i64,
    pub created_at: Option<String>,
    pub last_login: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct AdminUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub created_at: Option<String>,
    pub last_login: Option<String>,
}

impl From<AdminUser> for AdminUserResponse {
    fn from(admin: AdminUser) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
            email: admin.email,
            is_active: admin.is_active != 0,
            is_superuser: admin.is_superuser != 0,
            created_at: admin.created_at,
            last_login: admin.last_login,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct RegisterAdminRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_superuser: bool,
}

#[derive(Serialize, Debug)]
pub struct AdminTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: AdminUserResponse,
}

/// Profile posted by the frontend after its own Google sign-in
#[derive(Deserialize, Debug)]
pub struct GoogleLoginRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub google_id: Option<String>,
    pub picture: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct UserTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

/// Google ID token payload for OAuth
#[derive(Deserialize, Debug)]
pub struct GoogleIdTokenPayload {
    pub id_token: String,
}

#[derive(Deserialize, Debug)]
pub struct GoogleCallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UserInfoQuery {
    pub access_token: String,
}
