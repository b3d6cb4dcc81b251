use super::*;
use arbor_core::Unique;
use serde::Deserialize;
use serde::Serialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserInfo,
}

impl TokenResponse {
    pub fn new(access_token: String, user: UserInfo) -> Self {
        Self {
            access_token,
            token_type: "bearer",
            user,
        }
    }
}

#[derive(Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<&Account> for UserInfo {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id().to_string(),
            email: account.email().to_string(),
            name: account.name().to_string(),
        }
    }
}

impl From<&Identity> for UserInfo {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id().to_string(),
            email: identity.email().to_string(),
            name: identity.name().to_string(),
        }
    }
}
