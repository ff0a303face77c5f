use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::error::AppError;
use crate::models::user::{Role, User};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
}

/// Partial update; only the provided fields change. Covers courier
/// verification and account deactivation.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
struct UsersEnvelope {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

pub async fn list_users(api: &ApiClient, filter: &UserFilter) -> Result<Vec<User>, AppError> {
    let envelope: UsersEnvelope = api.get_json_with_query("/admin/users", filter).await?;
    Ok(envelope.users)
}

pub async fn create_user(api: &ApiClient, request: &CreateUserRequest) -> Result<User, AppError> {
    let envelope: UserEnvelope = api.post_json("/admin/users", request).await?;
    Ok(envelope.user)
}

pub async fn update_user(api: &ApiClient, id: &str, update: &UserUpdate) -> Result<User, AppError> {
    let envelope: UserEnvelope = api
        .patch_json(&format!("/admin/users/{id}"), update)
        .await?;
    Ok(envelope.user)
}

pub async fn delete_user(api: &ApiClient, id: &str) -> Result<(), AppError> {
    api.delete(&format!("/admin/users/{id}")).await
}
