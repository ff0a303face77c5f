use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::error::AppError;
use crate::models::user::{Role, Session, User};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest<'a> {
    reset_token: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// Exchanges credentials for a new immutable session and installs it in the
/// shared state.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<Session, AppError> {
    let response: AuthResponse = api
        .post_json("/auth/login", &LoginRequest { email, password })
        .await?;

    let session = Session::new(response.user, response.token);
    api.state().install_session(session.clone());
    Ok(session)
}

/// Drops the session and lands on the login route. Purely local; the bearer
/// token simply stops being used.
pub fn logout(api: &ApiClient) {
    api.state().clear_session();
}

pub async fn register(api: &ApiClient, request: &RegisterRequest) -> Result<User, AppError> {
    let envelope: UserEnvelope = api.post_json("/auth/register", request).await?;
    Ok(envelope.user)
}

pub async fn forgot_password(api: &ApiClient, email: &str) -> Result<(), AppError> {
    let _: serde_json::Value = api
        .post_json("/auth/forgot-password", &ForgotPasswordRequest { email })
        .await?;
    Ok(())
}

pub async fn reset_password(
    api: &ApiClient,
    reset_token: &str,
    new_password: &str,
) -> Result<(), AppError> {
    let _: serde_json::Value = api
        .post_json(
            "/auth/reset-password",
            &ResetPasswordRequest {
                reset_token,
                new_password,
            },
        )
        .await?;
    Ok(())
}

pub async fn change_password(
    api: &ApiClient,
    current_password: &str,
    new_password: &str,
) -> Result<(), AppError> {
    let _: serde_json::Value = api
        .post_json(
            "/auth/change-password",
            &ChangePasswordRequest {
                current_password,
                new_password,
            },
        )
        .await?;
    Ok(())
}
