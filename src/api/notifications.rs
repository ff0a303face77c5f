use serde::Deserialize;

use crate::api::client::ApiClient;
use crate::error::AppError;
use crate::models::notification::NotificationRecord;

#[derive(Deserialize)]
struct NotificationsEnvelope {
    #[serde(default)]
    notifications: Vec<NotificationRecord>,
}

pub async fn fetch(api: &ApiClient) -> Result<Vec<NotificationRecord>, AppError> {
    let envelope: NotificationsEnvelope = api.get_json("/notifications").await?;
    Ok(envelope.notifications)
}

pub async fn mark_read(api: &ApiClient, id: &str) -> Result<(), AppError> {
    api.patch_empty(&format!("/notifications/{id}/read")).await
}

pub async fn delete_all(api: &ApiClient) -> Result<(), AppError> {
    api.delete("/notifications").await
}
