use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    OrderCreated,
    OrderAssigned,
    OrderStatusUpdate,
    OrderDelivered,
    AccountCreated,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::OrderCreated => "ORDER_CREATED",
            NotificationKind::OrderAssigned => "ORDER_ASSIGNED",
            NotificationKind::OrderStatusUpdate => "ORDER_STATUS_UPDATE",
            NotificationKind::OrderDelivered => "ORDER_DELIVERED",
            NotificationKind::AccountCreated => "ACCOUNT_CREATED",
        }
    }
}

/// Canonical advisory notification, either pushed over the real-time channel
/// or fetched as part of the session snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub related_id: Option<String>,
}

/// Raw channel payload before normalization. Everything is optional except
/// the message; the ingest rules fill in the gaps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNotification {
    #[serde(rename = "type", default)]
    pub kind: Option<NotificationKind>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub related_id: Option<String>,
    #[serde(default)]
    pub notification_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
