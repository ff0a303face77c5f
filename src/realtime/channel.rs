use chrono::{DateTime, Utc};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::api::client::ApiClient;
use crate::engine::sync;
use crate::error::AppError;
use crate::models::notification::{NotificationKind, NotificationRecord, RawNotification};
use crate::models::user::Role;
use crate::state::AppState;

/// Payload of a `new-order` event. Everything beyond the order id is what the
/// backend chose to include, so it is all optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderPayload {
    pub order_id: String,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_phone: Option<String>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notification_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One frame of the real-time channel: `{"event": ..., "data": {...}}`.
///
/// The event name decides the notification kind; a payload `type` field only
/// matters on the generic `notification` event, where it may also be absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ChannelEvent {
    NewOrder(NewOrderPayload),
    OrderAssigned(RawNotification),
    OrderStatusUpdate(RawNotification),
    OrderDelivered(RawNotification),
    AccountCreated(RawNotification),
    Notification(RawNotification),
}

impl ChannelEvent {
    /// Resolved kind, with the ingest default applied for untyped generic
    /// notifications. Used for metrics labels.
    pub fn kind(&self) -> NotificationKind {
        match self {
            ChannelEvent::NewOrder(_) => NotificationKind::OrderCreated,
            ChannelEvent::OrderAssigned(_) => NotificationKind::OrderAssigned,
            ChannelEvent::OrderStatusUpdate(_) => NotificationKind::OrderStatusUpdate,
            ChannelEvent::OrderDelivered(_) => NotificationKind::OrderDelivered,
            ChannelEvent::AccountCreated(_) => NotificationKind::AccountCreated,
            ChannelEvent::Notification(raw) => {
                raw.kind.unwrap_or(NotificationKind::OrderStatusUpdate)
            }
        }
    }

    /// Collapses the event into the raw shape the ingest rules understand.
    /// The event name wins over whatever `type` the payload carried.
    pub fn into_raw(self) -> RawNotification {
        match self {
            ChannelEvent::NewOrder(payload) => {
                let message = payload.message.unwrap_or_else(|| {
                    format!(
                        "Nouvelle commande de {}",
                        payload.client_name.as_deref().unwrap_or("un client")
                    )
                });
                RawNotification {
                    kind: Some(NotificationKind::OrderCreated),
                    message,
                    order_id: Some(payload.order_id),
                    related_id: None,
                    notification_id: payload.notification_id,
                    created_at: payload.created_at,
                }
            }
            ChannelEvent::OrderAssigned(mut raw) => {
                raw.kind = Some(NotificationKind::OrderAssigned);
                raw
            }
            ChannelEvent::OrderStatusUpdate(mut raw) => {
                raw.kind = Some(NotificationKind::OrderStatusUpdate);
                raw
            }
            ChannelEvent::OrderDelivered(mut raw) => {
                raw.kind = Some(NotificationKind::OrderDelivered);
                raw
            }
            ChannelEvent::AccountCreated(mut raw) => {
                raw.kind = Some(NotificationKind::AccountCreated);
                raw
            }
            ChannelEvent::Notification(raw) => raw,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JoinData<'a> {
    user_id: &'a str,
    role: Role,
}

#[derive(Serialize)]
struct JoinMessage<'a> {
    event: &'static str,
    data: JoinData<'a>,
}

/// Connects to the channel, announces the session, and pumps frames into the
/// shared state until the connection drops. Reconnection policy belongs to
/// the caller.
pub async fn run_channel(api: &ApiClient, socket_url: &str) -> Result<(), AppError> {
    let state = api.state();
    let session = state
        .session()
        .ok_or_else(|| AppError::Channel("no active session".to_string()))?;

    let (socket, _) = connect_async(socket_url)
        .await
        .map_err(|err| AppError::Channel(format!("connect failed: {err}")))?;
    let (mut sink, mut stream) = socket.split();

    let join = serde_json::to_string(&JoinMessage {
        event: "join",
        data: JoinData {
            user_id: &session.user.id,
            role: session.role(),
        },
    })
    .map_err(|err| AppError::Internal(format!("join message: {err}")))?;
    sink.send(Message::Text(join))
        .await
        .map_err(|err| AppError::Channel(format!("join send failed: {err}")))?;

    info!(role = %session.role(), "realtime channel connected");

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                handle_frame(state, &text);
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "realtime channel read failed");
                break;
            }
        }
    }

    info!("realtime channel disconnected");
    Ok(())
}

/// Processes one text frame: patch the order cache, ingest the notification,
/// fan it out to subscribers. Frames that do not parse are logged and
/// skipped; the channel must survive anything the transport hands it.
pub fn handle_frame(state: &AppState, text: &str) -> Option<NotificationRecord> {
    let event = match serde_json::from_str::<ChannelEvent>(text) {
        Ok(event) => event,
        Err(err) => {
            debug!(error = %err, "ignoring unrecognized channel frame");
            return None;
        }
    };

    state
        .metrics
        .channel_events_total
        .with_label_values(&[event.kind().as_str()])
        .inc();

    sync::apply_event(state, &event);

    let record = state.notifications.ingest(event.into_raw());
    state
        .metrics
        .notifications_unread
        .set(state.notifications.unread_count() as i64);
    state.events.publish(record.clone());

    Some(record)
}
