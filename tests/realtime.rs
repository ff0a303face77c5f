use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::routing::get;
use axum::Router;

use delivery_agent::api::ApiClient;
use delivery_agent::error::AppError;
use delivery_agent::models::notification::NotificationKind;
use delivery_agent::models::user::{Role, Session, User};
use delivery_agent::realtime::channel;
use delivery_agent::state::AppState;

fn livreur_session() -> Session {
    Session::new(
        User {
            id: "u-livreur".to_string(),
            full_name: "Koffi Agbo".to_string(),
            email: "koffi@example.com".to_string(),
            phone: None,
            role: Role::Livreur,
            is_verified: true,
            is_active: true,
        },
        "token-1",
    )
}

/// Stub channel endpoint: waits for the join announcement, replays the given
/// frames, then closes.
async fn serve_frames(frames: Vec<&str>) -> String {
    let frames: Vec<String> = frames.into_iter().map(str::to_string).collect();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new().route(
        "/ws",
        get(move |ws: WebSocketUpgrade| {
            let frames = frames.clone();
            async move { ws.on_upgrade(move |socket| replay(socket, frames)) }
        }),
    );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("ws://{addr}/ws")
}

async fn replay(mut socket: WebSocket, frames: Vec<String>) {
    let join = socket.recv().await;
    assert!(matches!(join, Some(Ok(Message::Text(_)))));

    for frame in frames {
        if socket.send(Message::Text(frame)).await.is_err() {
            return;
        }
    }
    let _ = socket.send(Message::Close(None)).await;
}

#[tokio::test]
async fn channel_events_flow_into_store_cache_and_hub() {
    let url = serve_frames(vec![
        r#"{"event":"new-order","data":{"orderId":"o-1","clientName":"Awa Dossou","deliveryAddress":"Rue 12, Cotonou","description":"Deux cartons"}}"#,
        r#"{"event":"order-assigned","data":{"orderId":"o-1","message":"Une commande vous a été assignée","notificationId":"n-2"}}"#,
    ])
    .await;

    let state = Arc::new(AppState::new(64));
    state.install_session(livreur_session());
    let mut subscription = state.events.subscribe();

    let api = ApiClient::new("http://unused.invalid", state.clone());
    channel::run_channel(&api, &url).await.unwrap();

    assert_eq!(state.notifications.len(), 2);
    assert_eq!(state.notifications.unread_count(), 2);
    assert!(state.orders.get("o-1").unwrap().provisional);

    let first = subscription.recv().await.unwrap();
    assert_eq!(first.kind, NotificationKind::OrderCreated);
    let second = subscription.recv().await.unwrap();
    assert_eq!(second.id, "n-2");
    assert_eq!(second.kind, NotificationKind::OrderAssigned);

    assert_eq!(
        state
            .metrics
            .channel_events_total
            .with_label_values(&["ORDER_CREATED"])
            .get(),
        1
    );
}

#[tokio::test]
async fn duplicate_notification_ids_across_frames_are_stored_once() {
    let url = serve_frames(vec![
        r#"{"event":"order-status-update","data":{"orderId":"o-3","message":"En route","notificationId":"n-5"}}"#,
        r#"{"event":"order-status-update","data":{"orderId":"o-3","message":"En route","notificationId":"n-5"}}"#,
    ])
    .await;

    let state = Arc::new(AppState::new(64));
    state.install_session(livreur_session());
    let api = ApiClient::new("http://unused.invalid", state.clone());

    channel::run_channel(&api, &url).await.unwrap();

    assert_eq!(state.notifications.len(), 1);
}

#[tokio::test]
async fn unparseable_frames_do_not_kill_the_connection() {
    let url = serve_frames(vec![
        "not json at all",
        r#"{"event":"order-delivered","data":{"orderId":"o-9","message":"Commande livrée"}}"#,
    ])
    .await;

    let state = Arc::new(AppState::new(64));
    state.install_session(livreur_session());
    let api = ApiClient::new("http://unused.invalid", state.clone());

    channel::run_channel(&api, &url).await.unwrap();

    assert_eq!(state.notifications.len(), 1);
    assert_eq!(
        state.notifications.records()[0].kind,
        NotificationKind::OrderDelivered
    );
}

#[tokio::test]
async fn running_without_a_session_is_refused() {
    let state = Arc::new(AppState::new(64));
    let api = ApiClient::new("http://unused.invalid", state);

    let result = channel::run_channel(&api, "ws://127.0.0.1:1/ws").await;
    assert!(matches!(result, Err(AppError::Channel(_))));
}
