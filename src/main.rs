use std::sync::Arc;

use tokio::time::{sleep, Duration};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use delivery_agent::api::{ApiClient, auth};
use delivery_agent::config::Config;
use delivery_agent::engine::sync;
use delivery_agent::error::AppError;
use delivery_agent::monitor;
use delivery_agent::realtime::channel;
use delivery_agent::state::AppState;

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let state = Arc::new(AppState::new(config.event_buffer_size));
    let api = ApiClient::new(config.api_base_url.clone(), state.clone());

    let session = auth::login(&api, &config.email, &config.password).await?;
    info!(role = %session.role(), "session established");

    state.notifications.load(&api).await;
    match sync::refresh_orders(&api).await {
        Ok(count) => info!(count, "order cache primed"),
        Err(err) => warn!(error = %err, "initial order refresh failed"),
    }

    let channel_api = api.clone();
    let socket_url = config.socket_url.clone();
    tokio::spawn(async move {
        loop {
            if channel_api.state().session().is_none() {
                warn!("session closed; stopping realtime channel");
                break;
            }
            if let Err(err) = channel::run_channel(&channel_api, &socket_url).await {
                warn!(error = %err, "realtime channel failed");
            }
            channel_api.state().metrics.channel_reconnects_total.inc();
            sleep(RECONNECT_DELAY).await;
        }
    });

    let app = monitor::router(state.clone());
    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    info!(http_port = config.http_port, "monitor endpoint started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
