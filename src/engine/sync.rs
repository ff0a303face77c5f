use chrono::Utc;
use tracing::{debug, warn};

use crate::api::client::ApiClient;
use crate::api::orders::{self, OrderFilter};
use crate::error::AppError;
use crate::models::order::{Order, OrderStatus};
use crate::realtime::channel::ChannelEvent;
use crate::state::{AppState, CachedOrder};

/// Replaces the order cache wholesale with the authoritative backend list.
/// Provisional entries synthesized from events disappear here.
pub async fn refresh_orders(api: &ApiClient) -> Result<usize, AppError> {
    let fetched = orders::list(api, &OrderFilter::default()).await?;
    let state = api.state();

    state.orders.clear();
    let count = fetched.len();
    for order in fetched {
        state
            .orders
            .insert(order.id.clone(), CachedOrder::authoritative(order));
    }

    debug!(count, "order cache refreshed");
    Ok(count)
}

/// Installs a server-confirmed order. The backend is authoritative: a
/// transition the table does not allow is logged and applied as-is.
pub fn apply_authoritative(state: &AppState, order: Order) {
    if let Some(existing) = state.orders.get(&order.id) {
        let from = &existing.order.status;
        if *from != order.status && !from.can_transition_to(&order.status) {
            warn!(
                order_id = %order.id,
                from = %from,
                to = %order.status,
                "backend reported an unexpected status transition; applying anyway"
            );
        }
    }

    state
        .orders
        .insert(order.id.clone(), CachedOrder::authoritative(order));
}

/// Patches the cache from a live event. A `new-order` payload only carries
/// what the event guessed, so the entry is tagged provisional and replaced
/// wholesale on the next authoritative refresh; it is never trusted
/// indefinitely.
pub fn apply_event(state: &AppState, event: &ChannelEvent) {
    let ChannelEvent::NewOrder(payload) = event else {
        return;
    };

    if state.orders.contains_key(&payload.order_id) {
        return;
    }

    let order = Order {
        id: payload.order_id.clone(),
        status: OrderStatus::Pending,
        client_id: None,
        livreur_id: None,
        client_name: payload.client_name.clone(),
        client_phone: payload.client_phone.clone(),
        delivery_address: payload.delivery_address.clone().unwrap_or_default(),
        delivery_location: None,
        description: payload.description.clone().unwrap_or_default(),
        delivery_code: None,
        created_at: payload.created_at.unwrap_or_else(Utc::now),
        assigned_at: None,
        picked_up_at: None,
        delivered_at: None,
    };

    state
        .orders
        .insert(order.id.clone(), CachedOrder::provisional(order));
}
