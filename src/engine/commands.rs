//! Order-mutating commands. Each one reconciles against the authoritative
//! server response; a speculative cache patch that the backend rejects is
//! rolled back before the error surfaces.

use tracing::info;

use crate::api::client::ApiClient;
use crate::api::courier;
use crate::api::orders::{self, CreateOrderRequest};
use crate::engine::sync;
use crate::error::AppError;
use crate::models::order::{
    GeoPoint, Order, OrderStatus, validate_delivery_code, validate_description,
};
use crate::state::CachedOrder;

/// Client: submit a new order. Rejected locally, with no network call, when
/// the description or address fails the pre-submit checks.
pub async fn create_order(api: &ApiClient, request: CreateOrderRequest) -> Result<Order, AppError> {
    validate_description(&request.description)?;
    if request.delivery_address.trim().is_empty() {
        return Err(AppError::Validation(
            "L'adresse de livraison est requise".to_string(),
        ));
    }

    let order = orders::create(api, &request).await?;
    sync::apply_authoritative(api.state(), order.clone());
    info!(order_id = %order.id, "order created");
    Ok(order)
}

/// Admin: hand an order to a courier.
pub async fn assign_order(api: &ApiClient, order_id: &str, livreur_id: &str) -> Result<Order, AppError> {
    let order = orders::assign(api, order_id, livreur_id).await?;
    sync::apply_authoritative(api.state(), order.clone());
    info!(order_id = %order.id, livreur_id, "order assigned");
    Ok(order)
}

/// Courier: self-accept an available order.
pub async fn accept_order(api: &ApiClient, order_id: &str) -> Result<Order, AppError> {
    let order = courier::accept_order(api, order_id).await?;
    sync::apply_authoritative(api.state(), order.clone());
    info!(order_id = %order.id, "order accepted");
    Ok(order)
}

/// Courier: departure with the parcel.
pub async fn start_delivery(api: &ApiClient, order_id: &str) -> Result<Order, AppError> {
    update_with_rollback(api, order_id, OrderStatus::InDelivery, None, None).await
}

/// Courier: hand over the parcel. The submit is blocked locally unless the
/// code the client dictated has the right format; whether it is the right
/// code stays the backend's call.
pub async fn complete_delivery(
    api: &ApiClient,
    order_id: &str,
    delivery_location: Option<GeoPoint>,
    delivery_code: &str,
) -> Result<Order, AppError> {
    validate_delivery_code(delivery_code)?;
    update_with_rollback(
        api,
        order_id,
        OrderStatus::Delivered,
        delivery_location,
        Some(delivery_code),
    )
    .await
}

/// Client: acknowledge receipt of a delivered order.
pub async fn confirm_receipt(api: &ApiClient, order_id: &str) -> Result<Order, AppError> {
    let order = orders::confirm_receipt(api, order_id).await?;
    sync::apply_authoritative(api.state(), order.clone());
    info!(order_id = %order.id, "receipt confirmed");
    Ok(order)
}

/// Client or admin: cancel an order that has not left yet. Checked locally
/// against the transition table so a stale button cannot fire a doomed call.
pub async fn cancel_order(api: &ApiClient, order_id: &str) -> Result<Order, AppError> {
    if let Some(cached) = api.state().orders.get(order_id) {
        if !cached.order.status.can_transition_to(&OrderStatus::Cancelled) {
            return Err(AppError::Validation(
                "Cette commande ne peut plus être annulée".to_string(),
            ));
        }
    }

    update_with_rollback(api, order_id, OrderStatus::Cancelled, None, None).await
}

/// Applies the target status to the cache optimistically, then reconciles:
/// the server's order replaces the patch on success, the previous snapshot
/// is restored on failure. No speculative state survives a rejection.
async fn update_with_rollback(
    api: &ApiClient,
    order_id: &str,
    next: OrderStatus,
    delivery_location: Option<GeoPoint>,
    delivery_code: Option<&str>,
) -> Result<Order, AppError> {
    let state = api.state();

    let previous: Option<CachedOrder> = state.orders.get(order_id).map(|entry| entry.value().clone());
    if let Some(mut entry) = state.orders.get_mut(order_id) {
        entry.order.status = next.clone();
    }

    match orders::update_status(api, order_id, &next, delivery_location, delivery_code).await {
        Ok(order) => {
            sync::apply_authoritative(state, order.clone());
            info!(order_id = %order.id, status = %order.status, "order status updated");
            Ok(order)
        }
        Err(err) => {
            if let Some(previous) = previous {
                state.orders.insert(order_id.to_string(), previous);
            }
            Err(err)
        }
    }
}
