use serde::Deserialize;

use crate::api::client::ApiClient;
use crate::api::orders::OrderFilter;
use crate::error::AppError;
use crate::models::order::{Order, OrderStatus};

#[derive(Deserialize)]
struct OrdersEnvelope {
    #[serde(default)]
    orders: Vec<Order>,
}

#[derive(Deserialize)]
struct OrderEnvelope {
    order: Order,
}

/// Unassigned PENDING orders a verified courier may self-accept.
pub async fn available_orders(api: &ApiClient) -> Result<Vec<Order>, AppError> {
    let envelope: OrdersEnvelope = api.get_json("/delivery/available-orders").await?;
    Ok(envelope.orders)
}

pub async fn accept_order(api: &ApiClient, id: &str) -> Result<Order, AppError> {
    let envelope: OrderEnvelope = api
        .post_json(&format!("/delivery/accept-order/{id}"), &serde_json::json!({}))
        .await?;
    Ok(envelope.order)
}

pub async fn my_deliveries(
    api: &ApiClient,
    statuses: &[OrderStatus],
) -> Result<Vec<Order>, AppError> {
    let filter = OrderFilter::with_statuses(statuses);
    let envelope: OrdersEnvelope = api
        .get_json_with_query("/delivery/my-deliveries", &filter)
        .await?;
    Ok(envelope.orders)
}

pub async fn history(api: &ApiClient) -> Result<Vec<Order>, AppError> {
    let envelope: OrdersEnvelope = api.get_json("/delivery/history").await?;
    Ok(envelope.orders)
}
