use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::error::AppError;
use crate::models::order::{GeoPoint, Order, OrderStatus};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub delivery_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_location: Option<GeoPoint>,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl OrderFilter {
    pub fn with_statuses(statuses: &[OrderStatus]) -> Self {
        let joined = statuses
            .iter()
            .map(OrderStatus::as_str)
            .collect::<Vec<_>>()
            .join(",");
        Self {
            status: (!joined.is_empty()).then_some(joined),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateStatusRequest<'a> {
    status: &'a OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_code: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignRequest<'a> {
    livreur_id: &'a str,
}

#[derive(Deserialize)]
struct OrderEnvelope {
    order: Order,
}

#[derive(Deserialize)]
struct OrdersEnvelope {
    #[serde(default)]
    orders: Vec<Order>,
}

pub async fn create(api: &ApiClient, request: &CreateOrderRequest) -> Result<Order, AppError> {
    let envelope: OrderEnvelope = api.post_json("/orders", request).await?;
    Ok(envelope.order)
}

pub async fn list(api: &ApiClient, filter: &OrderFilter) -> Result<Vec<Order>, AppError> {
    let envelope: OrdersEnvelope = api.get_json_with_query("/orders", filter).await?;
    Ok(envelope.orders)
}

pub async fn get(api: &ApiClient, id: &str) -> Result<Order, AppError> {
    let envelope: OrderEnvelope = api.get_json(&format!("/orders/{id}")).await?;
    Ok(envelope.order)
}

pub async fn update_status(
    api: &ApiClient,
    id: &str,
    status: &OrderStatus,
    delivery_location: Option<GeoPoint>,
    delivery_code: Option<&str>,
) -> Result<Order, AppError> {
    let envelope: OrderEnvelope = api
        .patch_json(
            &format!("/orders/{id}/status"),
            &UpdateStatusRequest {
                status,
                delivery_location,
                delivery_code,
            },
        )
        .await?;
    Ok(envelope.order)
}

pub async fn assign(api: &ApiClient, id: &str, livreur_id: &str) -> Result<Order, AppError> {
    let envelope: OrderEnvelope = api
        .patch_json(&format!("/orders/{id}/assign"), &AssignRequest { livreur_id })
        .await?;
    Ok(envelope.order)
}

pub async fn confirm_receipt(api: &ApiClient, id: &str) -> Result<Order, AppError> {
    let envelope: OrderEnvelope = api
        .patch_json(&format!("/orders/{id}/confirm"), &serde_json::json!({}))
        .await?;
    Ok(envelope.order)
}
