pub mod admin;
pub mod client;
pub mod courier;

use chrono::{DateTime, Utc};

use crate::models::order::OrderStatus;
use crate::state::{AppState, CachedOrder};

/// One line of an order table. Presenters are read-only: they snapshot the
/// shared state and never mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub id: String,
    pub status: OrderStatus,
    pub status_label: &'static str,
    pub delivery_address: String,
    pub created_at: DateTime<Utc>,
    /// Synthesized from an event and not yet confirmed by a fetch.
    pub provisional: bool,
}

impl OrderRow {
    fn from_cached(cached: &CachedOrder) -> Self {
        Self {
            id: cached.order.id.clone(),
            status: cached.order.status.clone(),
            status_label: cached.order.status.label(),
            delivery_address: cached.order.delivery_address.clone(),
            created_at: cached.order.created_at,
            provisional: cached.provisional,
        }
    }
}

pub(crate) fn collect_rows<F>(state: &AppState, mut keep: F) -> Vec<OrderRow>
where
    F: FnMut(&CachedOrder) -> bool,
{
    let mut rows: Vec<OrderRow> = state
        .orders
        .iter()
        .filter(|entry| keep(entry.value()))
        .map(|entry| OrderRow::from_cached(entry.value()))
        .collect();

    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rows
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{Duration, Utc};

    use crate::engine::sync;
    use crate::models::order::{Order, OrderStatus};
    use crate::state::AppState;

    pub fn seed_order(state: &AppState, id: &str, status: OrderStatus, minutes_ago: i64) -> Order {
        let order = Order {
            id: id.to_string(),
            status,
            client_id: Some("c1".to_string()),
            livreur_id: None,
            client_name: Some("Awa Dossou".to_string()),
            client_phone: None,
            delivery_address: "Rue 12, Cotonou".to_string(),
            delivery_location: None,
            description: "Deux cartons de fournitures".to_string(),
            delivery_code: None,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
            assigned_at: None,
            picked_up_at: None,
            delivered_at: None,
        };
        sync::apply_authoritative(state, order.clone());
        order
    }
}
