use crate::dashboard::{collect_rows, OrderRow};
use crate::models::order::OrderStatus;
use crate::state::AppState;

/// A delivered order still waiting for the client's confirmation, with the
/// code to dictate to the courier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptCode {
    pub order_id: String,
    pub code: String,
}

#[derive(Debug, Clone)]
pub struct ClientDashboard {
    pub active: Vec<OrderRow>,
    pub history: Vec<OrderRow>,
    pub pending_receipt: Vec<ReceiptCode>,
    pub unread: usize,
}

pub fn present(state: &AppState) -> ClientDashboard {
    let active = collect_rows(state, |cached| cached.order.status.is_active());
    let history = collect_rows(state, |cached| !cached.order.status.is_active());

    let mut pending_receipt: Vec<ReceiptCode> = state
        .orders
        .iter()
        .filter(|entry| entry.order.status == OrderStatus::Delivered)
        .filter_map(|entry| {
            entry.order.delivery_code.as_ref().map(|code| ReceiptCode {
                order_id: entry.order.id.clone(),
                code: code.clone(),
            })
        })
        .collect();
    pending_receipt.sort_by(|a, b| a.order_id.cmp(&b.order_id));

    ClientDashboard {
        active,
        history,
        pending_receipt,
        unread: state.notifications.unread_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::fixtures::seed_order;
    use crate::engine::sync;

    #[test]
    fn delivered_orders_expose_their_receipt_code() {
        let state = AppState::new(16);
        let mut order = seed_order(&state, "o-1", OrderStatus::Delivered, 5);
        order.delivery_code = Some("123456".to_string());
        sync::apply_authoritative(&state, order);
        seed_order(&state, "o-2", OrderStatus::InDelivery, 2);

        let view = present(&state);

        assert_eq!(
            view.pending_receipt,
            vec![ReceiptCode {
                order_id: "o-1".to_string(),
                code: "123456".to_string(),
            }]
        );
    }

    #[test]
    fn delivered_without_a_code_is_not_listed_for_receipt() {
        let state = AppState::new(16);
        seed_order(&state, "o-1", OrderStatus::Delivered, 5);

        let view = present(&state);
        assert!(view.pending_receipt.is_empty());
        assert_eq!(view.history.len(), 1);
    }
}
