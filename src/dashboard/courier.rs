use crate::dashboard::{collect_rows, OrderRow};
use crate::models::order::OrderStatus;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct CourierDashboard {
    /// False until an admin verifies the account; the screens show a waiting
    /// banner and hide the work lists.
    pub verified: bool,
    /// Deliveries in the courier's hands right now.
    pub current: Vec<OrderRow>,
    /// Unassigned orders open for self-acceptance.
    pub available: Vec<OrderRow>,
    pub completed: usize,
    pub unread: usize,
}

pub fn present(state: &AppState) -> CourierDashboard {
    let verified = state
        .session()
        .map(|session| session.user.is_verified)
        .unwrap_or(false);

    let current = collect_rows(state, |cached| {
        matches!(
            cached.order.status,
            OrderStatus::Assigned | OrderStatus::InDelivery
        )
    });
    let available = collect_rows(state, |cached| {
        cached.order.status == OrderStatus::Pending && cached.order.livreur_id.is_none()
    });
    let completed = state
        .orders
        .iter()
        .filter(|entry| {
            matches!(
                entry.order.status,
                OrderStatus::Delivered | OrderStatus::Received
            )
        })
        .count();

    CourierDashboard {
        verified,
        current,
        available,
        completed,
        unread: state.notifications.unread_count(),
    }
}
