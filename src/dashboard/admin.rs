use crate::dashboard::{collect_rows, OrderRow};
use crate::models::order::OrderStatus;
use crate::state::AppState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTotals {
    pub pending: usize,
    pub assigned: usize,
    pub in_delivery: usize,
    pub delivered: usize,
    pub received: usize,
    pub cancelled: usize,
}

/// Platform-wide view for the admin screens: every order, partitioned the
/// same way the dashboards render them.
#[derive(Debug, Clone)]
pub struct AdminDashboard {
    pub active: Vec<OrderRow>,
    pub history: Vec<OrderRow>,
    pub totals: StatusTotals,
    pub unread: usize,
}

pub fn present(state: &AppState) -> AdminDashboard {
    let active = collect_rows(state, |cached| cached.order.status.is_active());
    let history = collect_rows(state, |cached| !cached.order.status.is_active());

    let mut totals = StatusTotals::default();
    for entry in state.orders.iter() {
        match entry.order.status {
            OrderStatus::Pending => totals.pending += 1,
            OrderStatus::Assigned => totals.assigned += 1,
            OrderStatus::InDelivery => totals.in_delivery += 1,
            OrderStatus::Delivered => totals.delivered += 1,
            OrderStatus::Received => totals.received += 1,
            OrderStatus::Cancelled => totals.cancelled += 1,
            OrderStatus::Unknown(_) => {}
        }
    }

    AdminDashboard {
        active,
        history,
        totals,
        unread: state.notifications.unread_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::fixtures::seed_order;

    #[test]
    fn orders_partition_into_active_and_history() {
        let state = AppState::new(16);
        seed_order(&state, "o-1", OrderStatus::Pending, 30);
        seed_order(&state, "o-2", OrderStatus::InDelivery, 20);
        seed_order(&state, "o-3", OrderStatus::Received, 10);
        seed_order(&state, "o-4", OrderStatus::Cancelled, 5);

        let view = present(&state);

        assert_eq!(view.active.len(), 2);
        assert_eq!(view.history.len(), 2);
        assert_eq!(view.totals.pending, 1);
        assert_eq!(view.totals.in_delivery, 1);
        assert_eq!(view.totals.received, 1);
        assert_eq!(view.totals.cancelled, 1);
    }

    #[test]
    fn rows_are_newest_first() {
        let state = AppState::new(16);
        seed_order(&state, "older", OrderStatus::Pending, 60);
        seed_order(&state, "newer", OrderStatus::Pending, 1);

        let view = present(&state);
        assert_eq!(view.active[0].id, "newer");
        assert_eq!(view.active[1].id, "older");
    }
}
