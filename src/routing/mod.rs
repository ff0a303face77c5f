use crate::models::notification::NotificationKind;
use crate::models::user::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    AdminDashboard,
    AdminOrders,
    ClientDashboard,
    ClientOrders,
    CourierDashboard,
    CourierProfile,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::AdminDashboard => "/admin/dashboard",
            Route::AdminOrders => "/admin/orders",
            Route::ClientDashboard => "/client/dashboard",
            Route::ClientOrders => "/client/orders",
            Route::CourierDashboard => "/livreur/dashboard",
            Route::CourierProfile => "/livreur/profile",
        }
    }

    /// Landing route right after login.
    pub fn home_for(role: Role) -> Route {
        match role {
            Role::Admin => Route::AdminDashboard,
            Role::Client => Route::ClientDashboard,
            Role::Livreur => Route::CourierDashboard,
        }
    }
}

/// Where clicking a notification takes the user, per role. `None` means the
/// caller must not navigate and leaves the notification up for manual
/// dismissal.
pub fn resolve_target(kind: NotificationKind, role: Role) -> Option<Route> {
    use NotificationKind::*;

    match (kind, role) {
        (OrderCreated | OrderDelivered, Role::Admin) => Some(Route::AdminOrders),
        (OrderAssigned, Role::Livreur) => Some(Route::CourierDashboard),
        (OrderStatusUpdate, Role::Admin) => Some(Route::AdminOrders),
        (OrderStatusUpdate, Role::Client) => Some(Route::ClientOrders),
        (AccountCreated, Role::Livreur) => Some(Route::CourierProfile),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_pairs_resolve_to_their_targets() {
        assert_eq!(
            resolve_target(NotificationKind::OrderCreated, Role::Admin),
            Some(Route::AdminOrders)
        );
        assert_eq!(
            resolve_target(NotificationKind::OrderDelivered, Role::Admin),
            Some(Route::AdminOrders)
        );
        assert_eq!(
            resolve_target(NotificationKind::OrderAssigned, Role::Livreur),
            Some(Route::CourierDashboard)
        );
        assert_eq!(
            resolve_target(NotificationKind::OrderStatusUpdate, Role::Client),
            Some(Route::ClientOrders)
        );
        assert_eq!(
            resolve_target(NotificationKind::OrderStatusUpdate, Role::Admin),
            Some(Route::AdminOrders)
        );
        assert_eq!(
            resolve_target(NotificationKind::AccountCreated, Role::Livreur),
            Some(Route::CourierProfile)
        );
    }

    #[test]
    fn unmapped_pairs_do_not_navigate() {
        assert_eq!(resolve_target(NotificationKind::OrderAssigned, Role::Client), None);
        assert_eq!(resolve_target(NotificationKind::OrderAssigned, Role::Admin), None);
        assert_eq!(resolve_target(NotificationKind::OrderCreated, Role::Client), None);
        assert_eq!(resolve_target(NotificationKind::OrderCreated, Role::Livreur), None);
        assert_eq!(resolve_target(NotificationKind::OrderStatusUpdate, Role::Livreur), None);
        assert_eq!(resolve_target(NotificationKind::AccountCreated, Role::Admin), None);
        assert_eq!(resolve_target(NotificationKind::AccountCreated, Role::Client), None);
        assert_eq!(resolve_target(NotificationKind::OrderDelivered, Role::Client), None);
        assert_eq!(resolve_target(NotificationKind::OrderDelivered, Role::Livreur), None);
    }

    #[test]
    fn every_role_has_a_home() {
        assert_eq!(Route::home_for(Role::Admin).path(), "/admin/dashboard");
        assert_eq!(Route::home_for(Role::Client).path(), "/client/dashboard");
        assert_eq!(Route::home_for(Role::Livreur).path(), "/livreur/dashboard");
    }
}
