use std::sync::{PoisonError, RwLock};

use dashmap::DashMap;
use tokio::sync::watch;

use crate::models::order::Order;
use crate::models::user::Session;
use crate::notify::NotificationStore;
use crate::observability::metrics::Metrics;
use crate::realtime::EventHub;
use crate::routing::Route;

/// Cache entry for a backend-owned order. `provisional` marks projections
/// synthesized from an event payload; the next authoritative refresh replaces
/// them wholesale.
#[derive(Debug, Clone)]
pub struct CachedOrder {
    pub order: Order,
    pub provisional: bool,
}

impl CachedOrder {
    pub fn authoritative(order: Order) -> Self {
        Self {
            order,
            provisional: false,
        }
    }

    pub fn provisional(order: Order) -> Self {
        Self {
            order,
            provisional: true,
        }
    }
}

/// Session-wide shared state. The notification list and the order cache each
/// have a single logical owner (the store and the sync module); presenters
/// only read.
pub struct AppState {
    session: RwLock<Option<Session>>,
    pub orders: DashMap<String, CachedOrder>,
    pub notifications: NotificationStore,
    pub events: EventHub,
    nav: watch::Sender<Route>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(event_buffer_size: usize) -> Self {
        let (nav, _unused_rx) = watch::channel(Route::Login);

        Self {
            session: RwLock::new(None),
            orders: DashMap::new(),
            notifications: NotificationStore::new(),
            events: EventHub::new(event_buffer_size),
            nav,
            metrics: Metrics::new(),
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Installs a freshly minted session and lands on the role's home route.
    pub fn install_session(&self, session: Session) {
        let home = Route::home_for(session.role());
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        self.navigate(home);
    }

    /// Removes the session and redirects to login. Used for both deliberate
    /// logout and the global 401 teardown.
    pub fn clear_session(&self) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.navigate(Route::Login);
    }

    pub fn navigate(&self, route: Route) {
        self.nav.send_replace(route);
    }

    pub fn current_route(&self) -> Route {
        *self.nav.borrow()
    }

    /// Watchable navigation state for anything that renders routes.
    pub fn watch_route(&self) -> watch::Receiver<Route> {
        self.nav.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{Role, Session, User};

    fn session(role: Role) -> Session {
        Session::new(
            User {
                id: "u1".to_string(),
                full_name: "Awa Dossou".to_string(),
                email: "awa@example.com".to_string(),
                phone: None,
                role,
                is_verified: true,
                is_active: true,
            },
            "token-1",
        )
    }

    #[test]
    fn starts_logged_out_on_the_login_route() {
        let state = AppState::new(16);
        assert!(state.session().is_none());
        assert_eq!(state.current_route(), Route::Login);
    }

    #[test]
    fn login_lands_on_the_role_home() {
        let state = AppState::new(16);
        state.install_session(session(Role::Livreur));
        assert_eq!(state.current_route(), Route::CourierDashboard);
    }

    #[test]
    fn clearing_the_session_redirects_to_login() {
        let state = AppState::new(16);
        state.install_session(session(Role::Admin));
        state.clear_session();

        assert!(state.session().is_none());
        assert_eq!(state.current_route(), Route::Login);
    }
}
