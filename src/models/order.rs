use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{Deserializer, Error as _};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Minimum length of an order description, enforced before any network call.
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Exact length of the receipt confirmation code. Format check only; the
/// backend decides whether the code is actually correct.
pub const DELIVERY_CODE_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Canonical order lifecycle statuses. The backend owns every transition;
/// this side only normalizes, classifies and renders them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Assigned,
    InDelivery,
    Delivered,
    Received,
    Cancelled,
    /// Any status string this client does not know. Rendered as an
    /// unknown-status badge instead of failing ingest.
    Unknown(String),
}

impl OrderStatus {
    /// Case-insensitive normalization of a raw backend status string.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PENDING" => OrderStatus::Pending,
            "ASSIGNED" => OrderStatus::Assigned,
            "IN_DELIVERY" => OrderStatus::InDelivery,
            "DELIVERED" => OrderStatus::Delivered,
            "RECEIVED" => OrderStatus::Received,
            "CANCELLED" => OrderStatus::Cancelled,
            _ => OrderStatus::Unknown(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Assigned => "ASSIGNED",
            OrderStatus::InDelivery => "IN_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Received => "RECEIVED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Unknown(raw) => raw,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "En attente",
            OrderStatus::Assigned => "Assignée",
            OrderStatus::InDelivery => "En cours de livraison",
            OrderStatus::Delivered => "Livrée (à confirmer)",
            OrderStatus::Received => "Terminée",
            OrderStatus::Cancelled => "Annulée",
            OrderStatus::Unknown(_) => "Statut inconnu",
        }
    }

    /// Orders still moving through the lifecycle; everything else belongs to
    /// the history view.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Assigned | OrderStatus::InDelivery
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Received | OrderStatus::Cancelled)
    }

    /// Legal lifecycle transitions. Cancellation is only reachable before the
    /// courier departs. The check is defensive: an illegal transition reported
    /// by the backend is logged and applied anyway.
    pub fn can_transition_to(&self, next: &OrderStatus) -> bool {
        use OrderStatus::*;

        matches!(
            (self, next),
            (Pending, Assigned)
                | (Assigned, InDelivery)
                | (InDelivery, Delivered)
                | (Delivered, Received)
                | (Pending, Cancelled)
                | (Assigned, Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Err(D::Error::custom("order status cannot be empty"));
        }
        Ok(OrderStatus::normalize(&raw))
    }
}

/// Read-only projection of a backend-owned order. Mutated here only through
/// reconciled command responses or provisional event patches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub livreur_id: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_phone: Option<String>,
    pub delivery_address: String,
    #[serde(default)]
    pub delivery_location: Option<GeoPoint>,
    #[serde(default)]
    pub description: String,
    /// One-time receipt code; the backend only includes it on the client's
    /// own orders.
    #[serde(default)]
    pub delivery_code: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub picked_up_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
}

pub fn validate_description(description: &str) -> Result<(), AppError> {
    if description.trim().chars().count() < MIN_DESCRIPTION_LEN {
        return Err(AppError::Validation(format!(
            "La description doit faire au moins {MIN_DESCRIPTION_LEN} caractères"
        )));
    }
    Ok(())
}

pub fn validate_delivery_code(code: &str) -> Result<(), AppError> {
    if code.len() != DELIVERY_CODE_LEN || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::Validation(format!(
            "Le code de livraison doit contenir {DELIVERY_CODE_LEN} chiffres"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Assigned,
        OrderStatus::InDelivery,
        OrderStatus::Delivered,
        OrderStatus::Received,
        OrderStatus::Cancelled,
    ];

    #[test]
    fn normalize_is_case_insensitive() {
        assert_eq!(OrderStatus::normalize("pending"), OrderStatus::Pending);
        assert_eq!(OrderStatus::normalize("In_Delivery"), OrderStatus::InDelivery);
        assert_eq!(OrderStatus::normalize(" CANCELLED "), OrderStatus::Cancelled);
    }

    #[test]
    fn unknown_status_is_preserved_not_rejected() {
        let status = OrderStatus::normalize("REFUNDED");
        assert_eq!(status, OrderStatus::Unknown("REFUNDED".to_string()));
        assert_eq!(status.label(), "Statut inconnu");
        assert!(!status.is_active());
        assert!(!status.is_terminal());
    }

    #[test]
    fn active_statuses_are_exactly_pending_assigned_in_delivery() {
        let active: Vec<_> = CANONICAL.iter().filter(|s| s.is_active()).collect();
        assert_eq!(
            active,
            vec![
                &OrderStatus::Pending,
                &OrderStatus::Assigned,
                &OrderStatus::InDelivery
            ]
        );
    }

    #[test]
    fn transition_table_accepts_only_the_legal_pairs() {
        use OrderStatus::*;

        let legal = [
            (Pending, Assigned),
            (Assigned, InDelivery),
            (InDelivery, Delivered),
            (Delivered, Received),
            (Pending, Cancelled),
            (Assigned, Cancelled),
        ];

        for from in &CANONICAL {
            for to in &CANONICAL {
                let expected = legal.iter().any(|(f, t)| f == from && t == to);
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "transition {from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn unknown_status_never_transitions() {
        let unknown = OrderStatus::Unknown("LOST".to_string());
        for status in &CANONICAL {
            assert!(!unknown.can_transition_to(status));
            assert!(!status.can_transition_to(&unknown));
        }
    }

    #[test]
    fn status_roundtrips_through_serde() {
        let json = serde_json::to_string(&OrderStatus::InDelivery).unwrap();
        assert_eq!(json, "\"IN_DELIVERY\"");

        let parsed: OrderStatus = serde_json::from_str("\"in_delivery\"").unwrap();
        assert_eq!(parsed, OrderStatus::InDelivery);
    }

    #[test]
    fn description_shorter_than_minimum_is_rejected() {
        assert!(validate_description("123456789").is_err());
        assert!(validate_description("1234567890").is_ok());
        assert!(validate_description("   padded   ").is_err());
    }

    #[test]
    fn delivery_code_must_be_six_digits() {
        assert!(validate_delivery_code("12345").is_err());
        assert!(validate_delivery_code("1234567").is_err());
        assert!(validate_delivery_code("12345a").is_err());
        assert!(validate_delivery_code("123456").is_ok());
    }
}
