use chrono::{DateTime, Utc};

use crate::models::notification::{NotificationKind, NotificationRecord, RawNotification};

/// Normalizes a raw channel payload into a canonical record.
///
/// Pure: the impure inputs (a session-unique fallback id and the local
/// receive time) are supplied by the caller. The fallback id is never sent
/// back to the server.
pub fn normalize(
    raw: RawNotification,
    fallback_id: String,
    received_at: DateTime<Utc>,
) -> NotificationRecord {
    NotificationRecord {
        id: raw.notification_id.unwrap_or(fallback_id),
        kind: raw.kind.unwrap_or(NotificationKind::OrderStatusUpdate),
        message: raw.message,
        created_at: raw.created_at.unwrap_or(received_at),
        is_read: false,
        related_id: raw.order_id.or(raw.related_id),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn received_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn missing_type_defaults_to_status_update() {
        let record = normalize(
            RawNotification {
                message: "Votre commande est en route".to_string(),
                ..Default::default()
            },
            "local-0".to_string(),
            received_at(),
        );

        assert_eq!(record.kind, NotificationKind::OrderStatusUpdate);
        assert!(!record.is_read);
    }

    #[test]
    fn server_issued_id_wins_over_fallback() {
        let record = normalize(
            RawNotification {
                notification_id: Some("n-42".to_string()),
                ..Default::default()
            },
            "local-0".to_string(),
            received_at(),
        );

        assert_eq!(record.id, "n-42");
    }

    #[test]
    fn order_id_takes_precedence_over_related_id() {
        let record = normalize(
            RawNotification {
                order_id: Some("o-1".to_string()),
                related_id: Some("r-2".to_string()),
                ..Default::default()
            },
            "local-0".to_string(),
            received_at(),
        );

        assert_eq!(record.related_id.as_deref(), Some("o-1"));
    }

    #[test]
    fn missing_timestamp_uses_receive_time() {
        let supplied = Utc.with_ymd_and_hms(2024, 5, 13, 8, 0, 0).unwrap();

        let with_ts = normalize(
            RawNotification {
                created_at: Some(supplied),
                ..Default::default()
            },
            "local-0".to_string(),
            received_at(),
        );
        let without_ts = normalize(RawNotification::default(), "local-1".to_string(), received_at());

        assert_eq!(with_ts.created_at, supplied);
        assert_eq!(without_ts.created_at, received_at());
    }
}
