use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub channel_events_total: IntCounterVec,
    pub api_requests_total: IntCounterVec,
    pub channel_reconnects_total: IntCounter,
    pub notifications_unread: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let channel_events_total = IntCounterVec::new(
            Opts::new("channel_events_total", "Real-time events received by kind"),
            &["kind"],
        )
        .expect("valid channel_events_total metric");

        let api_requests_total = IntCounterVec::new(
            Opts::new("api_requests_total", "REST requests by outcome"),
            &["outcome"],
        )
        .expect("valid api_requests_total metric");

        let channel_reconnects_total = IntCounter::new(
            "channel_reconnects_total",
            "Reconnection attempts to the real-time channel",
        )
        .expect("valid channel_reconnects_total metric");

        let notifications_unread = IntGauge::new(
            "notifications_unread",
            "Current number of unread notifications",
        )
        .expect("valid notifications_unread metric");

        registry
            .register(Box::new(channel_events_total.clone()))
            .expect("register channel_events_total");
        registry
            .register(Box::new(api_requests_total.clone()))
            .expect("register api_requests_total");
        registry
            .register(Box::new(channel_reconnects_total.clone()))
            .expect("register channel_reconnects_total");
        registry
            .register(Box::new(notifications_unread.clone()))
            .expect("register notifications_unread");

        Self {
            registry,
            channel_events_total,
            api_requests_total,
            channel_reconnects_total,
            notifications_unread,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
