//! Analytics / error side channel.
//!
//! Trackers are opaque sinks: the router reports every admitted message,
//! host-callback faults, and uncaught page faults here; the facade reports
//! lifecycle events. Embedders plug their own backend in (crash reporter,
//! product analytics); nothing in the SDK depends on what the sink does.

use serde_json::{json, Value};

use framelink_core::protocol::Envelope;

pub trait Tracker: Send + Sync {
    /// An admitted envelope, before dispatch.
    fn message_received(&self, envelope: &Envelope) {
        self.track_event("message_received", &json!({ "type": envelope.kind }));
    }

    /// Structured analytics event.
    fn track_event(&self, name: &str, properties: &Value);

    /// Error side channel.
    fn track_error(&self, message: &str);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracker;

impl Tracker for NoopTracker {
    fn track_event(&self, _name: &str, _properties: &Value) {}
    fn track_error(&self, _message: &str) {}
}

/// Forwards to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceTracker;

impl Tracker for TraceTracker {
    fn track_event(&self, name: &str, properties: &Value) {
        tracing::info!(event = name, %properties, "track");
    }

    fn track_error(&self, message: &str) {
        tracing::warn!(%message, "track error");
    }
}
