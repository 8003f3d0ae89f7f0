//! Typed fan-out bus.
//!
//! Hosts that want per-kind handlers instead of a single generic callback
//! subscribe here. `on` returns a disposer-style [`Subscription`]; dropping
//! it (or calling `cancel`) detaches the handler. A `"*"` subscription
//! receives every emission.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;

use framelink_core::normalize::OnEventData;

use crate::track::Tracker;

/// Catch-all kind receiving every emission.
pub const ANY: &str = "*";

type Handler = Arc<dyn Fn(&OnEventData) + Send + Sync>;

pub struct EventEmitter {
    handlers: DashMap<String, Vec<(u64, Handler)>>,
    next_id: AtomicU64,
    tracker: Arc<dyn Tracker>,
}

/// Detaches its handler when dropped.
#[must_use = "dropping the subscription detaches the handler"]
pub struct Subscription {
    emitter: Weak<EventEmitter>,
    kind: String,
    id: u64,
}

impl Subscription {
    /// Explicit detach; equivalent to dropping.
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(emitter) = self.emitter.upgrade() {
            emitter.remove(&self.kind, self.id);
        }
    }
}

impl EventEmitter {
    pub fn new(tracker: Arc<dyn Tracker>) -> Arc<Self> {
        Arc::new(Self {
            handlers: DashMap::new(),
            next_id: AtomicU64::new(1),
            tracker,
        })
    }

    /// Attach a handler for one event kind (or [`ANY`]).
    pub fn on(
        self: &Arc<Self>,
        kind: &str,
        handler: impl Fn(&OnEventData) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.handlers
            .entry(kind.to_string())
            .or_default()
            .push((id, Arc::new(handler)));
        Subscription {
            emitter: Arc::downgrade(self),
            kind: kind.to_string(),
            id,
        }
    }

    fn remove(&self, kind: &str, id: u64) {
        if let Some(mut entry) = self.handlers.get_mut(kind) {
            entry.retain(|(hid, _)| *hid != id);
        }
    }

    /// Invoke the kind's handlers, then the catch-all set.
    pub fn emit(&self, data: &OnEventData) {
        self.fan_out(&data.kind, data);
        self.fan_out(ANY, data);
    }

    fn fan_out(&self, kind: &str, data: &OnEventData) {
        // Snapshot before invoking so a handler may subscribe or cancel
        // without holding the shard lock.
        let snapshot: Vec<Handler> = self
            .handlers
            .get(kind)
            .map(|entry| entry.iter().map(|(_, h)| Arc::clone(h)).collect())
            .unwrap_or_default();
        for handler in snapshot {
            if catch_unwind(AssertUnwindSafe(|| handler(data))).is_err() {
                self.tracker.track_error("event handler panicked");
                tracing::warn!(kind, "event handler panicked");
            }
        }
    }
}
