//! Minimal metrics registry for the SDK.
//!
//! No external metrics dependency; counters and gauges with dynamic labels
//! are backed by `DashMap`. Labels are flattened into sorted key vectors to
//! keep deterministic ordering. Rendering uses the Prometheus text
//! exposition format so embedders can forward the output anywhere.

use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use dashmap::DashMap;

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    key.sort();
    key
}

fn render_labels(key: &[(String, String)]) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for an exact label set (0 when never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} counter");
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{name}{{{}}} {val}", render_labels(r.key()));
        }
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<Vec<(String, String)>, AtomicI64>,
}

impl GaugeVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Decrement by 1.
    pub fn dec(&self, labels: &[(&str, &str)]) {
        self.add(labels, -1);
    }

    /// Add an arbitrary signed delta.
    pub fn add(&self, labels: &[(&str, &str)], v: i64) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicI64::new(0));
        gauge.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for an exact label set.
    pub fn get(&self, labels: &[(&str, &str)]) -> i64 {
        self.map
            .get(&label_key(labels))
            .map(|g| g.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} gauge");
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{name}{{{}}} {val}", render_labels(r.key()));
        }
    }
}

/// Counters for one SDK instance.
#[derive(Default)]
pub struct SdkMetrics {
    /// Admitted envelopes, labeled by `kind`.
    pub messages_received: CounterVec,
    /// Gate drops, labeled by `reason`.
    pub messages_dropped: CounterVec,
    /// Host callback invocations, labeled by `callback`.
    pub callbacks_invoked: CounterVec,
    /// Host callbacks that panicked, labeled by `callback`.
    pub callback_faults: CounterVec,
    /// Uncaught page faults, labeled by `kind`.
    pub page_faults: CounterVec,
    /// Overlay open/closed state (0 or 1 for a single SDK instance).
    pub overlay_active: GaugeVec,
}

impl SdkMetrics {
    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.messages_received
            .render("framelink_messages_received_total", &mut out);
        self.messages_dropped
            .render("framelink_messages_dropped_total", &mut out);
        self.callbacks_invoked
            .render("framelink_callbacks_invoked_total", &mut out);
        self.callback_faults
            .render("framelink_callback_faults_total", &mut out);
        self.page_faults
            .render("framelink_page_faults_total", &mut out);
        self.overlay_active
            .render("framelink_overlay_active", &mut out);
        out
    }
}
