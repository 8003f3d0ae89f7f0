//! Message router: listener lifecycle and the dispatch protocol.
//!
//! One router instance per SDK instance; the stored state is just
//! armed/disarmed. The interesting part is dispatch: every admitted message
//! first publishes to the generic stream (emitter bus + `on_event`), then
//! conditionally invokes the narrow terminal callback for its variant.
//!
//! Lifecycle rules:
//! - `arm` / `disarm` are idempotent; double-arming must not double-register
//!   (a doubled listener double-fires callbacks).
//! - `disarm` is safe to call from inside a dispatched callback.
//! - A panicking host callback is caught and reported; it never takes the
//!   listener down.

mod gate;

pub use gate::{DropReason, Gate};

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use framelink_core::normalize::{self, OnEventData};
use framelink_core::protocol::event::AuthAction;
use framelink_core::protocol::{Envelope, Event};

use crate::config::Callbacks;
use crate::emitter::EventEmitter;
use crate::obs::SdkMetrics;
use crate::page::{
    FaultListener, HostPage, InboundMessage, ListenerId, MessageListener, PageFault,
};
use crate::track::Tracker;

type CloseFn = Arc<dyn Fn() + Send + Sync>;

struct ListenerSet {
    page: Arc<dyn HostPage>,
    message: ListenerId,
    error: ListenerId,
    rejection: ListenerId,
}

pub struct MessageRouter {
    gate: Gate,
    callbacks: Callbacks,
    emitter: Arc<EventEmitter>,
    tracker: Arc<dyn Tracker>,
    metrics: Arc<SdkMetrics>,
    /// Set by the facade after construction; invoked on terminal exit.
    close: Mutex<Option<CloseFn>>,
    armed: AtomicBool,
    listeners: Mutex<Option<ListenerSet>>,
}

/// Routes page faults to the tracker side channel, never into message
/// dispatch.
struct FaultRelay {
    tracker: Arc<dyn Tracker>,
    metrics: Arc<SdkMetrics>,
}

impl FaultListener for FaultRelay {
    fn on_fault(&self, fault: &PageFault) {
        self.metrics.page_faults.inc(&[("kind", fault.kind())]);
        self.tracker.track_error(fault.message());
        tracing::warn!(kind = fault.kind(), "uncaught page fault");
    }
}

impl MessageRouter {
    pub fn new(
        gate: Gate,
        callbacks: Callbacks,
        emitter: Arc<EventEmitter>,
        tracker: Arc<dyn Tracker>,
        metrics: Arc<SdkMetrics>,
    ) -> Arc<Self> {
        Arc::new(Self {
            gate,
            callbacks,
            emitter,
            tracker,
            metrics,
            close: Mutex::new(None),
            armed: AtomicBool::new(false),
            listeners: Mutex::new(None),
        })
    }

    /// Install the overlay-close hook. Kept out of the constructor so the
    /// facade can wire a cycle-free weak reference to itself.
    pub fn set_close(&self, close: CloseFn) {
        if let Ok(mut slot) = self.close.lock() {
            *slot = Some(close);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }

    /// Attach the message listener and both fault listeners. No-op when
    /// already armed.
    pub fn arm(self: &Arc<Self>, page: &Arc<dyn HostPage>) {
        if self
            .armed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        let relay = Arc::new(FaultRelay {
            tracker: Arc::clone(&self.tracker),
            metrics: Arc::clone(&self.metrics),
        });

        let message = page.add_message_listener(Arc::clone(self) as Arc<dyn MessageListener>);
        let error = page.add_error_listener(Arc::clone(&relay) as Arc<dyn FaultListener>);
        let rejection = page.add_rejection_listener(relay);

        if let Ok(mut slot) = self.listeners.lock() {
            *slot = Some(ListenerSet {
                page: Arc::clone(page),
                message,
                error,
                rejection,
            });
        }
        tracing::info!(origin = self.gate.expected_origin(), "router armed");
    }

    /// Remove all listeners. No-op when already disarmed; safe to call from
    /// inside a dispatched callback.
    pub fn disarm(&self) {
        if self
            .armed
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        let set = match self.listeners.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        if let Some(set) = set {
            set.page.remove_listener(set.message);
            set.page.remove_listener(set.error);
            set.page.remove_listener(set.rejection);
        }
        tracing::info!("router disarmed");
    }

    /// Gate then dispatch one inbound message.
    pub fn handle_message(&self, message: &InboundMessage) {
        if !self.is_armed() {
            self.drop_message(DropReason::Disarmed);
            return;
        }

        let envelope = match self.gate.admit(&message.origin, &message.data) {
            Ok(envelope) => envelope,
            Err(reason) => {
                self.drop_message(reason);
                return;
            }
        };

        self.metrics
            .messages_received
            .inc(&[("kind", envelope.kind.as_str())]);
        self.tracker.message_received(&envelope);
        self.dispatch(&envelope);
    }

    fn drop_message(&self, reason: DropReason) {
        self.metrics
            .messages_dropped
            .inc(&[("reason", reason.as_str())]);
        tracing::debug!(reason = reason.as_str(), "inbound message dropped");
    }

    /// Exhaustive dispatch over the event set. Generic stream first, then
    /// the terminal callback for the variants that have one.
    fn dispatch(&self, envelope: &Envelope) {
        match envelope.decode() {
            Event::AuthSuccess(payload) => {
                // Intermediate signal: generic stream only.
                self.publish(normalize::map_auth_success_event(&payload));
            }
            Event::FlowExit(payload) => {
                self.publish(normalize::map_to_on_event(&envelope.kind, &envelope.data));
                let data = normalize::map_to_on_exit(&payload);
                if let Some(on_exit) = &self.callbacks.on_exit {
                    self.invoke("on_exit", || on_exit(data.clone()));
                }
                // Exit is always terminal, regardless of payload content.
                self.request_close();
            }
            Event::FlowSuccess(payload) => {
                self.publish(normalize::map_to_on_event(&envelope.kind, &envelope.data));
                // Only the connect flow resolves the narrow success
                // contract; transfer/redeem completions stay on the
                // generic stream.
                if payload.action == AuthAction::Connect {
                    let data = normalize::map_to_on_success(&payload);
                    if let Some(on_success) = &self.callbacks.on_success {
                        self.invoke("on_success", || on_success(data.clone()));
                    }
                }
            }
            Event::Error(payload) => {
                self.publish(normalize::map_to_on_event(&envelope.kind, &envelope.data));
                let data = normalize::map_to_on_error(&payload);
                if let Some(on_error) = &self.callbacks.on_error {
                    self.invoke("on_error", || on_error(data.clone()));
                }
            }
            Event::Generic(data) => {
                self.publish(normalize::map_to_on_event(&envelope.kind, &data));
            }
            Event::Unknown { kind, data } => {
                self.publish(normalize::map_to_on_event(&kind, &data));
            }
        }
    }

    /// Generic stream: emitter bus first, then the host's `on_event`.
    fn publish(&self, data: OnEventData) {
        self.emitter.emit(&data);
        if let Some(on_event) = &self.callbacks.on_event {
            self.invoke("on_event", || on_event(data.clone()));
        }
    }

    /// Host callback boundary. A panicking callback must not take down the
    /// listener or leave the router disarmed.
    fn invoke(&self, name: &'static str, f: impl FnOnce()) {
        self.metrics.callbacks_invoked.inc(&[("callback", name)]);
        if catch_unwind(AssertUnwindSafe(f)).is_err() {
            self.metrics.callback_faults.inc(&[("callback", name)]);
            self.tracker
                .track_error(&format!("host callback {name} panicked"));
            tracing::warn!(callback = name, "host callback panicked");
        }
    }

    fn request_close(&self) {
        let close = match self.close.lock() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        };
        if let Some(close) = close {
            close();
        }
    }
}

impl MessageListener for MessageRouter {
    fn on_message(&self, message: &InboundMessage) {
        self.handle_message(message);
    }
}
