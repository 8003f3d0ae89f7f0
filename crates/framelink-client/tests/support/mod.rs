//! Shared test doubles for the client integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use url::Url;

use framelink_client::auth::TokenIssuer;
use framelink_client::config::{ConnectConfig, Environment, FlowParams};
use framelink_client::page::{
    FaultListener, HostPage, InboundMessage, ListenerId, MessageListener, PageFault,
};
use framelink_client::sdk::ConnectSdk;
use framelink_core::Result;

/// Origin of the development flow URL; messages from here pass the gate.
pub const FLOW_ORIGIN: &str = "http://localhost:3000";

/// In-memory host page: records listener registrations and overlay mounts,
/// and lets tests push messages/faults through the channel.
#[derive(Default)]
pub struct FakePage {
    next_id: AtomicU64,
    message_listeners: Mutex<Vec<(ListenerId, Arc<dyn MessageListener>)>>,
    error_listeners: Mutex<Vec<(ListenerId, Arc<dyn FaultListener>)>>,
    rejection_listeners: Mutex<Vec<(ListenerId, Arc<dyn FaultListener>)>>,
    mounted: Mutex<Vec<Url>>,
    unmounts: AtomicU64,
}

impl FakePage {
    fn next(&self) -> ListenerId {
        ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Push one message at every registered message listener, as the
    /// browser channel would. Snapshots first so a listener may detach
    /// itself mid-delivery.
    pub fn deliver(&self, origin: &str, data: Value) {
        let message = InboundMessage {
            origin: origin.to_string(),
            data,
        };
        let snapshot: Vec<_> = self
            .message_listeners
            .lock()
            .unwrap()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in snapshot {
            listener.on_message(&message);
        }
    }

    pub fn raise_error(&self, message: &str) {
        let fault = PageFault::Error {
            message: message.to_string(),
        };
        let snapshot: Vec<_> = self
            .error_listeners
            .lock()
            .unwrap()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in snapshot {
            listener.on_fault(&fault);
        }
    }

    pub fn message_listener_count(&self) -> usize {
        self.message_listeners.lock().unwrap().len()
    }

    pub fn fault_listener_count(&self) -> usize {
        self.error_listeners.lock().unwrap().len() + self.rejection_listeners.lock().unwrap().len()
    }

    pub fn mounted_urls(&self) -> Vec<Url> {
        self.mounted.lock().unwrap().clone()
    }

    pub fn unmount_count(&self) -> u64 {
        self.unmounts.load(Ordering::Relaxed)
    }
}

impl HostPage for FakePage {
    fn add_message_listener(&self, listener: Arc<dyn MessageListener>) -> ListenerId {
        let id = self.next();
        self.message_listeners.lock().unwrap().push((id, listener));
        id
    }

    fn add_error_listener(&self, listener: Arc<dyn FaultListener>) -> ListenerId {
        let id = self.next();
        self.error_listeners.lock().unwrap().push((id, listener));
        id
    }

    fn add_rejection_listener(&self, listener: Arc<dyn FaultListener>) -> ListenerId {
        let id = self.next();
        self.rejection_listeners.lock().unwrap().push((id, listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.message_listeners
            .lock()
            .unwrap()
            .retain(|(lid, _)| *lid != id);
        self.error_listeners
            .lock()
            .unwrap()
            .retain(|(lid, _)| *lid != id);
        self.rejection_listeners
            .lock()
            .unwrap()
            .retain(|(lid, _)| *lid != id);
    }

    fn mount_overlay(&self, url: &Url) -> Result<()> {
        self.mounted.lock().unwrap().push(url.clone());
        Ok(())
    }

    fn unmount_overlay(&self) {
        self.unmounts.fetch_add(1, Ordering::Relaxed);
    }
}

/// Ordered record of callback invocations.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.entries()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }
}

/// Config whose callbacks append to `log`, tagged by callback name.
pub fn recording_config(log: &CallLog) -> ConnectConfig {
    let success = log.clone();
    let error = log.clone();
    let exit = log.clone();
    let event = log.clone();
    ConnectConfig {
        environment: Environment::Development,
        bearer_token: "test-bearer".into(),
        on_success: Some(Box::new(move |d| {
            success.push(format!("on_success:{}", d.token));
        })),
        on_error: Some(Box::new(move |d| {
            error.push(format!("on_error:{}:{}", d.error_code, d.error_message));
        })),
        on_exit: Some(Box::new(move |d| {
            exit.push(format!("on_exit:{}", d.step.clone().unwrap_or_default()));
        })),
        on_event: Some(Box::new(move |d| {
            event.push(format!("on_event:{}", d.kind));
        })),
    }
}

/// Token issuer returning a fixed token, no network.
pub struct StaticIssuer(pub String);

#[async_trait]
impl TokenIssuer for StaticIssuer {
    async fn create_token(&self, _params: &FlowParams) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// SDK against a fresh fake page, opened with a static `tok-1` flow token.
pub async fn open_sdk(log: &CallLog) -> (Arc<ConnectSdk>, Arc<FakePage>) {
    let page = Arc::new(FakePage::default());
    let sdk = ConnectSdk::with_parts(
        recording_config(log),
        Arc::clone(&page) as Arc<dyn HostPage>,
        Some(Arc::new(StaticIssuer("tok-1".into()))),
        None,
    )
    .unwrap();
    sdk.open_with_params(&FlowParams::default()).await.unwrap();
    (sdk, page)
}

/// Wire envelope builder.
pub fn envelope(kind: &str, data: Value) -> Value {
    json!({ "type": kind, "data": data })
}
