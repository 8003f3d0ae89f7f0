//! SDK facade: configuration wiring and overlay/flow lifecycle.
//!
//! The facade owns the two pieces of mutable state the whole interaction
//! has: whether an overlay is mounted, and the last issued flow token. Both
//! are updated together with their side effects so listeners and overlays
//! can never leak.

use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use url::Url;

use framelink_core::{FramelinkError, Result, NAMESPACE, VERSION};

use crate::auth::{AuthClient, TokenIssuer};
use crate::config::{Callbacks, ConnectConfig, Endpoints, FlowParams};
use crate::emitter::EventEmitter;
use crate::obs::SdkMetrics;
use crate::page::HostPage;
use crate::router::{Gate, MessageRouter};
use crate::track::{NoopTracker, Tracker};

/// Query parameter carrying the flow token in the frame URL.
const CODE_PARAM: &str = "code";
/// Cache-busting timestamp parameter.
const TS_PARAM: &str = "t";

pub struct ConnectSdk {
    endpoints: Endpoints,
    issuer: Arc<dyn TokenIssuer>,
    page: Arc<dyn HostPage>,
    router: Arc<MessageRouter>,
    emitter: Arc<EventEmitter>,
    metrics: Arc<SdkMetrics>,
    tracker: Arc<dyn Tracker>,
    flow_token: Mutex<Option<String>>,
    overlay_open: Mutex<bool>,
}

impl std::fmt::Debug for ConnectSdk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectSdk")
            .field("endpoints", &self.endpoints)
            .field("flow_token", &self.flow_token)
            .field("overlay_open", &self.overlay_open)
            .finish_non_exhaustive()
    }
}

impl ConnectSdk {
    /// Build an SDK instance. Fails fast on misconfiguration: missing bearer
    /// credential or missing required callbacks are construction errors,
    /// not flow-time surprises.
    pub fn new(config: ConnectConfig, page: Arc<dyn HostPage>) -> Result<Arc<Self>> {
        Self::with_parts(config, page, None, None)
    }

    /// Construction seam for tests and custom embeddings: inject a token
    /// issuer and/or tracker. `None` selects the reqwest-backed client and
    /// the no-op tracker.
    pub fn with_parts(
        config: ConnectConfig,
        page: Arc<dyn HostPage>,
        issuer: Option<Arc<dyn TokenIssuer>>,
        tracker: Option<Arc<dyn Tracker>>,
    ) -> Result<Arc<Self>> {
        config.validate()?;

        let endpoints = Endpoints::resolve(config.environment)?;
        let tracker: Arc<dyn Tracker> = tracker.unwrap_or_else(|| Arc::new(NoopTracker));
        let metrics = Arc::new(SdkMetrics::default());
        let emitter = EventEmitter::new(Arc::clone(&tracker));

        let issuer: Arc<dyn TokenIssuer> = match issuer {
            Some(issuer) => issuer,
            None => Arc::new(AuthClient::new(
                endpoints.auth_service_url.clone(),
                config.bearer_token.clone(),
            )?),
        };

        let gate = Gate::new(
            endpoints.expected_origin(),
            Some(NAMESPACE.to_string()),
            Some(VERSION.to_string()),
        );
        let callbacks = Callbacks {
            on_success: config.on_success,
            on_error: config.on_error,
            on_exit: config.on_exit,
            on_event: config.on_event,
        };
        let router = MessageRouter::new(
            gate,
            callbacks,
            Arc::clone(&emitter),
            Arc::clone(&tracker),
            Arc::clone(&metrics),
        );

        let sdk = Arc::new(Self {
            endpoints,
            issuer,
            page,
            router: Arc::clone(&router),
            emitter,
            metrics,
            tracker,
            flow_token: Mutex::new(None),
            overlay_open: Mutex::new(false),
        });

        // Weak hook so router -> facade does not cycle; the router closes
        // the overlay on terminal exit through this.
        let weak = Arc::downgrade(&sdk);
        router.set_close(Arc::new(move || {
            if let Some(sdk) = weak.upgrade() {
                sdk.close();
            }
        }));

        Ok(sdk)
    }

    /// Request a fresh flow token. Each call re-requests; nothing is cached.
    ///
    /// A `close()` racing this request is harmless: the token is only
    /// stored, never acted on, until the next `open()`.
    pub async fn initialize(&self, params: &FlowParams) -> Result<()> {
        let token = self.issuer.create_token(params).await?;
        if let Ok(mut slot) = self.flow_token.lock() {
            *slot = Some(token);
        }
        Ok(())
    }

    /// `initialize` then `open`.
    pub async fn open_with_params(&self, params: &FlowParams) -> Result<()> {
        self.initialize(params).await?;
        self.open()
    }

    /// Mount the overlay and arm the router. No-op when an overlay is
    /// already displayed: at most one overlay per SDK instance.
    pub fn open(&self) -> Result<()> {
        let mut open = self
            .overlay_open
            .lock()
            .map_err(|_| FramelinkError::Internal("overlay state poisoned".into()))?;
        if *open {
            return Ok(());
        }

        let token = self
            .flow_token
            .lock()
            .map_err(|_| FramelinkError::Internal("token state poisoned".into()))?
            .clone()
            .ok_or(FramelinkError::TokenMissing)?;

        let url = self.flow_url(&token);
        self.page.mount_overlay(&url)?;
        *open = true;
        drop(open);

        self.router.arm(&self.page);
        self.metrics.overlay_active.inc(&[]);
        self.tracker
            .track_event("overlay_opened", &serde_json::json!({}));
        tracing::info!("overlay opened");
        Ok(())
    }

    /// Disarm the router and remove the overlay. No-op when nothing is
    /// open; safe to call repeatedly and from inside a router-dispatched
    /// callback. Never invokes `on_exit` itself — the router owns that on
    /// terminal exit.
    pub fn close(&self) {
        let was_open = {
            let mut open = match self.overlay_open.lock() {
                Ok(guard) => guard,
                Err(_) => return,
            };
            std::mem::replace(&mut *open, false)
        };
        if !was_open {
            return;
        }

        self.router.disarm();
        self.page.unmount_overlay();
        self.metrics.overlay_active.dec(&[]);
        self.tracker
            .track_event("overlay_closed", &serde_json::json!({}));
        tracing::info!("overlay closed");
    }

    /// Teardown alias for host unmount paths: guarantees `close()` runs if
    /// anything is open.
    pub fn cleanup(&self) {
        self.close();
    }

    pub fn is_open(&self) -> bool {
        self.overlay_open.lock().map(|g| *g).unwrap_or(false)
    }

    /// Per-kind subscription surface (typed fan-out bus).
    pub fn events(&self) -> &Arc<EventEmitter> {
        &self.emitter
    }

    pub fn metrics(&self) -> &SdkMetrics {
        &self.metrics
    }

    fn flow_url(&self, token: &str) -> Url {
        let mut url = self.endpoints.flow_url.clone();
        url.query_pairs_mut()
            .append_pair(CODE_PARAM, token)
            .append_pair(TS_PARAM, &unix_millis().to_string());
        url
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
