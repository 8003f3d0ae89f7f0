//! Host-page seam.
//!
//! The SDK never touches a real DOM. The embedding layer (a wasm shim, a
//! webview bridge, or a test double) implements [`HostPage`] to deliver
//! cross-document messages, surface uncaught page faults, and mount/unmount
//! the overlay frame. Listener registration mirrors the three listeners the
//! router owns: messages, synchronous errors, asynchronous rejections.

use std::sync::Arc;

use serde_json::Value;
use url::Url;

use framelink_core::Result;

/// One message delivered by the cross-document channel.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Origin of the sending document. Checked before any payload
    /// inspection; this is the channel's sole authentication.
    pub origin: String,
    /// Structured-clone payload, as JSON.
    pub data: Value,
}

/// Uncaught page fault observed while listeners are attached.
#[derive(Debug, Clone)]
pub enum PageFault {
    /// Uncaught synchronous error.
    Error { message: String },
    /// Unhandled asynchronous rejection.
    Rejection { reason: String },
}

impl PageFault {
    pub fn message(&self) -> &str {
        match self {
            PageFault::Error { message } => message,
            PageFault::Rejection { reason } => reason,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PageFault::Error { .. } => "error",
            PageFault::Rejection { .. } => "unhandledrejection",
        }
    }
}

/// Opaque handle for listener removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

pub trait MessageListener: Send + Sync {
    fn on_message(&self, message: &InboundMessage);
}

pub trait FaultListener: Send + Sync {
    fn on_fault(&self, fault: &PageFault);
}

/// The embedding contract.
///
/// `remove_listener` must tolerate unknown ids, and both it and
/// `unmount_overlay` may be called from inside a listener invocation
/// (the router tears itself down on terminal exit).
pub trait HostPage: Send + Sync {
    fn add_message_listener(&self, listener: Arc<dyn MessageListener>) -> ListenerId;
    /// Listener for uncaught synchronous errors.
    fn add_error_listener(&self, listener: Arc<dyn FaultListener>) -> ListenerId;
    /// Listener for unhandled asynchronous rejections.
    fn add_rejection_listener(&self, listener: Arc<dyn FaultListener>) -> ListenerId;
    fn remove_listener(&self, id: ListenerId);

    /// Mount the overlay frame pointed at `url`.
    fn mount_overlay(&self, url: &Url) -> Result<()>;
    /// Remove the overlay frame. No-op when nothing is mounted.
    fn unmount_overlay(&self);
}
