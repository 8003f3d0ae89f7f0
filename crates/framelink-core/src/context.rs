//! Build-time SDK identity.
//!
//! Every normalized callback payload carries the SDK's own namespace and
//! version. Incoming namespace/version tags are used only for filtering and
//! are never echoed back through this context.

use serde::Serialize;

/// Protocol namespace tag stamped on the SDK's own traffic.
pub const NAMESPACE: &str = "framelink-sdk";

/// SDK version, fixed at build time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identity attached to every normalized callback payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Context {
    pub namespace: String,
    pub version: String,
}

impl Context {
    /// The current build's identity.
    pub fn current() -> Self {
        Self {
            namespace: NAMESPACE.to_string(),
            version: VERSION.to_string(),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::current()
    }
}
