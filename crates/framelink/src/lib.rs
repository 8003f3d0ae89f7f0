//! Top-level facade crate for framelink.
//!
//! Re-exports the protocol primitives and the client runtime so embedders
//! can depend on a single crate.

pub mod core {
    pub use framelink_core::*;
}

pub mod client {
    pub use framelink_client::*;
}

pub use framelink_client::{Callbacks, ConnectConfig, ConnectSdk, Environment, FlowParams};
