//! framelink client runtime.
//!
//! This crate wires the host-page seam, message router, typed emitter,
//! tracker/metrics side channels, auth token client, and the SDK facade
//! into a cohesive stack. It is intended to be consumed by embedders via
//! the `framelink` facade crate and by integration tests.

pub mod auth;
pub mod config;
pub mod emitter;
pub mod obs;
pub mod page;
pub mod router;
pub mod sdk;
pub mod track;

pub use config::{Callbacks, ConnectConfig, Environment, FlowParams};
pub use sdk::ConnectSdk;
