//! framelink core: transport-agnostic protocol primitives, mappers, and
//! error types.
//!
//! This crate defines the cross-frame wire contracts (envelope + event
//! taxonomy), the wire-to-domain mappers, and the error surface shared by
//! the client runtime and SDK tooling. It intentionally carries no transport
//! or runtime dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Everything arriving over the cross-frame channel is untrusted: malformed
//! envelopes are dropped, malformed variant payloads decode to defaulted
//! shapes, and no inbound bytes can make the SDK crash.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod context;
pub mod error;
pub mod normalize;
pub mod protocol;

pub use context::{Context, NAMESPACE, VERSION};
pub use error::{FramelinkError, Result};
