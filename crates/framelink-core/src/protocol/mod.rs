//! Cross-frame protocol: the message envelope and the event taxonomy.

pub mod envelope;
pub mod event;

pub use envelope::{is_envelope, Envelope};
pub use event::{
    AuthAction, ErrorName, ErrorPayload, Event, ExitPayload, ExitTrigger, SuccessPayload,
    WireToken,
};
