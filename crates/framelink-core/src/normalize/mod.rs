//! Wire-to-domain mappers.
//!
//! One total function per event variant: any payload matching the variant's
//! nominal shape maps to a normalized callback value, with an explicit
//! fallback for every optional field. `context` comes from the SDK's own
//! build identity, never from the incoming message.

pub mod transaction;
pub mod user;

pub use transaction::{extract_transaction, TransactionData};
pub use user::{extract_user_data, UserData};

use serde_json::{json, Value};

use crate::context::Context;
use crate::protocol::event::{
    ErrorName, ErrorPayload, ExitPayload, SuccessPayload, AUTH_SUCCESS,
};

/// Sentinel classification for wire errors that arrive without a code.
pub const DEFAULT_ERROR_CODE: &str = "500";

/// Terminal success, delivered to `on_success`.
#[derive(Debug, Clone, PartialEq)]
pub struct OnSuccessData {
    pub token: String,
    pub user_data: UserData,
    pub transaction: Option<TransactionData>,
    pub context: Context,
}

/// Terminal failure, delivered to `on_error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnErrorData {
    pub error_code: String,
    pub error_message: String,
    pub context: Context,
}

/// Terminal user exit, delivered to `on_exit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnExitData {
    pub step: Option<String>,
    pub trigger: Option<String>,
    pub context: Context,
}

/// Generic stream shape, delivered to `on_event` for every dispatched
/// message.
#[derive(Debug, Clone, PartialEq)]
pub struct OnEventData {
    pub kind: String,
    pub metadata: Value,
    pub context: Context,
}

/// Map a success payload to the terminal callback shape: token normalized
/// to the bare access token, user metadata flattened, transaction metadata
/// lifted when present.
pub fn map_to_on_success(payload: &SuccessPayload) -> OnSuccessData {
    OnSuccessData {
        token: payload.token.access_token().to_string(),
        user_data: extract_user_data(&payload.metadata),
        transaction: extract_transaction(&payload.transaction),
        context: Context::current(),
    }
}

/// Map an error payload. A missing code defaults to the sentinel
/// classification; a missing message to the unexpected-error name.
pub fn map_to_on_error(payload: &ErrorPayload) -> OnErrorData {
    OnErrorData {
        error_code: payload
            .error_code
            .clone()
            .unwrap_or_else(|| DEFAULT_ERROR_CODE.to_string()),
        error_message: payload
            .error_message
            .clone()
            .unwrap_or_else(|| ErrorName::UnexpectedError.as_str().to_string()),
        context: Context::current(),
    }
}

/// Map an exit payload. Step and trigger pass through; absence is valid.
pub fn map_to_on_exit(payload: &ExitPayload) -> OnExitData {
    OnExitData {
        step: payload.step.clone(),
        trigger: payload.trigger.clone(),
        context: Context::current(),
    }
}

/// Catch-all mapper for the generic stream: wraps the discriminant and the
/// payload's metadata member.
pub fn map_to_on_event(kind: &str, data: &Value) -> OnEventData {
    OnEventData {
        kind: kind.to_string(),
        metadata: data.get("metadata").cloned().unwrap_or(Value::Null),
        context: Context::current(),
    }
}

/// AUTH_SUCCESS's enriched generic shape: the metadata carries the
/// normalized user data and access token instead of the raw wire nesting.
pub fn map_auth_success_event(payload: &SuccessPayload) -> OnEventData {
    OnEventData {
        kind: AUTH_SUCCESS.to_string(),
        metadata: json!({
            "user_data": extract_user_data(&payload.metadata),
            "token": payload.token.access_token(),
        }),
        context: Context::current(),
    }
}
