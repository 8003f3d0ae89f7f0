//! Event taxonomy over the cross-frame channel.
//!
//! Decoding rules:
//! - Every field read has an explicit fallback; a malformed variant payload
//!   decodes to a defaulted shape, it is never an error.
//! - Never `unwrap()` / `expect()` / `panic!()` on inbound values.

use serde_json::Value;

/// Wire tag: intermediate success signal during the flow.
pub const AUTH_SUCCESS: &str = "AUTH_SUCCESS";
/// Wire tag: terminal user-initiated exit.
pub const FLOW_EXIT: &str = "FLOW_EXIT";
/// Wire tag: terminal success for the flow tagged by `action`.
pub const FLOW_SUCCESS: &str = "FLOW_SUCCESS";
/// Wire tag: known generic event bucket.
pub const EVENT: &str = "EVENT";
/// Wire tag: terminal failure.
pub const ERROR: &str = "ERROR";

/// The closed event set. Dispatch matches exhaustively, so adding a variant
/// is a compile error at every match site.
#[derive(Debug, Clone)]
pub enum Event {
    /// Intermediate success; forwarded generically, never terminal.
    AuthSuccess(SuccessPayload),
    /// Terminal success for the sub-flow tagged by `action`.
    FlowSuccess(SuccessPayload),
    /// Terminal user-initiated exit.
    FlowExit(ExitPayload),
    /// Terminal failure.
    Error(ErrorPayload),
    /// Known generic bucket; payload passed through.
    Generic(Value),
    /// Anything outside the fixed set; forwarded generically as-is.
    Unknown { kind: String, data: Value },
}

impl Event {
    /// Decode a variant payload for a given discriminant. Total: unknown
    /// discriminants land in [`Event::Unknown`], malformed payloads in
    /// defaulted shapes.
    pub fn decode(kind: &str, data: &Value) -> Self {
        match kind {
            AUTH_SUCCESS => Event::AuthSuccess(SuccessPayload::from_value(data)),
            FLOW_SUCCESS => Event::FlowSuccess(SuccessPayload::from_value(data)),
            FLOW_EXIT => Event::FlowExit(ExitPayload::from_value(data)),
            ERROR => Event::Error(ErrorPayload::from_value(data)),
            EVENT => Event::Generic(data.clone()),
            other => Event::Unknown {
                kind: other.to_string(),
                data: data.clone(),
            },
        }
    }
}

/// Sub-flow discriminator on success events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthAction {
    Connect,
    Transfer,
    Redeem,
    #[default]
    Unknown,
}

impl AuthAction {
    /// Parse a wire action tag; anything unrecognized is `Unknown`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "connect" => AuthAction::Connect,
            "transfer" => AuthAction::Transfer,
            "redeem" => AuthAction::Redeem,
            _ => AuthAction::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AuthAction::Connect => "connect",
            AuthAction::Transfer => "transfer",
            AuthAction::Redeem => "redeem",
            AuthAction::Unknown => "unknown",
        }
    }
}

/// Known exit triggers. The wire value is passed through to callbacks
/// verbatim; this classification exists for hosts that want to branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitTrigger {
    ActionButtonClicked,
    /// Deprecated upstream, still emitted by older flow builds.
    BackToMerchantClicked,
    CloseButtonClicked,
    TappedOutOfBounds,
}

impl ExitTrigger {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ACTION_BUTTON_CLICKED" => Some(ExitTrigger::ActionButtonClicked),
            "BACK_TO_MERCHANT_CLICKED" => Some(ExitTrigger::BackToMerchantClicked),
            "CLOSE_BUTTON_CLICKED" => Some(ExitTrigger::CloseButtonClicked),
            "TAPPED_OUT_OF_BOUNDS" => Some(ExitTrigger::TappedOutOfBounds),
            _ => None,
        }
    }
}

/// Stable names for wire-level error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorName {
    UnexpectedError,
    PartnerConnectError,
}

impl ErrorName {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorName::UnexpectedError => "unexpected_error",
            ErrorName::PartnerConnectError => "partner_connect_error",
        }
    }
}

/// Raw token as delivered by the flow: either a bare access token or an
/// access/refresh pair.
#[derive(Debug, Clone)]
pub enum WireToken {
    Bare(String),
    Pair {
        access_token: String,
        refresh_token: Option<String>,
    },
}

impl Default for WireToken {
    fn default() -> Self {
        WireToken::Bare(String::new())
    }
}

impl WireToken {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => WireToken::Bare(s.clone()),
            Value::Object(obj) => WireToken::Pair {
                access_token: obj
                    .get("access_token")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                refresh_token: obj
                    .get("refresh_token")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            _ => WireToken::default(),
        }
    }

    /// The normalized access token. The refresh half never crosses the
    /// callback boundary; it stops at this layer.
    pub fn access_token(&self) -> &str {
        match self {
            WireToken::Bare(token) => token,
            WireToken::Pair { access_token, .. } => access_token,
        }
    }
}

/// Payload for `AUTH_SUCCESS` and `FLOW_SUCCESS`.
#[derive(Debug, Clone, Default)]
pub struct SuccessPayload {
    pub action: AuthAction,
    pub token: WireToken,
    /// Raw user/status metadata; normalized by the mappers.
    pub metadata: Value,
    /// Raw transaction metadata; normalized by the mappers.
    pub transaction: Value,
}

impl SuccessPayload {
    pub fn from_value(value: &Value) -> Self {
        Self {
            action: value
                .get("action")
                .and_then(Value::as_str)
                .map(AuthAction::from_tag)
                .unwrap_or_default(),
            token: value
                .get("token")
                .map(WireToken::from_value)
                .unwrap_or_default(),
            metadata: value.get("metadata").cloned().unwrap_or(Value::Null),
            transaction: value.get("transaction").cloned().unwrap_or(Value::Null),
        }
    }
}

/// Payload for `FLOW_EXIT`. Both fields are optional; absence is valid.
#[derive(Debug, Clone, Default)]
pub struct ExitPayload {
    pub step: Option<String>,
    pub trigger: Option<String>,
}

impl ExitPayload {
    pub fn from_value(value: &Value) -> Self {
        Self {
            step: str_field(value, "step"),
            trigger: str_field(value, "trigger"),
        }
    }

    /// Classify the raw trigger tag, when it is a known one.
    pub fn trigger_kind(&self) -> Option<ExitTrigger> {
        self.trigger.as_deref().and_then(ExitTrigger::from_tag)
    }
}

/// Payload for `ERROR`. Flow builds have shipped both snake_case and
/// camelCase field names, and some wrap the message in an `error` object;
/// all three are honored.
#[derive(Debug, Clone, Default)]
pub struct ErrorPayload {
    pub error_code: Option<String>,
    pub error_message: Option<String>,
}

impl ErrorPayload {
    pub fn from_value(value: &Value) -> Self {
        Self {
            error_code: str_field(value, "error_code").or_else(|| str_field(value, "errorCode")),
            error_message: str_field(value, "error_message")
                .or_else(|| str_field(value, "errorMessage"))
                .or_else(|| {
                    value
                        .get("error")
                        .and_then(|err| str_field(err, "message"))
                }),
        }
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}
