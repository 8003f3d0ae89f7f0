//! Configuration schema (strict validation at construction).

use framelink_core::normalize::{OnErrorData, OnEventData, OnExitData, OnSuccessData};
use framelink_core::{FramelinkError, Result};

/// Deployment environment selecting token-service and flow endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Sandbox,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
        }
    }
}

/// Terminal success callback.
pub type SuccessCallback = Box<dyn Fn(OnSuccessData) + Send + Sync>;
/// Terminal error callback.
pub type ErrorCallback = Box<dyn Fn(OnErrorData) + Send + Sync>;
/// Terminal exit callback.
pub type ExitCallback = Box<dyn Fn(OnExitData) + Send + Sync>;
/// Generic event-stream callback.
pub type EventCallback = Box<dyn Fn(OnEventData) + Send + Sync>;

/// Host-supplied configuration for one SDK instance.
///
/// `on_success` and `on_exit` are required; `on_error` is strongly
/// recommended; `on_event` opts into the generic firehose.
pub struct ConnectConfig {
    pub environment: Environment,
    pub bearer_token: String,
    pub on_success: Option<SuccessCallback>,
    pub on_error: Option<ErrorCallback>,
    pub on_exit: Option<ExitCallback>,
    pub on_event: Option<EventCallback>,
}

impl ConnectConfig {
    /// Fail fast on misconfiguration: a broken SDK must be unbuildable, not
    /// silently degraded at flow time.
    pub fn validate(&self) -> Result<()> {
        if self.bearer_token.trim().is_empty() {
            return Err(FramelinkError::Config("bearer_token is required".into()));
        }
        if self.on_success.is_none() {
            return Err(FramelinkError::Config(
                "on_success callback is required".into(),
            ));
        }
        if self.on_exit.is_none() {
            return Err(FramelinkError::Config("on_exit callback is required".into()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ConnectConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectConfig")
            .field("environment", &self.environment)
            .field("bearer_token", &"<redacted>")
            .field("on_success", &self.on_success.as_ref().map(|_| "<callback>"))
            .field("on_error", &self.on_error.as_ref().map(|_| "<callback>"))
            .field("on_exit", &self.on_exit.as_ref().map(|_| "<callback>"))
            .field("on_event", &self.on_event.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

/// The callback set handed to the router once validation has passed.
pub struct Callbacks {
    pub on_success: Option<SuccessCallback>,
    pub on_error: Option<ErrorCallback>,
    pub on_exit: Option<ExitCallback>,
    pub on_event: Option<EventCallback>,
}

/// Parameters for the token request that bootstraps one flow.
#[derive(Debug, Clone, Default)]
pub struct FlowParams {
    pub user_external_id: Option<String>,
    pub partner_id: Option<String>,
    pub merchant_id: Option<String>,
    pub display_name: Option<String>,
    pub partnership_id: Option<String>,
    /// Flow mode; defaults to the connect mode when unset.
    pub mode: Option<u8>,
}
