//! SDK configuration: environment/endpoint resolution and strict
//! construction-time validation.

pub mod schema;

pub use schema::{
    Callbacks, ConnectConfig, Environment, ErrorCallback, EventCallback, ExitCallback,
    FlowParams, SuccessCallback,
};

use url::Url;

use framelink_core::{FramelinkError, Result};

/// Env var overriding the token-service base URL.
pub const AUTH_SERVICE_URL_VAR: &str = "FRAMELINK_AUTH_SERVICE_URL";
/// Env var overriding the embedded-flow base URL.
pub const FLOW_URL_VAR: &str = "FRAMELINK_FLOW_URL";

/// Resolved base URLs for one deployment environment.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Token service (bearer-authed `POST /verify/token/create`).
    pub auth_service_url: Url,
    /// Embedded flow (the overlay frame's src).
    pub flow_url: Url,
}

impl Endpoints {
    /// Resolve per environment, honoring env-var overrides.
    pub fn resolve(environment: Environment) -> Result<Self> {
        let (auth_service, flow) = match environment {
            Environment::Production => (
                "https://authservice.framelink.io",
                "https://verify.framelink.io",
            ),
            Environment::Sandbox => (
                "https://authservice-staging.framelink.io",
                "https://verify-staging.framelink.io",
            ),
            Environment::Development => (
                "https://authservice-staging.framelink.io",
                "http://localhost:3000",
            ),
        };
        Ok(Self {
            auth_service_url: override_or(AUTH_SERVICE_URL_VAR, auth_service)?,
            flow_url: override_or(FLOW_URL_VAR, flow)?,
        })
    }

    /// The origin the router authenticates inbound messages against,
    /// computed once from the flow URL.
    pub fn expected_origin(&self) -> String {
        self.flow_url.origin().ascii_serialization()
    }
}

fn override_or(var: &str, fallback: &str) -> Result<Url> {
    let raw = std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    Url::parse(&raw).map_err(|e| FramelinkError::Config(format!("invalid url for {var}: {e}")))
}
