//! Flow-token client.
//!
//! One request/response exchange with the token service:
//! `POST /verify/token/create` with the bearer credential. The issued token
//! sits at `data.token` in the response body. No retries; a transport
//! failure propagates to the `initialize` caller.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use url::Url;

use framelink_core::{FramelinkError, Result};

use crate::config::FlowParams;

/// Connect mode, the default when the host does not specify one.
const DEFAULT_MODE: u8 = 1;
/// Mode 2 flows carry no partner/merchant pair.
const MODE_WITHOUT_PARTNER: u8 = 2;

const TOKEN_PATH: &str = "/verify/token/create";

#[derive(Debug, Serialize)]
struct TokenRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_external_id: Option<String>,
    mode: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    partner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    partnership_id: Option<String>,
}

impl TokenRequest {
    fn from_params(params: &FlowParams) -> Self {
        let mode = params.mode.unwrap_or(DEFAULT_MODE);
        let with_partner = mode != MODE_WITHOUT_PARTNER;
        Self {
            user_external_id: params.user_external_id.clone(),
            mode,
            partner_id: with_partner.then(|| params.partner_id.clone()).flatten(),
            merchant_id: with_partner.then(|| params.merchant_id.clone()).flatten(),
            display_name: params.display_name.clone(),
            partnership_id: params.partnership_id.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    data: Option<TokenResponseData>,
}

#[derive(Debug, Deserialize)]
struct TokenResponseData {
    #[serde(default)]
    token: Option<String>,
}

/// Seam for the token service, mockable in tests and custom embeddings.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn create_token(&self, params: &FlowParams) -> Result<String>;
}

/// reqwest-backed client against the configured token service.
pub struct AuthClient {
    base_url: Url,
    bearer_token: String,
    http: HttpClient,
}

impl AuthClient {
    pub fn new(base_url: Url, bearer_token: String) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(concat!("framelink-sdk-rust/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FramelinkError::Transport(e.to_string()))?;
        Ok(Self {
            base_url,
            bearer_token,
            http,
        })
    }

    fn endpoint(&self) -> Result<Url> {
        self.base_url
            .join(TOKEN_PATH)
            .map_err(|e| FramelinkError::Config(format!("invalid token endpoint: {e}")))
    }
}

#[async_trait]
impl TokenIssuer for AuthClient {
    async fn create_token(&self, params: &FlowParams) -> Result<String> {
        let body = TokenRequest::from_params(params);

        let response = self
            .http
            .post(self.endpoint()?)
            .bearer_auth(&self.bearer_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| FramelinkError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FramelinkError::Transport(format!(
                "token request failed: HTTP {status}"
            )));
        }

        let parsed: TokenResponse = response
            .json()
            .await
            .map_err(|e| FramelinkError::BadResponse(format!("token response not json: {e}")))?;

        parsed
            .data
            .and_then(|d| d.token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                FramelinkError::BadResponse("missing data.token in token response".into())
            })
    }
}
