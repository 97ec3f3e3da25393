//! OAuth2 protocol types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw userinfo payload, verbatim as returned by the provider.
pub type UserClaims = serde_json::Map<String, serde_json::Value>;

/// Resolved capability set for one provider: endpoints, credentials and the
/// fixed parameters the authorization request must carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSpec {
    pub client_id: String,
    pub client_secret: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub userinfo_endpoint: String,
    pub end_session_endpoint: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub scope_separator: String,
    /// Additional parameters to include in the authorization request
    pub auth_params: HashMap<String, String>,
}

/// Parameters issued for one authorization redirect. Not persisted beyond the
/// redirect; a fresh request is generated per login attempt.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    /// Caller-supplied CSRF token, validated again on callback.
    pub state: String,
    /// Anti-replay nonce, 22 random alphanumeric characters.
    pub nonce: String,
    pub extra_params: HashMap<String, String>,
}

/// Query parameters received on the authorization callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackParams {
    pub code: String,
    pub state: String,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    pub fn new(code: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            state: state.into(),
            error: None,
            error_description: None,
        }
    }
}

/// Token endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: u64,
}
