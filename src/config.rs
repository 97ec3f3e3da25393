//! FranceConnect provider configuration.

use crate::types::ProviderSpec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Production endpoint root.
pub const PROD_BASE_URL: &str = "https://oidc.franceconnect.gouv.fr/api/v2";

/// Integration (test) endpoint root.
pub const TEST_BASE_URL: &str = "https://fcp-low.integ01.dev-franceconnect.fr/api/v2";

/// Which FranceConnect deployment the provider talks to.
///
/// Resolved to a concrete base URL once, when the [`ProviderSpec`] is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[serde(alias = "other")]
    Integration,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => PROD_BASE_URL,
            Environment::Integration => TEST_BASE_URL,
        }
    }
}

/// FranceConnect provider configuration. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub environment: Environment,
    /// Where FranceConnect redirects the user agent after logout. Left empty,
    /// the logout URL carries an empty `post_logout_redirect_uri`.
    #[serde(default)]
    pub logout_redirect_uri: String,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
    #[serde(default = "default_scope_separator")]
    pub scope_separator: String,
    /// Timeout applied to the token and userinfo calls.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

fn default_scopes() -> Vec<String> {
    vec![
        "openid".to_string(),
        "profile".to_string(),
        "email".to_string(),
    ]
}

fn default_scope_separator() -> String {
    " ".to_string()
}

fn default_http_timeout() -> u64 {
    30
}

impl ProviderConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            environment,
            logout_redirect_uri: String::new(),
            scopes: default_scopes(),
            scope_separator: default_scope_separator(),
            http_timeout_seconds: default_http_timeout(),
        }
    }

    pub fn with_logout_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.logout_redirect_uri = uri.into();
        self
    }

    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    pub fn with_scope_separator(mut self, separator: impl Into<String>) -> Self {
        self.scope_separator = separator.into();
        self
    }

    pub fn with_http_timeout(mut self, seconds: u64) -> Self {
        self.http_timeout_seconds = seconds;
        self
    }

    /// Resolve the environment into a concrete endpoint set.
    pub fn provider_spec(&self) -> ProviderSpec {
        self.spec_for_base(self.environment.base_url())
    }

    pub(crate) fn spec_for_base(&self, base_url: &str) -> ProviderSpec {
        let mut auth_params = HashMap::new();
        auth_params.insert("acr_values".to_string(), "eidas1".to_string());
        auth_params.insert("prompt".to_string(), "consent".to_string());

        ProviderSpec {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            authorization_endpoint: format!("{base_url}/authorize"),
            token_endpoint: format!("{base_url}/token"),
            userinfo_endpoint: format!("{base_url}/userinfo"),
            end_session_endpoint: format!("{base_url}/session/end"),
            redirect_uri: self.redirect_uri.clone(),
            scopes: self.scopes.clone(),
            scope_separator: self.scope_separator.clone(),
            auth_params,
        }
    }
}
