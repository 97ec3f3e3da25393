//! Generic OAuth2 authorization-code engine.
//!
//! Knows nothing about FranceConnect beyond what a [`ProviderSpec`] carries:
//! it builds authorization URLs, exchanges codes for tokens using HTTP Basic
//! client authentication, and fetches userinfo claims.

use crate::error::{OAuth2Error, OAuth2Result};
use crate::types::{AuthorizationRequest, ProviderSpec, TokenResponse, UserClaims};
use base64::{Engine, engine::general_purpose::STANDARD};
use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

/// Length of the anti-replay nonce carried in the authorization request.
pub const NONCE_LEN: usize = 22;

fn generate_nonce() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// OAuth2 client for handling authorization-code flows
#[derive(Clone)]
pub struct OAuth2Client {
    http_client: Client,
}

impl OAuth2Client {
    pub fn new(http_timeout_seconds: u64) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(http_timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self { http_client }
    }

    /// Build the authorization redirect URL for a provider.
    ///
    /// Generates a fresh nonce and returns it alongside the URL so the caller
    /// can keep it for the duration of the attempt.
    pub fn authorization_url(
        &self,
        spec: &ProviderSpec,
        state: &str,
    ) -> OAuth2Result<(String, AuthorizationRequest)> {
        if spec.client_id.is_empty() {
            return Err(OAuth2Error::Config("client_id is not set".to_string()));
        }
        if spec.redirect_uri.is_empty() {
            return Err(OAuth2Error::Config("redirect_uri is not set".to_string()));
        }

        let mut url = Url::parse(&spec.authorization_endpoint)?;

        let request = AuthorizationRequest {
            state: state.to_string(),
            nonce: generate_nonce(),
            extra_params: spec.auth_params.clone(),
        };

        // Build query parameters
        let mut params = url.query_pairs_mut();
        params.append_pair("response_type", "code");
        params.append_pair("client_id", &spec.client_id);
        params.append_pair("redirect_uri", &spec.redirect_uri);

        if !spec.scopes.is_empty() {
            params.append_pair("scope", &spec.scopes.join(&spec.scope_separator));
        }

        params.append_pair("state", &request.state);
        params.append_pair("nonce", &request.nonce);

        // Provider-specific parameters
        for (key, value) in &request.extra_params {
            params.append_pair(key, value);
        }

        drop(params);

        debug!(
            "Generated authorization URL for {}",
            spec.authorization_endpoint
        );

        Ok((url.to_string(), request))
    }

    /// Exchange an authorization code for tokens.
    ///
    /// The client authenticates with `Authorization: Basic` credentials; the
    /// exchange is never retried, a failure invalidates the login attempt.
    pub async fn exchange_code(
        &self,
        spec: &ProviderSpec,
        code: &str,
    ) -> OAuth2Result<TokenResponse> {
        let mut params = HashMap::new();
        params.insert("grant_type", "authorization_code");
        params.insert("code", code);
        params.insert("redirect_uri", spec.redirect_uri.as_str());

        let credentials = STANDARD.encode(format!("{}:{}", spec.client_id, spec.client_secret));

        let response = self
            .http_client
            .post(&spec.token_endpoint)
            .header("Authorization", format!("Basic {credentials}"))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Token exchange failed: {}", error_text);
            return Err(OAuth2Error::TokenExchangeFailed(error_text));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| OAuth2Error::InvalidTokenResponse(e.to_string()))?;

        info!("Successfully exchanged code for tokens");
        Ok(token_response)
    }

    /// Fetch userinfo claims using an access token.
    pub async fn fetch_user_info(
        &self,
        spec: &ProviderSpec,
        access_token: &str,
    ) -> OAuth2Result<UserClaims> {
        let response = self
            .http_client
            .get(&spec.userinfo_endpoint)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("User info request failed: {}", error_text);
            return Err(OAuth2Error::UserInfoFailed(error_text));
        }

        let claims: UserClaims = response
            .json()
            .await
            .map_err(|e| OAuth2Error::InvalidUserInfoResponse(e.to_string()))?;

        debug!(
            "Successfully retrieved user info for subject: {}",
            claims
                .get("sub")
                .and_then(|v| v.as_str())
                .unwrap_or("<unknown>")
        );
        Ok(claims)
    }
}
