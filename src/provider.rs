//! FranceConnect login orchestration and logout-URL generation.

use crate::client::OAuth2Client;
use crate::config::ProviderConfig;
use crate::error::{OAuth2Error, OAuth2Result};
use crate::session::{FC_TOKEN_ID, SessionStore};
use crate::types::{CallbackParams, ProviderSpec};
use crate::user::FranceConnectUser;
use std::sync::Arc;
use tracing::{error, info};
use url::Url;

/// Stage of a single login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStage {
    Initiated,
    AwaitingCallback,
    Exchanging,
    FetchingUserInfo,
    Complete,
    Failed,
}

/// One login attempt. Single-use: any error is terminal and a fresh flow with
/// a new state and nonce must be started.
#[derive(Debug)]
pub struct LoginFlow {
    authorize_url: String,
    issued_state: String,
    nonce: String,
    stage: FlowStage,
}

impl LoginFlow {
    /// URL to redirect the user agent to.
    pub fn authorize_url(&self) -> &str {
        &self.authorize_url
    }

    /// The CSRF state issued for this attempt.
    pub fn state(&self) -> &str {
        &self.issued_state
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    pub fn stage(&self) -> FlowStage {
        self.stage
    }
}

/// FranceConnect identity provider.
///
/// Composition over inheritance: the generic [`OAuth2Client`] engine drives
/// the wire exchanges, parameterized by the [`ProviderSpec`] resolved from the
/// configuration; this type adds the FranceConnect specifics (claim contract,
/// session-kept ID token, logout endpoint).
pub struct FranceConnectProvider {
    config: ProviderConfig,
    spec: ProviderSpec,
    client: OAuth2Client,
    session_store: Arc<dyn SessionStore>,
}

impl FranceConnectProvider {
    pub fn new(config: ProviderConfig, session_store: Arc<dyn SessionStore>) -> Self {
        let spec = config.provider_spec();
        let client = OAuth2Client::new(config.http_timeout_seconds);

        Self {
            config,
            spec,
            client,
            session_store,
        }
    }

    /// Repoint all endpoints at a test server.
    #[cfg(test)]
    pub(crate) fn set_base_url(&mut self, base_url: &str) {
        self.spec = self.config.spec_for_base(base_url);
    }

    /// Start a login attempt with a caller-supplied CSRF `state`.
    ///
    /// Returns the flow in `AwaitingCallback`, carrying the authorization URL
    /// to redirect the user agent to.
    pub fn begin_login(&self, state: &str) -> OAuth2Result<LoginFlow> {
        let (authorize_url, request) = self.client.authorization_url(&self.spec, state)?;

        info!("Started FranceConnect login");

        Ok(LoginFlow {
            authorize_url,
            issued_state: request.state,
            nonce: request.nonce,
            stage: FlowStage::AwaitingCallback,
        })
    }

    /// Complete a login attempt from the authorization callback.
    ///
    /// Validates the returned state before any network call, exchanges the
    /// code, fetches and maps the userinfo claims, and persists the ID token
    /// under [`FC_TOKEN_ID`] for later logout. Any error leaves the flow in
    /// `Failed`.
    pub async fn complete_login(
        &self,
        flow: &mut LoginFlow,
        callback: CallbackParams,
    ) -> OAuth2Result<FranceConnectUser> {
        match self.drive_callback(flow, callback).await {
            Ok(user) => {
                flow.stage = FlowStage::Complete;
                Ok(user)
            }
            Err(err) => {
                flow.stage = FlowStage::Failed;
                error!("FranceConnect login failed: {}", err);
                Err(err)
            }
        }
    }

    async fn drive_callback(
        &self,
        flow: &mut LoginFlow,
        callback: CallbackParams,
    ) -> OAuth2Result<FranceConnectUser> {
        // State validation happens before any network call
        if flow.stage != FlowStage::AwaitingCallback {
            return Err(OAuth2Error::InvalidState);
        }
        if callback.state != flow.issued_state {
            return Err(OAuth2Error::InvalidState);
        }

        if let Some(error) = &callback.error {
            let error_desc = callback
                .error_description
                .as_deref()
                .unwrap_or("No description");
            return Err(OAuth2Error::Callback(format!("{error}: {error_desc}")));
        }

        flow.stage = FlowStage::Exchanging;
        let tokens = self.client.exchange_code(&self.spec, &callback.code).await?;

        flow.stage = FlowStage::FetchingUserInfo;
        let claims = self
            .client
            .fetch_user_info(&self.spec, &tokens.access_token)
            .await?;

        let user = FranceConnectUser::from_claims(claims)?.with_tokens(&tokens);

        // ID token survives the login for logout-URL generation
        self.session_store
            .put(FC_TOKEN_ID, tokens.id_token.clone())
            .await?;

        info!("Verified FranceConnect identity for subject: {}", user.id);
        Ok(user)
    }

    /// Build the RP-initiated logout URL.
    ///
    /// Missing logout-redirect configuration or a missing stored ID token
    /// produce empty parameter values; both parameters are always present.
    pub async fn logout_url(&self) -> OAuth2Result<String> {
        let id_token = self
            .session_store
            .get(FC_TOKEN_ID)
            .await?
            .unwrap_or_default();

        let mut url = Url::parse(&self.spec.end_session_endpoint)?;
        url.query_pairs_mut()
            .append_pair("post_logout_redirect_uri", &self.config.logout_redirect_uri)
            .append_pair("id_token_hint", &id_token);

        Ok(url.to_string())
    }
}
