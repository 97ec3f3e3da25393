//! FranceConnect OAuth2/OIDC identity provider.
//!
//! Implements the Authorization Code flow against the FranceConnect national
//! identity service: authorization URL generation with an anti-replay nonce,
//! code-for-token exchange using HTTP Basic client authentication, userinfo
//! retrieval, strict claim mapping into a canonical user record, and
//! RP-initiated logout URL generation.
//!
//! The generic [`OAuth2Client`] engine is parameterized by a [`ProviderSpec`]
//! resolved once from [`ProviderConfig`]; [`FranceConnectProvider`] composes
//! the engine with a host-injected [`SessionStore`] to orchestrate login and
//! logout.

mod client;
mod config;
mod error;
mod provider;
mod session;
mod types;
mod user;


pub use client::{NONCE_LEN, OAuth2Client};
pub use config::{Environment, PROD_BASE_URL, ProviderConfig, TEST_BASE_URL};
pub use error::{OAuth2Error, OAuth2Result};
pub use provider::{FlowStage, FranceConnectProvider, LoginFlow};
pub use session::{FC_TOKEN_ID, InMemorySessionStore, SessionStore};
pub use types::{AuthorizationRequest, CallbackParams, ProviderSpec, TokenResponse, UserClaims};
pub use user::FranceConnectUser;
