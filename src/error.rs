//! FranceConnect OAuth2 error types.

use thiserror::Error;

pub type OAuth2Result<T> = Result<T, OAuth2Error>;

#[derive(Debug, Error)]
pub enum OAuth2Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid state parameter")]
    InvalidState,

    #[error("Authorization callback error: {0}")]
    Callback(String),

    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),

    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),

    #[error("User info request failed: {0}")]
    UserInfoFailed(String),

    #[error("Invalid user info response: {0}")]
    InvalidUserInfoResponse(String),

    #[error("Required claim missing from userinfo response: {0}")]
    MissingClaim(String),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Session store error: {0}")]
    Session(String),
}
