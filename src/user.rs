//! Canonical FranceConnect user record and claim mapping.

use crate::error::{OAuth2Error, OAuth2Result};
use crate::types::{TokenResponse, UserClaims};
use serde::{Deserialize, Serialize};

/// Identity record assembled from the userinfo claims and the token exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FranceConnectUser {
    /// Equals the `sub` claim.
    pub id: String,
    pub given_name: String,
    pub family_name: String,
    pub gender: String,
    pub birthplace: String,
    pub birthcountry: String,
    pub email: String,
    pub preferred_username: String,
    /// Access token from the exchange step.
    pub token: String,
    /// ID token, also persisted in the session store for logout.
    pub token_id: String,
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    /// Userinfo payload exactly as returned by the provider.
    pub raw: UserClaims,
}

fn required_claim(claims: &UserClaims, key: &str) -> OAuth2Result<String> {
    claims
        .get(key)
        .and_then(|value| value.as_str())
        .map(str::to_owned)
        .ok_or_else(|| OAuth2Error::MissingClaim(key.to_string()))
}

impl FranceConnectUser {
    /// Map raw claims into the canonical record.
    ///
    /// Strict contract: every mapped claim must be present, no defaulting and
    /// no partial result. Token fields are filled afterwards from the token
    /// response via [`FranceConnectUser::with_tokens`].
    pub fn from_claims(claims: UserClaims) -> OAuth2Result<Self> {
        Ok(Self {
            id: required_claim(&claims, "sub")?,
            given_name: required_claim(&claims, "given_name")?,
            family_name: required_claim(&claims, "family_name")?,
            gender: required_claim(&claims, "gender")?,
            birthplace: required_claim(&claims, "birthplace")?,
            birthcountry: required_claim(&claims, "birthcountry")?,
            email: required_claim(&claims, "email")?,
            preferred_username: required_claim(&claims, "preferred_username")?,
            token: String::new(),
            token_id: String::new(),
            refresh_token: None,
            expires_in: 0,
            raw: claims,
        })
    }

    /// Fill the token fields from the exchange response.
    pub fn with_tokens(mut self, tokens: &TokenResponse) -> Self {
        self.token = tokens.access_token.clone();
        self.token_id = tokens.id_token.clone();
        self.refresh_token = tokens.refresh_token.clone();
        self.expires_in = tokens.expires_in;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> UserClaims {
        let value = serde_json::json!({
            "sub": "9b4c1f",
            "given_name": "Angela Claire Louise",
            "family_name": "DUBOIS",
            "gender": "female",
            "birthplace": "75107",
            "birthcountry": "99100",
            "email": "angela.dubois@example.fr",
            "preferred_username": "DUBOIS",
        });
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_claim_mapping() {
        let claims = sample_claims();
        let user = FranceConnectUser::from_claims(claims.clone()).unwrap();

        assert_eq!(user.id, "9b4c1f");
        assert_eq!(user.given_name, "Angela Claire Louise");
        assert_eq!(user.family_name, "DUBOIS");
        assert_eq!(user.gender, "female");
        assert_eq!(user.birthplace, "75107");
        assert_eq!(user.birthcountry, "99100");
        assert_eq!(user.email, "angela.dubois@example.fr");
        assert_eq!(user.preferred_username, "DUBOIS");

        // Raw payload is retained untouched
        assert_eq!(user.raw, claims);
    }

    #[test]
    fn test_missing_claim_fails() {
        let mut claims = sample_claims();
        claims.remove("email");

        let result = FranceConnectUser::from_claims(claims);
        assert!(matches!(result, Err(OAuth2Error::MissingClaim(key)) if key == "email"));
    }

    #[test]
    fn test_non_string_claim_is_rejected() {
        let mut claims = sample_claims();
        claims.insert("gender".to_string(), serde_json::json!(42));

        let result = FranceConnectUser::from_claims(claims);
        assert!(matches!(result, Err(OAuth2Error::MissingClaim(key)) if key == "gender"));
    }

    #[test]
    fn test_with_tokens_merges_exchange_result() {
        let tokens = TokenResponse {
            access_token: "AT1".to_string(),
            id_token: "IDT1".to_string(),
            refresh_token: Some("RT1".to_string()),
            expires_in: 3600,
        };

        let user = FranceConnectUser::from_claims(sample_claims())
            .unwrap()
            .with_tokens(&tokens);

        assert_eq!(user.token, "AT1");
        assert_eq!(user.token_id, "IDT1");
        assert_eq!(user.refresh_token, Some("RT1".to_string()));
        assert_eq!(user.expires_in, 3600);
    }
}
