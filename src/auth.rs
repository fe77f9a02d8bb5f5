//! Bearer-token authentication for API routes.
//!
//! Token issuance lives in a separate auth service; this module only
//! validates the JWT it signs and exposes the claims as a request extractor.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, error, web};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Runtime configuration shared with request handlers.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HMAC secret used to verify bearer tokens.
    pub secret: String,
}

/// JWT claims describing the authenticated shopper or administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Subject identifier assigned by the auth service.
    pub sub: String,
    /// Numeric user id owning carts and orders.
    pub user_id: i32,
    /// Email address used for order confirmations.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Roles granted to the user.
    pub roles: Vec<String>,
    /// Expiry as a Unix timestamp.
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Decode and verify a bearer token.
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }

    /// Sign the claims into a token. Used by tests and tooling.
    pub fn to_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }
}

/// Returns true when `roles` contains `role`.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|granted| granted == role)
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req))
    }
}

fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let config = req
        .app_data::<web::Data<ServerConfig>>()
        .ok_or_else(|| error::ErrorInternalServerError("server configuration missing"))?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| error::ErrorUnauthorized("missing bearer token"))?;

    AuthenticatedUser::from_token(token, &config.secret)
        .map_err(|_| error::ErrorUnauthorized("invalid or expired bearer token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user-1".to_string(),
            user_id: 1,
            email: "user@example.com".to_string(),
            name: "Tester".to_string(),
            roles: vec!["admin".to_string()],
            exp: usize::MAX,
        }
    }

    #[test]
    fn token_roundtrip_preserves_claims() {
        let user = sample_user();
        let token = user.to_token("secret").expect("signing should succeed");
        let decoded =
            AuthenticatedUser::from_token(&token, "secret").expect("decoding should succeed");

        assert_eq!(decoded.user_id, 1);
        assert_eq!(decoded.email, "user@example.com");
        assert_eq!(decoded.roles, vec!["admin".to_string()]);
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let token = sample_user()
            .to_token("secret")
            .expect("signing should succeed");

        assert!(AuthenticatedUser::from_token(&token, "other").is_err());
    }

    #[test]
    fn check_role_matches_exactly() {
        let roles = vec!["admin".to_string(), "support".to_string()];

        assert!(check_role("admin", &roles));
        assert!(!check_role("adm", &roles));
        assert!(!check_role("admin", &[]));
    }
}
