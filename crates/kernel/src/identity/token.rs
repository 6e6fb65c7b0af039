//! Access token verification.
//!
//! The hosted backend issues HS256 JWTs whose `sub` is the user's UUID.
//! The token arrives either as `Authorization: Bearer <token>` or in the
//! session cookie set by the login page.

use axum::http::header;
use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::IdentityError;

/// Claims consumed from the hosted backend's access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user id).
    pub sub: String,
    /// Audience.
    pub aud: String,
    /// Expiry (Unix timestamp).
    pub exp: i64,
    /// Email, when the backend includes it.
    #[serde(default)]
    pub email: Option<String>,
}

/// Verifies access tokens against the shared secret.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for the given secret and expected audience.
    pub fn new(secret: &[u8], audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verify a token and return the user id it was issued for.
    pub fn verify(&self, token: &str) -> Result<Uuid, IdentityError> {
        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &self.validation)?;

        let sub = data.claims.sub.trim();
        if sub.is_empty() {
            return Err(IdentityError::MissingSubject);
        }

        sub.parse::<Uuid>()
            .map_err(|_| IdentityError::InvalidSubject(sub.to_string()))
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("decoding_key", &"<redacted>")
            .field("audience", &self.validation.aud)
            .finish()
    }
}

/// Extract the raw access token from the request.
///
/// A bearer header takes precedence over the cookie.
pub fn extract_token(parts: &Parts, cookie_name: &str) -> Option<String> {
    let bearer = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    cookie_value(parts, cookie_name)
}

/// Find a cookie by name across all `Cookie` headers.
fn cookie_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::http::Request;
    use jsonwebtoken::{EncodingKey, Header};

    const SECRET: &[u8] = b"test-secret";

    fn sign(sub: &str, aud: &str, exp_offset: i64) -> String {
        let claims = AccessClaims {
            sub: sub.to_string(),
            aud: aud.to_string(),
            exp: chrono::Utc::now().timestamp() + exp_offset,
            email: None,
        };
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    fn request_parts(builder: axum::http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn verifies_valid_token() {
        let id = Uuid::now_v7();
        let verifier = TokenVerifier::new(SECRET, "authenticated");
        let token = sign(&id.to_string(), "authenticated", 3600);
        assert_eq!(verifier.verify(&token).unwrap(), id);
    }

    #[test]
    fn rejects_expired_token() {
        let verifier = TokenVerifier::new(SECRET, "authenticated");
        let token = sign(&Uuid::now_v7().to_string(), "authenticated", -3600);
        assert!(matches!(verifier.verify(&token), Err(IdentityError::Token(_))));
    }

    #[test]
    fn rejects_wrong_audience() {
        let verifier = TokenVerifier::new(SECRET, "authenticated");
        let token = sign(&Uuid::now_v7().to_string(), "anon", 3600);
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn rejects_wrong_secret() {
        let verifier = TokenVerifier::new(b"another-secret", "authenticated");
        let token = sign(&Uuid::now_v7().to_string(), "authenticated", 3600);
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn rejects_non_uuid_subject() {
        let verifier = TokenVerifier::new(SECRET, "authenticated");
        let token = sign("service-role", "authenticated", 3600);
        assert!(matches!(
            verifier.verify(&token),
            Err(IdentityError::InvalidSubject(_))
        ));
    }

    #[test]
    fn bearer_header_wins_over_cookie() {
        let parts = request_parts(
            Request::get("/dashboard")
                .header("authorization", "Bearer from-header")
                .header("cookie", "flowdesk-access-token=from-cookie"),
        );
        assert_eq!(
            extract_token(&parts, "flowdesk-access-token").as_deref(),
            Some("from-header")
        );
    }

    #[test]
    fn token_read_from_cookie() {
        let parts = request_parts(
            Request::get("/dashboard").header("cookie", "theme=dark; flowdesk-access-token=abc"),
        );
        assert_eq!(
            extract_token(&parts, "flowdesk-access-token").as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn empty_cookie_is_no_token() {
        let parts = request_parts(Request::get("/dashboard").header("cookie", "flowdesk-access-token="));
        assert!(extract_token(&parts, "flowdesk-access-token").is_none());
        let parts = parts_without_headers();
        assert!(extract_token(&parts, "flowdesk-access-token").is_none());
    }

    fn parts_without_headers() -> Parts {
        request_parts(Request::get("/"))
    }
}
