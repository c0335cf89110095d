use axum::http::{header::AUTHORIZATION, HeaderMap};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::{AuthError, Authenticator, Claims, Principal};

/// JWT bearer-token check with a single symmetric key.
///
/// Only HMAC algorithms are accepted, so a token whose header names an
/// asymmetric algorithm is rejected before any signature check.
pub struct BearerToken {
    key: DecodingKey,
    validation: Validation,
}

impl BearerToken {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // `exp` is checked when present but not required
        validation.required_spec_claims.clear();
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(token_data.claims)
    }
}

/// Extract the token from `Authorization: Bearer <token>`; the scheme is
/// matched case-insensitively and exactly one space separates the parts.
fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers.get(AUTHORIZATION).ok_or(AuthError::MissingHeader)?;
    let auth_str = auth_header.to_str().map_err(|_| AuthError::MalformedHeader)?;

    let mut parts = auth_str.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
        {
            Ok(token)
        }
        _ => Err(AuthError::MalformedHeader),
    }
}

impl Authenticator for BearerToken {
    fn name(&self) -> &'static str {
        "bearer"
    }

    fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AuthError> {
        let token = extract_bearer(headers)?;
        let claims = self.validate(token)?;

        Ok(Principal {
            subject: claims.sub.unwrap_or_else(|| "anonymous".to_string()),
        })
    }
}
