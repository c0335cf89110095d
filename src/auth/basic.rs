use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum_extra::headers::{authorization::Basic, Authorization, HeaderMapExt};
use subtle::ConstantTimeEq;

use super::{AuthError, Authenticator, Principal};

/// HTTP Basic check against a single configured credential pair
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Authenticator for StaticCredentials {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AuthError> {
        if !headers.contains_key(AUTHORIZATION) {
            return Err(AuthError::MissingHeader);
        }

        let credentials = headers
            .typed_try_get::<Authorization<Basic>>()
            .map_err(|_| AuthError::MalformedHeader)?
            .ok_or(AuthError::MalformedHeader)?;

        let username_ok = constant_time_eq(credentials.username(), &self.username);
        let password_ok = constant_time_eq(credentials.password(), &self.password);
        if username_ok & password_ok {
            Ok(Principal {
                subject: self.username.clone(),
            })
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

// Timing depends only on the configured value's length
fn constant_time_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}
