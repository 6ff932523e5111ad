//! Credential extraction from login requests.
//!
//! A [`CredentialConverter`] turns the body of a `POST` to the login path
//! into a [`LoginAttempt`]. The attempt is transient: it lives for the
//! duration of the authentication step and is dropped afterwards, whatever
//! the outcome.

use std::fmt;

use actix_web::dev::RequestHead;
use serde::Deserialize;

use crate::http::error::AuthError;

/// A credential pair extracted from a login request.
///
/// `Debug` redacts the password so attempts can be logged safely.
#[derive(Clone)]
pub struct LoginAttempt {
    username: String,
    password: String,
}

impl LoginAttempt {
    pub fn new(username: &str, password: &str) -> Self {
        LoginAttempt {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for LoginAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginAttempt")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
struct CredentialPayload {
    username: String,
    password: String,
}

/// Extracts a [`LoginAttempt`] from a login request.
///
/// The gateway owns exactly one converter; the request head is available so
/// implementations can inspect content type or headers when deciding how to
/// read the body.
pub trait CredentialConverter: Send + Sync {
    fn convert(&self, head: &RequestHead, body: &[u8]) -> Result<LoginAttempt, AuthError>;
}

/// Reads a JSON body of the shape `{"username": "...", "password": "..."}`.
///
/// This is the gateway default.
#[derive(Debug, Clone, Default)]
pub struct JsonCredentialConverter;

impl CredentialConverter for JsonCredentialConverter {
    fn convert(&self, _head: &RequestHead, body: &[u8]) -> Result<LoginAttempt, AuthError> {
        let payload: CredentialPayload =
            serde_json::from_slice(body).map_err(|_| AuthError::MalformedCredentials)?;
        validate(payload)
    }
}

/// Reads an urlencoded form body (`username=...&password=...`).
#[derive(Debug, Clone, Default)]
pub struct FormCredentialConverter;

impl CredentialConverter for FormCredentialConverter {
    fn convert(&self, _head: &RequestHead, body: &[u8]) -> Result<LoginAttempt, AuthError> {
        let payload: CredentialPayload =
            serde_urlencoded::from_bytes(body).map_err(|_| AuthError::MalformedCredentials)?;
        validate(payload)
    }
}

fn validate(payload: CredentialPayload) -> Result<LoginAttempt, AuthError> {
    if payload.username.is_empty() {
        return Err(AuthError::MalformedCredentials);
    }
    Ok(LoginAttempt {
        username: payload.username,
        password: payload.password,
    })
}
