//! Security context persistence.
//!
//! The security context binds a [`Principal`] to a session. The gateway
//! loads it on every request, saves it after a successful login and clears
//! it on logout or authentication failure. The principal is threaded
//! explicitly through the pipeline; there is no ambient/global holder.

use actix_session::Session;
use serde::{Deserialize, Serialize};

use crate::http::error::AuthError;
use crate::http::security::principal::Principal;

const PRINCIPAL_KEY: &str = "authgate.principal";

/// Serializable session record for an authenticated principal.
///
/// Separate from [`Principal`] to keep the session payload a stable,
/// deliberately minimal shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionPrincipal {
    pub name: String,
    pub roles: Vec<String>,
}

impl From<&Principal> for SessionPrincipal {
    fn from(principal: &Principal) -> Self {
        SessionPrincipal {
            name: principal.name().to_string(),
            roles: principal.get_roles().to_vec(),
        }
    }
}

impl From<SessionPrincipal> for Principal {
    fn from(record: SessionPrincipal) -> Self {
        let roles: Vec<&str> = record.roles.iter().map(String::as_str).collect();
        Principal::new(&record.name).roles(&roles)
    }
}

/// Persists the authenticated principal across requests.
///
/// `clear` must be effective before any downstream read in the same request:
/// a request that logged out must not observe a stale principal.
pub trait SecurityContextRepository: Send + Sync {
    fn load(&self, session: &Session) -> Option<Principal>;
    fn save(&self, session: &Session, principal: &Principal) -> Result<(), AuthError>;
    fn clear(&self, session: &Session) -> Result<(), AuthError>;
}

/// Session-backed repository over actix-session.
///
/// `save` rotates the session id before writing the principal, so a session
/// fixed by an attacker before login is worthless afterwards. `clear` purges
/// the whole session, mirroring a server-side session invalidation.
#[derive(Debug, Clone)]
pub struct SessionContextRepository {
    key: String,
}

impl SessionContextRepository {
    pub fn new() -> Self {
        SessionContextRepository {
            key: PRINCIPAL_KEY.to_string(),
        }
    }

    /// Overrides the session key used to store the principal record.
    pub fn key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }
}

impl Default for SessionContextRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SecurityContextRepository for SessionContextRepository {
    fn load(&self, session: &Session) -> Option<Principal> {
        session
            .get::<SessionPrincipal>(self.key.as_str())
            .ok()
            .flatten()
            .map(Principal::from)
    }

    fn save(&self, session: &Session, principal: &Principal) -> Result<(), AuthError> {
        session.renew();
        session
            .insert(self.key.as_str(), SessionPrincipal::from(principal))
            .map_err(|e| AuthError::ContextStore(e.to_string()))
    }

    fn clear(&self, session: &Session) -> Result<(), AuthError> {
        session.purge();
        Ok(())
    }
}
