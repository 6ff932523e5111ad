//! Extractors for accessing the authenticated principal in handlers.
//!
//! The gateway inserts the [`Principal`] into request extensions after an
//! `Allow` decision; these extractors read it back out.

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::http::error::AuthError;
use crate::http::security::principal::Principal;

/// Extractor for the authenticated principal.
///
/// # Usage
/// ```ignore
/// async fn handler(principal: AuthenticatedPrincipal) -> impl Responder {
///     format!("Hello, {}!", principal.name())
/// }
/// ```
///
/// # Errors
/// Responds `401 Unauthorized` when no principal is bound to the request.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal(Principal);

impl AuthenticatedPrincipal {
    /// Returns the inner principal.
    pub fn into_inner(self) -> Principal {
        self.0
    }
}

impl Deref for AuthenticatedPrincipal {
    type Target = Principal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedPrincipal {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Principal>().cloned() {
            Some(principal) => ready(Ok(AuthenticatedPrincipal(principal))),
            None => ready(Err(AuthError::Unauthenticated)),
        }
    }
}

/// Optional variant: yields `None` instead of an error for anonymous
/// callers.
#[derive(Debug, Clone)]
pub struct OptionalPrincipal(Option<Principal>);

impl OptionalPrincipal {
    pub fn into_inner(self) -> Option<Principal> {
        self.0
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl Deref for OptionalPrincipal {
    type Target = Option<Principal>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for OptionalPrincipal {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let principal = req.extensions().get::<Principal>().cloned();
        ready(Ok(OptionalPrincipal(principal)))
    }
}

/// Extension trait for `HttpRequest` to query the security context.
pub trait SecurityExt {
    /// Returns a clone of the bound principal if present.
    fn principal(&self) -> Option<Principal>;

    /// Whether a principal is bound to the request.
    fn is_authenticated(&self) -> bool;

    /// Whether the bound principal has the given role.
    fn has_role(&self, role: &str) -> bool;
}

impl SecurityExt for HttpRequest {
    fn principal(&self) -> Option<Principal> {
        self.extensions().get::<Principal>().cloned()
    }

    fn is_authenticated(&self) -> bool {
        self.extensions().get::<Principal>().is_some()
    }

    fn has_role(&self, role: &str) -> bool {
        self.extensions()
            .get::<Principal>()
            .is_some_and(|p| p.has_role(role))
    }
}
