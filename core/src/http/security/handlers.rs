//! Terminal outcome handlers.
//!
//! Every terminal outcome of the pipeline (login success or failure,
//! logout, access denied, authentication required) is dispatched through
//! one capability here. The defaults answer with small JSON envelopes;
//! deployments swap in their own implementations through the
//! [`Gateway`](crate::http::security::Gateway) builder.

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;

use crate::http::error::AuthError;
use crate::http::security::principal::Principal;

/// Invoked after a successful authentication, once the context is saved.
pub trait AuthenticationSuccessHandler: Send + Sync {
    fn on_success(&self, req: &HttpRequest, principal: &Principal) -> HttpResponse;
}

/// Invoked after a failed authentication, once the context is cleared.
pub trait AuthenticationFailureHandler: Send + Sync {
    fn on_failure(&self, req: &HttpRequest, error: &AuthError) -> HttpResponse;
}

/// Side-effect hook invoked on logout, before the context is cleared.
///
/// The principal is the one bound to the session at the time of the logout
/// request, if any.
pub trait LogoutHandler: Send + Sync {
    fn logout(&self, req: &HttpRequest, principal: Option<&Principal>);
}

/// Produces the response confirming a completed logout.
pub trait LogoutSuccessHandler: Send + Sync {
    fn on_logout(&self, req: &HttpRequest) -> HttpResponse;
}

/// Invoked when an authenticated principal lacks the required access.
pub trait AccessDeniedHandler: Send + Sync {
    fn handle(&self, req: &HttpRequest, principal: &Principal) -> HttpResponse;
}

/// Invoked when an anonymous caller requests a protected resource.
pub trait AuthenticationEntryPoint: Send + Sync {
    fn commence(&self, req: &HttpRequest) -> HttpResponse;
}

/// Default success handler: `200` with the principal's name and roles.
#[derive(Debug, Clone, Default)]
pub struct JsonSuccessHandler;

impl AuthenticationSuccessHandler for JsonSuccessHandler {
    fn on_success(&self, _req: &HttpRequest, principal: &Principal) -> HttpResponse {
        HttpResponse::Ok().json(json!({
            "code": 200,
            "message": "login success",
            "principal": {
                "name": principal.name(),
                "roles": principal.get_roles(),
            },
        }))
    }
}

/// Default failure handler: `401` carrying the failure message.
#[derive(Debug, Clone, Default)]
pub struct JsonFailureHandler;

impl AuthenticationFailureHandler for JsonFailureHandler {
    fn on_failure(&self, _req: &HttpRequest, error: &AuthError) -> HttpResponse {
        HttpResponse::Unauthorized().json(json!({
            "code": 401,
            "message": error.to_string(),
        }))
    }
}

/// Default logout hook: does nothing beyond the context clearing the
/// gateway already performs.
#[derive(Debug, Clone, Default)]
pub struct NoopLogoutHandler;

impl LogoutHandler for NoopLogoutHandler {
    fn logout(&self, _req: &HttpRequest, _principal: Option<&Principal>) {}
}

/// Default logout confirmation: `200`.
#[derive(Debug, Clone, Default)]
pub struct JsonLogoutSuccessHandler;

impl LogoutSuccessHandler for JsonLogoutSuccessHandler {
    fn on_logout(&self, _req: &HttpRequest) -> HttpResponse {
        HttpResponse::Ok().json(json!({
            "code": 200,
            "message": "logout success",
        }))
    }
}

/// Default access-denied handler: `403`.
#[derive(Debug, Clone, Default)]
pub struct JsonAccessDeniedHandler;

impl AccessDeniedHandler for JsonAccessDeniedHandler {
    fn handle(&self, _req: &HttpRequest, _principal: &Principal) -> HttpResponse {
        HttpResponse::Forbidden().json(json!({
            "code": 403,
            "message": "access denied",
        }))
    }
}

/// Default entry point: `401` prompting authentication.
#[derive(Debug, Clone, Default)]
pub struct JsonEntryPoint;

impl AuthenticationEntryPoint for JsonEntryPoint {
    fn commence(&self, _req: &HttpRequest) -> HttpResponse {
        HttpResponse::Unauthorized().json(json!({
            "code": 401,
            "message": "authentication required",
        }))
    }
}

/// The full capability set the gateway dispatches through.
#[derive(Clone)]
pub struct Handlers {
    pub(crate) success: Arc<dyn AuthenticationSuccessHandler>,
    pub(crate) failure: Arc<dyn AuthenticationFailureHandler>,
    pub(crate) logout: Arc<dyn LogoutHandler>,
    pub(crate) logout_success: Arc<dyn LogoutSuccessHandler>,
    pub(crate) access_denied: Arc<dyn AccessDeniedHandler>,
    pub(crate) entry_point: Arc<dyn AuthenticationEntryPoint>,
}

impl Handlers {
    pub fn new() -> Self {
        Handlers {
            success: Arc::new(JsonSuccessHandler),
            failure: Arc::new(JsonFailureHandler),
            logout: Arc::new(NoopLogoutHandler),
            logout_success: Arc::new(JsonLogoutSuccessHandler),
            access_denied: Arc::new(JsonAccessDeniedHandler),
            entry_point: Arc::new(JsonEntryPoint),
        }
    }
}

impl Default for Handlers {
    fn default() -> Self {
        Self::new()
    }
}
