//! Security gateway middleware.
//!
//! One middleware sequences the whole per-request pipeline, strictly in
//! order: whitelist check, login-path authentication, logout handling,
//! authorization decision, dispatch. The security context is only written
//! after authentication completes, so a request abandoned mid-flight leaves
//! no partial principal behind.

use std::rc::Rc;
use std::sync::Arc;

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::web::BytesMut;
use actix_web::{Error, HttpMessage, HttpResponse, ResponseError};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use futures_util::StreamExt;
use tracing::{debug, info, warn};

use crate::http::error::AuthError;
use crate::http::security::access::{Decision, PathRuleAuthorizer, RequestContext};
use crate::http::security::config::Gateway;
use crate::http::security::converter::CredentialConverter;
use crate::http::security::context::SecurityContextRepository;
use crate::http::security::handlers::Handlers;
use crate::http::security::manager::DelegatingAuthenticationManager;
use crate::http::security::path_pattern::PatternSet;

/// Upper bound on a login request body. Credential payloads are tiny;
/// anything larger is rejected as malformed before parsing.
const MAX_LOGIN_BODY: usize = 16 * 1024;

struct GatewayInner {
    login_path: String,
    logout_path: String,
    whitelist: PatternSet,
    authorizer: PathRuleAuthorizer,
    converter: Arc<dyn CredentialConverter>,
    manager: DelegatingAuthenticationManager,
    repository: Arc<dyn SecurityContextRepository>,
    handlers: Handlers,
}

impl<S, B> Transform<S, ServiceRequest> for Gateway
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = GatewayService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let mut authorizer = PathRuleAuthorizer::new().fallback(Arc::clone(&self.fallback));
        for rule in &self.rules {
            authorizer = authorizer.rule(rule.clone());
        }

        ok(GatewayService {
            inner: Rc::new(GatewayInner {
                login_path: self.login_path.clone(),
                logout_path: self.logout_path.clone(),
                whitelist: self.whitelist.clone(),
                authorizer,
                converter: Arc::clone(&self.converter),
                manager: self.manager.clone(),
                repository: Arc::clone(&self.repository),
                handlers: self.handlers.clone(),
            }),
            service: Rc::new(service),
        })
    }
}

/// Per-worker gateway service.
pub struct GatewayService<S> {
    inner: Rc<GatewayInner>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for GatewayService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let inner = Rc::clone(&self.inner);

        Box::pin(async move {
            let path = req.path().to_string();

            // Whitelisted paths bypass the pipeline entirely.
            if inner.whitelist.matches(&path) {
                debug!(%path, "whitelisted");
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            // Only the login path triggers authentication.
            if req.method() == Method::POST && path == inner.login_path {
                let mut req = req;
                let resp = login_flow(&inner, &mut req).await;
                return Ok(req.into_response(resp.map_into_right_body()));
            }

            if req.method() == Method::POST && path == inner.logout_path {
                let resp = logout_flow(&inner, &req);
                return Ok(req.into_response(resp.map_into_right_body()));
            }

            // Everything else goes straight to authorization with whatever
            // principal the session already carries, possibly none.
            let session = req.get_session();
            let principal = inner.repository.load(&session);
            let ctx = RequestContext::new(req.method().clone(), &path);

            match inner.authorizer.authorize(principal.as_ref(), &ctx) {
                Decision::Allow => {
                    if let Some(principal) = principal {
                        req.extensions_mut().insert(principal);
                    }
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Decision::Deny => {
                    let resp = match principal {
                        Some(ref principal) => {
                            debug!(%path, user = %principal.name(), "access denied");
                            inner
                                .handlers
                                .access_denied
                                .handle(req.request(), principal)
                        }
                        None => {
                            debug!(%path, "authentication required");
                            inner.handlers.entry_point.commence(req.request())
                        }
                    };
                    Ok(req.into_response(resp.map_into_right_body()))
                }
            }
        })
    }
}

async fn login_flow(inner: &GatewayInner, req: &mut ServiceRequest) -> HttpResponse {
    let body = match read_login_body(req).await {
        Ok(body) => body,
        Err(err) => return authentication_failed(inner, req, err),
    };

    let attempt = match inner.converter.convert(req.head(), &body) {
        Ok(attempt) => attempt,
        Err(err) => return authentication_failed(inner, req, err),
    };

    match inner.manager.authenticate(&attempt) {
        Ok(principal) => {
            let session = req.get_session();
            if let Err(err) = inner.repository.save(&session, &principal) {
                warn!(user = %principal.name(), error = %err, "context save failed");
                return authentication_failed(inner, req, err);
            }
            info!(user = %principal.name(), "authentication success");
            inner.handlers.success.on_success(req.request(), &principal)
        }
        Err(err) => {
            warn!(user = %attempt.username(), error = %err, "authentication failure");
            authentication_failed(inner, req, err)
        }
    }
}

fn authentication_failed(inner: &GatewayInner, req: &ServiceRequest, err: AuthError) -> HttpResponse {
    let session = req.get_session();
    let _ = inner.repository.clear(&session);
    inner.handlers.failure.on_failure(req.request(), &err)
}

fn logout_flow(inner: &GatewayInner, req: &ServiceRequest) -> HttpResponse {
    let session = req.get_session();
    let principal = inner.repository.load(&session);

    inner.handlers.logout.logout(req.request(), principal.as_ref());

    if let Err(err) = inner.repository.clear(&session) {
        warn!(error = %err, "session invalidation failed");
        return AuthError::LogoutFailure.error_response();
    }

    if let Some(principal) = principal {
        info!(user = %principal.name(), "logout");
    }
    inner.handlers.logout_success.on_logout(req.request())
}

async fn read_login_body(req: &mut ServiceRequest) -> Result<BytesMut, AuthError> {
    let mut payload = req.take_payload();
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|_| AuthError::MalformedCredentials)?;
        if body.len() + chunk.len() > MAX_LOGIN_BODY {
            return Err(AuthError::MalformedCredentials);
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
