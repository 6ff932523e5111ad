//! Gateway configuration.
//!
//! [`Gateway`] is the single entry point: a builder assembling the
//! whitelist, the path rules, the authentication manager and the handler
//! set, and at the same time the actix middleware factory
//! (`App::new().wrap(gateway)`).

use std::sync::Arc;

use serde::Deserialize;

use crate::http::security::access::{AccessCheck, AccessPolicy, AuthenticatedPolicy, PathRule};
use crate::http::security::context::{SecurityContextRepository, SessionContextRepository};
use crate::http::security::converter::{CredentialConverter, JsonCredentialConverter};
use crate::http::security::handlers::{
    AccessDeniedHandler, AuthenticationEntryPoint, AuthenticationFailureHandler,
    AuthenticationSuccessHandler, Handlers, LogoutHandler, LogoutSuccessHandler,
};
use crate::http::security::manager::DelegatingAuthenticationManager;
use crate::http::security::path_pattern::PatternSet;

/// Default login processing path.
pub const DEFAULT_LOGIN_PATH: &str = "/api/v1/auth/login";
/// Default logout processing path.
pub const DEFAULT_LOGOUT_PATH: &str = "/api/v1/auth/logout";

/// Security gateway builder and middleware factory.
///
/// # Example
/// ```rust,ignore
/// let gateway = Gateway::new()
///     .authentication_manager(manager)
///     .permit_all(&["/public/**", "/health"])
///     .route("/admin/**", HasRole::new("ADMIN"))
///     .route("/db/**", AnyOf::of(vec![HasRole::arc("ADMIN"), HasRole::arc("DBA")]));
///
/// App::new().wrap(gateway).wrap(session_middleware);
/// ```
#[derive(Clone)]
pub struct Gateway {
    pub(crate) login_path: String,
    pub(crate) logout_path: String,
    pub(crate) whitelist: PatternSet,
    pub(crate) rules: Vec<PathRule>,
    pub(crate) fallback: Arc<dyn AccessPolicy>,
    pub(crate) converter: Arc<dyn CredentialConverter>,
    pub(crate) manager: DelegatingAuthenticationManager,
    pub(crate) repository: Arc<dyn SecurityContextRepository>,
    pub(crate) handlers: Handlers,
}

impl Gateway {
    /// Creates a gateway with default paths, an empty whitelist, no path
    /// rules, the JSON credential converter, the session-backed context
    /// repository, the authenticated-only fallback and the JSON default
    /// handlers.
    pub fn new() -> Self {
        Gateway {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            logout_path: DEFAULT_LOGOUT_PATH.to_string(),
            whitelist: PatternSet::new(),
            rules: Vec::new(),
            fallback: Arc::new(AuthenticatedPolicy),
            converter: Arc::new(JsonCredentialConverter),
            manager: DelegatingAuthenticationManager::new(),
            repository: Arc::new(SessionContextRepository::new()),
            handlers: Handlers::new(),
        }
    }

    /// Applies externally-loaded path configuration.
    pub fn from_properties(properties: &GatewayProperties) -> Self {
        let mut gateway = Self::new()
            .login_path(&properties.login_path)
            .logout_path(&properties.logout_path);
        for pattern in &properties.whitelist {
            gateway.whitelist = gateway.whitelist.add(pattern);
        }
        gateway
    }

    /// Sets the login processing path (`POST`).
    pub fn login_path(mut self, path: &str) -> Self {
        self.login_path = path.to_string();
        self
    }

    /// Sets the logout processing path (`POST`).
    pub fn logout_path(mut self, path: &str) -> Self {
        self.logout_path = path.to_string();
        self
    }

    /// Adds whitelist patterns: matching paths bypass the gateway entirely.
    pub fn permit_all(mut self, patterns: &[&str]) -> Self {
        self.whitelist = self.whitelist.add_all(patterns);
        self
    }

    /// Appends a path rule. Registration order is evaluation order.
    pub fn route<C: AccessCheck + 'static>(mut self, pattern: &str, check: C) -> Self {
        self.rules.push(PathRule::new(pattern, Arc::new(check)));
        self
    }

    /// Replaces the fallback policy consulted when no rule matches.
    pub fn fallback<P: AccessPolicy + 'static>(mut self, policy: P) -> Self {
        self.fallback = Arc::new(policy);
        self
    }

    /// Replaces the credential converter used on the login path.
    pub fn credential_converter<C: CredentialConverter + 'static>(mut self, converter: C) -> Self {
        self.converter = Arc::new(converter);
        self
    }

    /// Sets the authentication manager.
    pub fn authentication_manager(mut self, manager: DelegatingAuthenticationManager) -> Self {
        self.manager = manager;
        self
    }

    /// Replaces the security context repository.
    pub fn context_repository<R: SecurityContextRepository + 'static>(
        mut self,
        repository: R,
    ) -> Self {
        self.repository = Arc::new(repository);
        self
    }

    /// Replaces the authentication success handler.
    pub fn on_authentication_success<H: AuthenticationSuccessHandler + 'static>(
        mut self,
        handler: H,
    ) -> Self {
        self.handlers.success = Arc::new(handler);
        self
    }

    /// Replaces the authentication failure handler.
    pub fn on_authentication_failure<H: AuthenticationFailureHandler + 'static>(
        mut self,
        handler: H,
    ) -> Self {
        self.handlers.failure = Arc::new(handler);
        self
    }

    /// Replaces the logout side-effect hook.
    pub fn on_logout<H: LogoutHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers.logout = Arc::new(handler);
        self
    }

    /// Replaces the logout confirmation handler.
    pub fn on_logout_success<H: LogoutSuccessHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers.logout_success = Arc::new(handler);
        self
    }

    /// Replaces the access-denied handler.
    pub fn on_access_denied<H: AccessDeniedHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers.access_denied = Arc::new(handler);
        self
    }

    /// Replaces the authentication entry point.
    pub fn entry_point<H: AuthenticationEntryPoint + 'static>(mut self, handler: H) -> Self {
        self.handlers.entry_point = Arc::new(handler);
        self
    }
}

impl Default for Gateway {
    fn default() -> Self {
        Self::new()
    }
}

fn default_login_path() -> String {
    DEFAULT_LOGIN_PATH.to_string()
}

fn default_logout_path() -> String {
    DEFAULT_LOGOUT_PATH.to_string()
}

/// Externally-loaded gateway path configuration.
///
/// Deserializable from whatever configuration source the deployment uses
/// (file, environment, service registry).
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayProperties {
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_logout_path")]
    pub logout_path: String,
    #[serde(default)]
    pub whitelist: Vec<String>,
}

impl Default for GatewayProperties {
    fn default() -> Self {
        GatewayProperties {
            login_path: default_login_path(),
            logout_path: default_logout_path(),
            whitelist: Vec::new(),
        }
    }
}
