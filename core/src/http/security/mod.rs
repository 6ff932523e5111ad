//! Security gateway: authentication, authorization and handler dispatch.
//!
//! # Module Structure
//!
//! - `access` - Authorization decision engine (path rules, role checks, fallback policy)
//! - `config` - Gateway builder and externally-loaded properties
//! - `context` - Security context persistence (session-backed)
//! - `converter` - Credential extraction from login requests
//! - `extractor` - Actix Web extractors (AuthenticatedPrincipal, OptionalPrincipal)
//! - `handlers` - Terminal outcome handlers (success/failure/logout/denied/entry-point)
//! - `manager` - Delegating authentication manager and providers
//! - `middleware` - The gateway middleware itself
//! - `path_pattern` - Glob-style URL pattern matching
//! - `principal` - Authenticated identity model

// Re-exports for convenience
pub use access::{
    AccessCheck, AccessPolicy, AnyOf, AuthenticatedPolicy, Decision, DenyAll, HasRole, PathRule,
    PathRuleAuthorizer, PermitAll, RequestContext,
};
pub use config::{Gateway, GatewayProperties, DEFAULT_LOGIN_PATH, DEFAULT_LOGOUT_PATH};
pub use context::{SecurityContextRepository, SessionContextRepository, SessionPrincipal};
pub use converter::{
    CredentialConverter, FormCredentialConverter, JsonCredentialConverter, LoginAttempt,
};
pub use extractor::{AuthenticatedPrincipal, OptionalPrincipal, SecurityExt};
pub use handlers::{
    AccessDeniedHandler, AuthenticationEntryPoint, AuthenticationFailureHandler,
    AuthenticationSuccessHandler, Handlers, LogoutHandler, LogoutSuccessHandler,
};
pub use manager::{
    AuthOutcome, AuthenticationProvider, DelegatingAuthenticationManager,
    UsernamePasswordProvider,
};
pub use path_pattern::{PathPattern, PatternSet};
pub use principal::Principal;

pub mod access;
pub mod config;
pub mod context;
pub mod converter;
pub mod extractor;
pub mod handlers;
pub mod manager;
pub mod middleware;
pub mod path_pattern;
pub mod principal;
