//! Authorization decision engine.
//!
//! [`PathRuleAuthorizer`] holds an ordered list of [`PathRule`]s; the first
//! rule whose pattern matches the request path decides. `OPTIONS` requests
//! are allowed unconditionally (cross-origin preflight must never be
//! challenged), and requests no rule claims fall through to a pluggable
//! [`AccessPolicy`].

use std::sync::Arc;

use actix_web::http::Method;

use crate::http::security::path_pattern::PathPattern;
use crate::http::security::principal::Principal;

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allow(self) -> bool {
        self == Decision::Allow
    }
}

/// The request attributes an authorization decision may depend on.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    path: String,
}

impl RequestContext {
    pub fn new(method: Method, path: &str) -> Self {
        RequestContext {
            method,
            path: path.to_string(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// A single access requirement attached to a path rule.
pub trait AccessCheck: Send + Sync {
    fn check(&self, principal: Option<&Principal>, ctx: &RequestContext) -> Decision;
}

/// Grants access to everyone, authenticated or not.
#[derive(Debug, Clone, Default)]
pub struct PermitAll;

impl AccessCheck for PermitAll {
    fn check(&self, _principal: Option<&Principal>, _ctx: &RequestContext) -> Decision {
        Decision::Allow
    }
}

/// Denies access to everyone.
#[derive(Debug, Clone, Default)]
pub struct DenyAll;

impl AccessCheck for DenyAll {
    fn check(&self, _principal: Option<&Principal>, _ctx: &RequestContext) -> Decision {
        Decision::Deny
    }
}

/// Requires a specific role on the principal.
#[derive(Debug, Clone)]
pub struct HasRole {
    role: String,
}

impl HasRole {
    pub fn new(role: &str) -> Self {
        HasRole {
            role: role.to_string(),
        }
    }

    /// Shorthand for a shared check, convenient inside [`AnyOf::of`].
    pub fn arc(role: &str) -> Arc<dyn AccessCheck> {
        Arc::new(Self::new(role))
    }
}

impl AccessCheck for HasRole {
    fn check(&self, principal: Option<&Principal>, _ctx: &RequestContext) -> Decision {
        match principal {
            Some(p) if p.has_role(&self.role) => Decision::Allow,
            _ => Decision::Deny,
        }
    }
}

/// Lazy short-circuit OR over an ordered list of checks.
///
/// Checks run left to right and stop at the first `Allow`; a check after a
/// granting one is never evaluated. This matters when checks are
/// instrumented or expensive (remote role lookups).
#[derive(Clone)]
pub struct AnyOf {
    checks: Vec<Arc<dyn AccessCheck>>,
}

impl AnyOf {
    pub fn of(checks: Vec<Arc<dyn AccessCheck>>) -> Self {
        AnyOf { checks }
    }
}

impl AccessCheck for AnyOf {
    fn check(&self, principal: Option<&Principal>, ctx: &RequestContext) -> Decision {
        for check in &self.checks {
            if check.check(principal, ctx).is_allow() {
                return Decision::Allow;
            }
        }
        Decision::Deny
    }
}

/// Fallback policy for requests no path rule claims.
///
/// This is the pluggable seam for deployment-specific authorization; the
/// gateway never looks inside it.
pub trait AccessPolicy: Send + Sync {
    fn decide(&self, principal: Option<&Principal>, ctx: &RequestContext) -> Decision;
}

/// Default fallback: allow any authenticated principal.
#[derive(Debug, Clone, Default)]
pub struct AuthenticatedPolicy;

impl AccessPolicy for AuthenticatedPolicy {
    fn decide(&self, principal: Option<&Principal>, _ctx: &RequestContext) -> Decision {
        match principal {
            Some(_) => Decision::Allow,
            None => Decision::Deny,
        }
    }
}

/// An ordered association of a path pattern with an access requirement.
#[derive(Clone)]
pub struct PathRule {
    pattern: PathPattern,
    check: Arc<dyn AccessCheck>,
}

impl PathRule {
    pub fn new(pattern: &str, check: Arc<dyn AccessCheck>) -> Self {
        PathRule {
            pattern: PathPattern::new(pattern),
            check,
        }
    }

    pub fn pattern(&self) -> &str {
        self.pattern.pattern()
    }
}

/// Ordered path-rule evaluation with an OPTIONS bypass and a fallback
/// policy.
///
/// Evaluation order: `OPTIONS` bypass, then rules in registration order
/// (first matching pattern wins), then the fallback policy.
#[derive(Clone)]
pub struct PathRuleAuthorizer {
    rules: Vec<PathRule>,
    fallback: Arc<dyn AccessPolicy>,
}

impl PathRuleAuthorizer {
    pub fn new() -> Self {
        PathRuleAuthorizer {
            rules: Vec::new(),
            fallback: Arc::new(AuthenticatedPolicy),
        }
    }

    /// Appends a rule (builder pattern). Registration order is evaluation
    /// order: put specific patterns before general ones.
    pub fn rule(mut self, rule: PathRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Replaces the fallback policy.
    pub fn fallback(mut self, policy: Arc<dyn AccessPolicy>) -> Self {
        self.fallback = policy;
        self
    }

    /// Decides whether the request may proceed.
    pub fn authorize(&self, principal: Option<&Principal>, ctx: &RequestContext) -> Decision {
        if ctx.method() == Method::OPTIONS {
            return Decision::Allow;
        }

        for rule in &self.rules {
            if rule.pattern.matches(ctx.path()) {
                return rule.check.check(principal, ctx);
            }
        }

        self.fallback.decide(principal, ctx)
    }
}

impl Default for PathRuleAuthorizer {
    fn default() -> Self {
        Self::new()
    }
}
