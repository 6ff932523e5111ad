//! Delegating authentication manager.
//!
//! Authentication strategies implement [`AuthenticationProvider`] and are
//! registered in order on a [`DelegatingAuthenticationManager`]. Each
//! provider may produce a principal, decline (deferring to the next
//! provider), or fail with a reason. The manager short-circuits on the first
//! success; if nothing succeeds, the first failure reason seen wins, and an
//! all-decline run reports [`AuthError::NoApplicableStrategy`].

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::http::error::AuthError;
use crate::http::security::converter::LoginAttempt;
use crate::http::security::principal::Principal;

/// Outcome of a single provider's attempt.
#[derive(Debug)]
pub enum AuthOutcome {
    /// The provider validated the credentials.
    Success(Principal),
    /// The provider cannot process this attempt; try the next one.
    Decline,
    /// The provider recognized the attempt and rejected it.
    Failure(AuthError),
}

/// A single authentication strategy.
pub trait AuthenticationProvider: Send + Sync {
    fn authenticate(&self, attempt: &LoginAttempt) -> AuthOutcome;
}

/// Ordered chain of authentication providers.
///
/// # Example
/// ```
/// use authgate_core::http::security::{
///     DelegatingAuthenticationManager, UsernamePasswordProvider,
/// };
///
/// let manager = DelegatingAuthenticationManager::new()
///     .provider(UsernamePasswordProvider::new().with_user("alice", "wonder", &["USER"]));
/// ```
#[derive(Clone, Default)]
pub struct DelegatingAuthenticationManager {
    providers: Vec<Arc<dyn AuthenticationProvider>>,
}

impl DelegatingAuthenticationManager {
    /// Creates a manager with no providers. Until one is registered, every
    /// attempt fails with [`AuthError::NoApplicableStrategy`].
    pub fn new() -> Self {
        DelegatingAuthenticationManager {
            providers: Vec::new(),
        }
    }

    /// Appends a provider to the chain (builder pattern).
    pub fn provider<P: AuthenticationProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Appends an already-shared provider to the chain.
    pub fn provider_arc(mut self, provider: Arc<dyn AuthenticationProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Runs the chain in registration order.
    pub fn authenticate(&self, attempt: &LoginAttempt) -> Result<Principal, AuthError> {
        let mut failure: Option<AuthError> = None;

        for (index, provider) in self.providers.iter().enumerate() {
            match provider.authenticate(attempt) {
                AuthOutcome::Success(principal) => {
                    debug!(provider = index, user = %principal.name(), "authentication succeeded");
                    return Ok(principal);
                }
                AuthOutcome::Decline => continue,
                AuthOutcome::Failure(err) => {
                    debug!(provider = index, user = %attempt.username(), "provider rejected attempt");
                    // keep the earliest concrete reason
                    if failure.is_none() {
                        failure = Some(err);
                    }
                }
            }
        }

        Err(failure.unwrap_or(AuthError::NoApplicableStrategy))
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

struct StoredUser {
    password: String,
    roles: Vec<String>,
}

/// In-memory username/password strategy.
///
/// Unknown usernames decline so that a later provider may claim them; a
/// known username with a wrong password fails with
/// [`AuthError::InvalidCredentials`].
#[derive(Default)]
pub struct UsernamePasswordProvider {
    users: HashMap<String, StoredUser>,
}

impl UsernamePasswordProvider {
    /// Creates a provider with no users.
    pub fn new() -> Self {
        UsernamePasswordProvider {
            users: HashMap::new(),
        }
    }

    /// Registers a user (builder pattern). Re-registering a username
    /// replaces the previous entry.
    pub fn with_user(mut self, username: &str, password: &str, roles: &[&str]) -> Self {
        self.users.insert(
            username.to_string(),
            StoredUser {
                password: password.to_string(),
                roles: roles.iter().map(|r| r.to_string()).collect(),
            },
        );
        self
    }
}

impl AuthenticationProvider for UsernamePasswordProvider {
    fn authenticate(&self, attempt: &LoginAttempt) -> AuthOutcome {
        match self.users.get(attempt.username()) {
            None => AuthOutcome::Decline,
            Some(user) if user.password == attempt.password() => {
                let roles: Vec<&str> = user.roles.iter().map(String::as_str).collect();
                AuthOutcome::Success(Principal::new(attempt.username()).roles(&roles))
            }
            Some(_) => AuthOutcome::Failure(AuthError::InvalidCredentials),
        }
    }
}
