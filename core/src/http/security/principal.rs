//! Authenticated identity model.

use std::fmt;

/// An authenticated caller: an identifier plus the roles granted to it.
///
/// A `Principal` is created by a successful authentication and never mutated
/// afterwards; the builder methods are meant to be used before the value is
/// handed to the gateway.
///
/// # Example
/// ```
/// use authgate_core::http::security::Principal;
///
/// let principal = Principal::new("alice").roles(&["USER"]);
/// assert!(principal.has_role("USER"));
/// assert!(!principal.has_role("ADMIN"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    name: String,
    roles: Vec<String>,
}

impl Principal {
    /// Creates a principal with no roles.
    pub fn new(name: &str) -> Self {
        Principal {
            name: name.to_string(),
            roles: Vec::new(),
        }
    }

    /// Adds roles (builder pattern, duplicates ignored).
    pub fn roles(mut self, roles: &[&str]) -> Self {
        for role in roles {
            let role = role.to_string();
            if !self.roles.contains(&role) {
                self.roles.push(role);
            }
        }
        self
    }

    /// Returns the identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the granted roles.
    pub fn get_roles(&self) -> &[String] {
        &self.roles
    }

    /// Checks for a specific role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Checks for ANY of the given roles.
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Principal {{ name: {}, roles: {:?} }}",
            self.name, self.roles
        )
    }
}
